use ehousing_lib::{ContractError, ESCROW_CYCLES};

/// Escrow required to activate a lease: first-cycle rent plus a security
/// deposit of one further cycle, held in full by the registry for the
/// lease duration.
pub fn required_escrow(rent_amount: i128) -> Result<i128, ContractError> {
    rent_amount
        .checked_mul(ESCROW_CYCLES)
        .ok_or(ContractError::InvalidInput)
}

/// Exact-match policy: strictly less and strictly greater are both
/// rejected. No partial settlement, no refund path for excess.
pub fn validate_payment(required: i128, attached: i128) -> Result<(), ContractError> {
    if attached != required {
        return Err(ContractError::InvalidPaymentAmount);
    }
    Ok(())
}
