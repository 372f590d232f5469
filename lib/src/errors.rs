use soroban_sdk::contracterror;

/// Typed error codes shared by all Ehousing contracts.
///
/// Every failure is recoverable by the caller; none poisons the registry.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller is not the administrator / designated occupant / current
    /// occupant required by the operation.
    Unauthorized = 3,
    /// No asset was ever allocated under this id.
    AssetNotFound = 4,
    /// The asset's custody state does not admit this transition.
    InvalidState = 5,
    /// Attached value does not exactly match the required escrow.
    InvalidPaymentAmount = 6,
    InvalidInput = 7,
    /// Lease window is invalid (`lease_end <= lease_start`).
    InvalidLeaseTerm = 8,
}
