use soroban_sdk::String;

use crate::{errors::ContractError, MAX_STRING_LENGTH};

pub fn validate_metadata_uri(uri: &String) -> Result<(), ContractError> {
    if uri.len() == 0 || uri.len() > MAX_STRING_LENGTH {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_lease_window(lease_start: u64, lease_end: u64) -> Result<(), ContractError> {
    if lease_end <= lease_start {
        return Err(ContractError::InvalidLeaseTerm);
    }
    Ok(())
}

pub fn validate_rent(rent_amount: i128) -> Result<(), ContractError> {
    if rent_amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
