use soroban_sdk::{contracttype, Address, Env};

use ehousing_lib::ContractError;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    PaymentToken,
    AssetCounter,
    Asset(u64),
}

/* ---------------- ADMIN ---------------- */

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

/* ---------------- PAYMENT TOKEN ---------------- */

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
}

/// Escrow settles through this token when configured. Unset means the host
/// guarantees backing out of band and the registry only validates amounts.
pub fn get_payment_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PaymentToken)
}
