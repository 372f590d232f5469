#![cfg(test)]

use soroban_sdk::testutils::Address as _;
use soroban_sdk::{token, Address, Env, String};

use ehousing_lib::ContractError;

use crate::{HousingRegistry, HousingRegistryClient};

struct EscrowSetup<'a> {
    client: HousingRegistryClient<'a>,
    contract_id: Address,
    token_id: Address,
    admin: Address,
    tenant: Address,
}

/// Registry plus a Stellar asset as payment token, with the tenant funded.
fn setup(env: &Env) -> EscrowSetup<'_> {
    env.mock_all_auths();

    let admin = Address::generate(env);
    let tenant = Address::generate(env);
    let token_admin = Address::generate(env);

    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token_id = sac.address();
    token::StellarAssetClient::new(env, &token_id).mint(&tenant, &1_000);

    let contract_id = env.register(HousingRegistry, ());
    let client = HousingRegistryClient::new(env, &contract_id);

    client.init_contract(&admin);
    client.set_payment_token(&admin, &token_id);

    EscrowSetup {
        client,
        contract_id,
        token_id,
        admin,
        tenant,
    }
}

#[test]
fn test_escrow_collected_on_activation_and_released_on_return() {
    let env = Env::default();
    let s = setup(&env);
    let balances = token::Client::new(&env, &s.token_id);

    let id = s
        .client
        .create_asset(&s.admin, &String::from_str(&env, "ipfs://house-0"));
    s.client.offer_lease(&s.admin, &id, &s.tenant, &100, &200, &250);
    s.client.activate_lease(&s.tenant, &id, &500);

    assert_eq!(balances.balance(&s.tenant), 500);
    assert_eq!(balances.balance(&s.contract_id), 500);
    assert_eq!(balances.balance(&s.admin), 0);

    s.client.return_custody(&s.tenant, &id);

    assert_eq!(balances.balance(&s.contract_id), 0);
    assert_eq!(balances.balance(&s.admin), 500);
    assert_eq!(balances.balance(&s.tenant), 500);
}

#[test]
fn test_escrow_released_to_admin_on_reclaim() {
    let env = Env::default();
    let s = setup(&env);
    let balances = token::Client::new(&env, &s.token_id);

    let id = s
        .client
        .create_asset(&s.admin, &String::from_str(&env, "ipfs://house-0"));
    s.client.offer_lease(&s.admin, &id, &s.tenant, &100, &200, &100);
    s.client.activate_lease(&s.tenant, &id, &200);

    s.client.reclaim(&s.admin, &id);

    assert_eq!(balances.balance(&s.contract_id), 0);
    assert_eq!(balances.balance(&s.admin), 200);
}

#[test]
fn test_escrow_released_to_admin_on_forced_reclaim() {
    let env = Env::default();
    let s = setup(&env);
    let balances = token::Client::new(&env, &s.token_id);

    let id = s
        .client
        .create_asset(&s.admin, &String::from_str(&env, "ipfs://house-0"));
    s.client.offer_lease(&s.admin, &id, &s.tenant, &100, &200, &100);
    s.client.activate_lease(&s.tenant, &id, &200);

    s.client.reclaim_forced(&s.admin, &id);

    assert_eq!(balances.balance(&s.contract_id), 0);
    assert_eq!(balances.balance(&s.admin), 200);
}

#[test]
fn test_rejected_activation_moves_no_funds() {
    let env = Env::default();
    let s = setup(&env);
    let balances = token::Client::new(&env, &s.token_id);

    let id = s
        .client
        .create_asset(&s.admin, &String::from_str(&env, "ipfs://house-0"));
    s.client.offer_lease(&s.admin, &id, &s.tenant, &100, &200, &250);

    let result = s.client.try_activate_lease(&s.tenant, &id, &300);
    assert_eq!(result, Err(Ok(ContractError::InvalidPaymentAmount)));

    assert_eq!(balances.balance(&s.tenant), 1_000);
    assert_eq!(balances.balance(&s.contract_id), 0);
}

#[test]
fn test_direct_assignment_holds_no_escrow() {
    let env = Env::default();
    let s = setup(&env);
    let balances = token::Client::new(&env, &s.token_id);

    let id = s
        .client
        .create_asset(&s.admin, &String::from_str(&env, "ipfs://house-0"));
    s.client.assign_direct(&s.admin, &id, &s.tenant, &100, &200);
    s.client.reclaim(&s.admin, &id);

    assert_eq!(balances.balance(&s.tenant), 1_000);
    assert_eq!(balances.balance(&s.contract_id), 0);
    assert_eq!(balances.balance(&s.admin), 0);
}

#[test]
fn test_reclaim_succeeds_after_late_token_configuration() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let tenant = Address::generate(&env);
    let token_admin = Address::generate(&env);

    let contract_id = env.register(HousingRegistry, ());
    let client = HousingRegistryClient::new(&env, &contract_id);
    client.init_contract(&admin);

    // Lease activated before any payment token exists: the escrow amount
    // is recorded but nothing was collected on-chain.
    let id = client.create_asset(&admin, &String::from_str(&env, "ipfs://house-0"));
    client.offer_lease(&admin, &id, &tenant, &100, &200, &100);
    client.activate_lease(&tenant, &id, &200);

    // Token configured mid-lease. Release must settle against what was
    // actually collected (nothing), not against the new token the
    // contract holds no balance of.
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token_id = sac.address();
    client.set_payment_token(&admin, &token_id);

    client.reclaim(&admin, &id);

    let balances = token::Client::new(&env, &token_id);
    assert!(client.get_asset(&id).is_available());
    assert_eq!(balances.balance(&admin), 0);
    assert_eq!(balances.balance(&contract_id), 0);
}

#[test]
fn test_return_succeeds_after_late_token_configuration() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let tenant = Address::generate(&env);
    let token_admin = Address::generate(&env);

    let contract_id = env.register(HousingRegistry, ());
    let client = HousingRegistryClient::new(&env, &contract_id);
    client.init_contract(&admin);

    let id = client.create_asset(&admin, &String::from_str(&env, "ipfs://house-0"));
    client.offer_lease(&admin, &id, &tenant, &100, &200, &100);
    client.activate_lease(&tenant, &id, &200);

    let sac = env.register_stellar_asset_contract_v2(token_admin);
    client.set_payment_token(&admin, &sac.address());

    client.return_custody(&tenant, &id);
    assert!(client.get_asset(&id).is_available());
}

#[test]
fn test_activation_records_settlement_token() {
    let env = Env::default();
    let s = setup(&env);

    let id = s
        .client
        .create_asset(&s.admin, &String::from_str(&env, "ipfs://house-0"));
    s.client.offer_lease(&s.admin, &id, &s.tenant, &100, &200, &100);
    s.client.activate_lease(&s.tenant, &id, &200);

    let asset = s.client.get_asset(&id);
    match asset.custody {
        ehousing_lib::Custody::Occupied(terms) => {
            assert_eq!(terms.escrow_token, Some(s.token_id.clone()));
        }
        _ => panic!("Expected occupied custody"),
    }
}

#[test]
fn test_set_payment_token_requires_admin() {
    let env = Env::default();
    let s = setup(&env);

    let result = s.client.try_set_payment_token(&s.tenant, &s.token_id);
    assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
}
