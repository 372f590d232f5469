#![no_std]

mod access;
mod escrow;
mod manager;
mod registry;
mod storage;

#[cfg(test)]
mod test_escrow;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};

use ehousing_lib::{Asset, ContractError};

use manager::LeaseStateMachine;
use registry::AssetRegistry;

#[contract]
pub struct HousingRegistry;

#[contractimpl]
impl HousingRegistry {
    /// Initialize contract with the administrator (one-time setup).
    ///
    /// The administrator is fixed for the life of the registry: sole
    /// authority to register assets, offer leases, assign occupancy,
    /// and reclaim.
    pub fn init_contract(env: Env, admin: Address) -> Result<(), ContractError> {
        if storage::has_admin(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        storage::set_admin(&env, &admin);
        env.storage()
            .instance()
            .set(&storage::DataKey::AssetCounter, &0u64);
        Ok(())
    }

    /// Set the token escrowed rent settles in (admin only).
    pub fn set_payment_token(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        admin.require_auth();
        let current_admin = storage::get_admin(&env)?;
        if admin != current_admin {
            return Err(ContractError::Unauthorized);
        }

        storage::set_payment_token(&env, &token);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::get_admin(&env)
    }

    /// Register a new housing asset. Ids are dense and start at 0. Any
    /// authenticated caller may register; lease and reclaim authority
    /// stays with the administrator.
    pub fn create_asset(
        env: Env,
        caller: Address,
        metadata_uri: String,
    ) -> Result<u64, ContractError> {
        caller.require_auth();

        let asset = LeaseStateMachine::new(env.clone()).create_asset(metadata_uri)?;

        env.events().publish(
            (Symbol::new(&env, "asset_created"),),
            (asset.id, asset.metadata_uri.clone()),
        );
        Ok(asset.id)
    }

    /// Get a specific asset record.
    pub fn get_asset(env: Env, id: u64) -> Result<Asset, ContractError> {
        AssetRegistry::new(env).load(id)
    }

    /// Total assets ever registered.
    pub fn total_assets(env: Env) -> u64 {
        AssetRegistry::new(env).total()
    }

    /// Offer a lease on an `Available` asset to a designated occupant
    /// (admin only). Custody transfers once the occupant activates.
    pub fn offer_lease(
        env: Env,
        caller: Address,
        id: u64,
        occupant: Address,
        lease_start: u64,
        lease_end: u64,
        rent_amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        LeaseStateMachine::new(env.clone()).offer_lease(
            &caller,
            id,
            &occupant,
            lease_start,
            lease_end,
            rent_amount,
        )?;

        env.events().publish(
            (Symbol::new(&env, "asset_offered"),),
            (id, occupant, rent_amount),
        );
        Ok(())
    }

    /// Activate an offered lease by attaching exactly two rent cycles of
    /// escrow. Only the designated occupant may call.
    pub fn activate_lease(
        env: Env,
        caller: Address,
        id: u64,
        attached_amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        LeaseStateMachine::new(env.clone()).activate_lease(&caller, id, attached_amount)?;

        env.events().publish(
            (Symbol::new(&env, "asset_occupied"),),
            (id, caller, attached_amount),
        );
        Ok(())
    }

    /// Assign occupancy directly without payment (admin only).
    pub fn assign_direct(
        env: Env,
        caller: Address,
        id: u64,
        occupant: Address,
        lease_start: u64,
        lease_end: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        LeaseStateMachine::new(env.clone()).assign_direct(
            &caller,
            id,
            &occupant,
            lease_start,
            lease_end,
        )?;

        env.events().publish(
            (Symbol::new(&env, "asset_occupied"),),
            (id, occupant, 0i128),
        );
        Ok(())
    }

    /// Reclaim an occupied or offered asset (admin only). Held escrow is
    /// released to the administrator.
    pub fn reclaim(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        caller.require_auth();

        let (_, released) = LeaseStateMachine::new(env.clone()).reclaim(&caller, id)?;

        env.events().publish(
            (Symbol::new(&env, "asset_reclaimed"),),
            (id, caller, released),
        );
        Ok(())
    }

    /// Forced reclaim of an occupied asset (admin only): a distinct entry
    /// point for exceptional administrative override.
    pub fn reclaim_forced(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        caller.require_auth();

        let (_, released) = LeaseStateMachine::new(env.clone()).reclaim_forced(&caller, id)?;

        env.events().publish(
            (Symbol::new(&env, "asset_reclaimed"),),
            (id, caller, released),
        );
        Ok(())
    }

    /// Voluntary return of custody by the current occupant. Held escrow
    /// is released to the administrator.
    pub fn return_custody(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        caller.require_auth();

        let (_, released) = LeaseStateMachine::new(env.clone()).return_custody(&caller, id)?;

        env.events().publish(
            (Symbol::new(&env, "asset_returned"),),
            (id, caller, released),
        );
        Ok(())
    }
}
