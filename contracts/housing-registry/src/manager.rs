use soroban_sdk::{token, Address, Env, String};

use ehousing_lib::{validation, Asset, ContractError, Custody, LeaseTerms};

use crate::{access, escrow, registry::AssetRegistry, storage};

/// Encapsulates the custody transition rules.
///
/// Every mutating command loads the record through `AssetRegistry`,
/// authorizes through the `access` predicates, validates any attached
/// payment through `escrow`, and only then writes back — a rejected
/// command returns before any save, so the record is untouched.
///
/// Authorization ordering: administrator-gated operations report
/// `Unauthorized` before `InvalidState`; occupant-driven operations
/// (`activate_lease`, `return_custody`) check state first, so a stale
/// retry against an asset that has moved on reports `InvalidState`.
pub struct LeaseStateMachine {
    registry: AssetRegistry,
    env: Env,
}

impl LeaseStateMachine {
    pub fn new(env: Env) -> Self {
        Self {
            registry: AssetRegistry::new(env.clone()),
            env,
        }
    }

    fn require_admin(&self, caller: &Address) -> Result<Address, ContractError> {
        let admin = storage::get_admin(&self.env)?;
        if !access::is_administrator(caller, &admin) {
            return Err(ContractError::Unauthorized);
        }
        Ok(admin)
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a new asset in `Available` custody. Open to any
    /// authenticated caller; the administrator configured at
    /// initialization holds the lease and reclaim rights regardless of
    /// who registered the record.
    pub fn create_asset(&self, metadata_uri: String) -> Result<Asset, ContractError> {
        // Registry must exist.
        storage::get_admin(&self.env)?;
        validation::validate_metadata_uri(&metadata_uri)?;
        Ok(self.registry.create(metadata_uri))
    }

    // ------------------------------------------------------------------
    // Lease lifecycle
    // ------------------------------------------------------------------

    /// Designate `occupant` as the future occupant of an `Available`
    /// asset, pending activation with the exact escrow amount.
    pub fn offer_lease(
        &self,
        caller: &Address,
        id: u64,
        occupant: &Address,
        lease_start: u64,
        lease_end: u64,
        rent_amount: i128,
    ) -> Result<Asset, ContractError> {
        self.require_admin(caller)?;

        let mut asset = self.registry.load(id)?;
        if !asset.is_available() {
            return Err(ContractError::InvalidState);
        }
        validation::validate_lease_window(lease_start, lease_end)?;
        validation::validate_rent(rent_amount)?;

        asset.custody = Custody::Offered(LeaseTerms {
            occupant: occupant.clone(),
            lease_start,
            lease_end,
            rent_amount,
            escrow_held: 0,
            escrow_token: None,
        });
        self.registry.save(&asset);
        Ok(asset)
    }

    /// Take custody of an `Offered` asset. Only the designated occupant
    /// may activate, and the attached amount must equal the escrow of
    /// two rent cycles exactly; on any failure the asset stays `Offered`.
    pub fn activate_lease(
        &self,
        caller: &Address,
        id: u64,
        attached_amount: i128,
    ) -> Result<Asset, ContractError> {
        let mut asset = self.registry.load(id)?;

        let terms = match &asset.custody {
            Custody::Offered(terms) => terms.clone(),
            _ => return Err(ContractError::InvalidState),
        };
        if !access::is_designated_occupant(caller, &asset) {
            return Err(ContractError::Unauthorized);
        }

        let required = escrow::required_escrow(terms.rent_amount)?;
        escrow::validate_payment(required, attached_amount)?;

        let escrow_token = self.collect_escrow(caller, attached_amount);

        asset.custody = Custody::Occupied(LeaseTerms {
            escrow_held: attached_amount,
            escrow_token,
            ..terms
        });
        self.registry.save(&asset);
        Ok(asset)
    }

    /// Administrator-assigned occupancy without payment: `Available`
    /// straight to `Occupied`, rent and escrow both zero.
    pub fn assign_direct(
        &self,
        caller: &Address,
        id: u64,
        occupant: &Address,
        lease_start: u64,
        lease_end: u64,
    ) -> Result<Asset, ContractError> {
        self.require_admin(caller)?;

        let mut asset = self.registry.load(id)?;
        if !asset.is_available() {
            return Err(ContractError::InvalidState);
        }
        validation::validate_lease_window(lease_start, lease_end)?;

        asset.custody = Custody::Occupied(LeaseTerms {
            occupant: occupant.clone(),
            lease_start,
            lease_end,
            rent_amount: 0,
            escrow_held: 0,
            escrow_token: None,
        });
        self.registry.save(&asset);
        Ok(asset)
    }

    /// Reclaim an `Occupied` or `Offered` asset. Clears the occupant and
    /// lease terms and releases any held escrow to the administrator.
    pub fn reclaim(&self, caller: &Address, id: u64) -> Result<(Asset, i128), ContractError> {
        let admin = self.require_admin(caller)?;

        let mut asset = self.registry.load(id)?;
        let (released, escrow_token) = match &asset.custody {
            Custody::Offered(terms) | Custody::Occupied(terms) => {
                (terms.escrow_held, terms.escrow_token.clone())
            }
            Custody::Available => return Err(ContractError::InvalidState),
        };

        self.release_escrow(&admin, released, escrow_token);

        asset.custody = Custody::Available;
        self.registry.save(&asset);
        Ok((asset, released))
    }

    /// Administrative override with the same authorization and effect as
    /// `reclaim`, kept as a distinct entry point; only valid against an
    /// `Occupied` asset.
    pub fn reclaim_forced(
        &self,
        caller: &Address,
        id: u64,
    ) -> Result<(Asset, i128), ContractError> {
        let admin = self.require_admin(caller)?;

        let mut asset = self.registry.load(id)?;
        let (released, escrow_token) = match &asset.custody {
            Custody::Occupied(terms) => (terms.escrow_held, terms.escrow_token.clone()),
            _ => return Err(ContractError::InvalidState),
        };

        self.release_escrow(&admin, released, escrow_token);

        asset.custody = Custody::Available;
        self.registry.save(&asset);
        Ok((asset, released))
    }

    /// Voluntary return by the current occupant. Escrow is released to
    /// the administrator; a second call finds the asset `Available`.
    pub fn return_custody(
        &self,
        caller: &Address,
        id: u64,
    ) -> Result<(Asset, i128), ContractError> {
        let mut asset = self.registry.load(id)?;

        let terms = match &asset.custody {
            Custody::Occupied(terms) => terms.clone(),
            _ => return Err(ContractError::InvalidState),
        };
        if !access::is_current_occupant(caller, &asset) {
            return Err(ContractError::Unauthorized);
        }

        let admin = storage::get_admin(&self.env)?;
        self.release_escrow(&admin, terms.escrow_held, terms.escrow_token);

        asset.custody = Custody::Available;
        self.registry.save(&asset);
        Ok((asset, terms.escrow_held))
    }

    // ------------------------------------------------------------------
    // Escrow settlement
    // ------------------------------------------------------------------

    // Funds move only when a payment token is configured at activation;
    // otherwise the host guarantees the attached amount is backed and the
    // registry just records it. The token actually collected through is
    // written into the lease terms, and release settles against that
    // record — reconfiguring the payment token mid-lease must not change
    // where an already-held escrow came from or strand the asset.

    fn collect_escrow(&self, from: &Address, amount: i128) -> Option<Address> {
        if amount == 0 {
            return None;
        }
        let token_id = storage::get_payment_token(&self.env)?;
        let client = token::Client::new(&self.env, &token_id);
        client.transfer(from, &self.env.current_contract_address(), &amount);
        Some(token_id)
    }

    fn release_escrow(&self, to: &Address, amount: i128, escrow_token: Option<Address>) {
        if amount == 0 {
            return;
        }
        if let Some(token_id) = escrow_token {
            let client = token::Client::new(&self.env, &token_id);
            client.transfer(&self.env.current_contract_address(), to, &amount);
        }
    }
}
