use soroban_sdk::{contracttype, Address, String};

/// Terms of a pending or active lease.
///
/// While custody is `Offered`, `occupant` is the *designated* occupant the
/// administrator named; custody only transfers once that address activates
/// the lease with the exact escrow amount.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LeaseTerms {
    pub occupant: Address,
    pub lease_start: u64,
    pub lease_end: u64,
    /// Rent per lease cycle. Zero for administrator-assigned occupancy.
    pub rent_amount: i128,
    /// Amount collected at activation and held until reclaim or return.
    pub escrow_held: i128,
    /// Token the escrow was collected through. `None` when nothing was
    /// collected on-chain (no payment token configured at activation);
    /// release settles against this record, never against whatever token
    /// happens to be configured later.
    pub escrow_token: Option<Address>,
}

/// Custody lifecycle of an asset.
///
/// Lease fields exist only in the variants where they are meaningful, so an
/// `Available` record cannot carry a stale occupant or rent by construction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Custody {
    Available,
    Offered(LeaseTerms),
    Occupied(LeaseTerms),
}

/// A registered housing asset.
///
/// `id` and `metadata_uri` are immutable after creation; everything mutable
/// lives inside `custody`. The administrator is registry-wide and stored
/// once, not per record.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Asset {
    pub id: u64,
    pub metadata_uri: String,
    pub custody: Custody,
}

impl Asset {
    /// The current occupant, `Some` iff custody is `Occupied`.
    pub fn occupant(&self) -> Option<Address> {
        match &self.custody {
            Custody::Occupied(terms) => Some(terms.occupant.clone()),
            _ => None,
        }
    }

    /// The occupant an offer designates, `Some` iff custody is `Offered`.
    pub fn designated_occupant(&self) -> Option<Address> {
        match &self.custody {
            Custody::Offered(terms) => Some(terms.occupant.clone()),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.custody, Custody::Available)
    }
}
