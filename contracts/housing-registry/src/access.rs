use soroban_sdk::Address;

use ehousing_lib::{Asset, Custody};

/// Pure authorization predicates over `(caller, asset)`.
///
/// No storage access and no side effects; the state machine hands these the
/// administrator and the record it already loaded, and only compares
/// identities for equality — the host has already proven who is calling.

pub fn is_administrator(caller: &Address, administrator: &Address) -> bool {
    caller == administrator
}

pub fn is_current_occupant(caller: &Address, asset: &Asset) -> bool {
    match &asset.custody {
        Custody::Occupied(terms) => &terms.occupant == caller,
        _ => false,
    }
}

pub fn is_designated_occupant(caller: &Address, asset: &Asset) -> bool {
    match &asset.custody {
        Custody::Offered(terms) => &terms.occupant == caller,
        _ => false,
    }
}
