use soroban_sdk::{Env, String};

use ehousing_lib::{Asset, ContractError, Custody};

use crate::storage::DataKey;

// Asset records are bumped on every save: once fewer than
// `ASSET_TTL_THRESHOLD` ledgers of lifetime remain, the entry is raised
// back to `ASSET_TTL_EXTEND`. At ~5 s per ledger that keeps a record
// live for two months past its last custody change, well beyond a rent
// cycle.
const ASSET_TTL_THRESHOLD: u32 = 518_400;
const ASSET_TTL_EXTEND: u32 = 1_036_800;

/// Owns id allocation and the canonical asset table.
///
/// Ids are dense and strictly increasing starting at 0; the counter in
/// instance storage always holds the next id to hand out and never rolls
/// back, so no id is ever reused. Records live in persistent storage and
/// are never destroyed — an asset only ever cycles back to `Available`.
pub struct AssetRegistry {
    env: Env,
}

impl AssetRegistry {
    pub fn new(env: Env) -> Self {
        Self { env }
    }

    /// Allocate the next sequential id and store a fresh `Available` record.
    pub fn create(&self, metadata_uri: String) -> Asset {
        let id: u64 = self
            .env
            .storage()
            .instance()
            .get(&DataKey::AssetCounter)
            .unwrap_or(0);

        let asset = Asset {
            id,
            metadata_uri,
            custody: Custody::Available,
        };
        self.save(&asset);

        self.env
            .storage()
            .instance()
            .set(&DataKey::AssetCounter, &(id + 1));

        asset
    }

    pub fn load(&self, id: u64) -> Result<Asset, ContractError> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Asset(id))
            .ok_or(ContractError::AssetNotFound)
    }

    pub fn save(&self, asset: &Asset) {
        let key = DataKey::Asset(asset.id);
        self.env.storage().persistent().set(&key, asset);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, ASSET_TTL_THRESHOLD, ASSET_TTL_EXTEND);
    }

    /// Count of assets ever created; also the next id to be assigned.
    pub fn total(&self) -> u64 {
        self.env
            .storage()
            .instance()
            .get(&DataKey::AssetCounter)
            .unwrap_or(0)
    }
}
