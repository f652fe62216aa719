use std::path::Path;

use dg_core::dungeon::{DungeonLayout, RoomType};
use hashbrown::HashMap;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::mapping::{RoomAssetEntry, RoomAssetMapping};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No asset mapped for room type '{0}'")]
    Missing(RoomType),
    #[error("Room type '{0}' is mapped more than once")]
    Duplicate(RoomType),
}

/// Explicit `RoomType -> asset key` lookup.
///
/// Every room type must be covered exactly once, so adding a variant to
/// `RoomType` fails loudly at load time instead of shifting assets around.
#[derive(Debug, Clone)]
pub struct RoomAssetTable {
    assets: HashMap<RoomType, String>,
}

impl RoomAssetTable {
    /// Build a table from a mapping and validate coverage.
    pub fn new(mapping: RoomAssetMapping) -> Result<Self, AssetError> {
        let mut assets = HashMap::new();
        for RoomAssetEntry { room_type, asset } in mapping.entries {
            if assets.insert(room_type, asset).is_some() {
                return Err(AssetError::Duplicate(room_type));
            }
        }
        for room_type in RoomType::iter() {
            if !assets.contains_key(&room_type) {
                return Err(AssetError::Missing(room_type));
            }
        }
        Ok(Self { assets })
    }

    /// Load the table from a JSON file and validate coverage.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, AssetError> {
        let mapping: RoomAssetMapping = serde_json::from_str(content)?;
        Self::new(mapping)
    }

    pub fn asset_for(&self, room_type: RoomType) -> &str {
        // Coverage is checked on construction
        self.assets.get(&room_type).map(String::as_str).unwrap_or_default()
    }

    /// Asset key for every room of a layout, in walk order.
    pub fn assets_for_layout<'a>(
        &'a self,
        layout: &'a DungeonLayout,
    ) -> impl Iterator<Item = (dg_core::dungeon::Cell, &'a str)> + 'a {
        layout
            .rooms()
            .iter()
            .map(move |room| (room.position, self.asset_for(room.room_type)))
    }

    /// Export back to the serializable form, ordered like `RoomType::ALL`.
    pub fn to_mapping(&self) -> RoomAssetMapping {
        RoomAssetMapping {
            entries: RoomType::ALL
                .iter()
                .map(|&room_type| RoomAssetEntry {
                    room_type,
                    asset: self.asset_for(room_type).to_string(),
                })
                .collect(),
        }
    }
}

impl Default for RoomAssetTable {
    /// `rooms/<type>` for every room type.
    fn default() -> Self {
        Self {
            assets: RoomType::iter()
                .map(|room_type| (room_type, format!("rooms/{}", room_type)))
                .collect(),
        }
    }
}
