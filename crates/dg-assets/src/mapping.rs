use dg_core::dungeon::RoomType;
use serde::{Deserialize, Serialize};

/// Links a room type to the asset (prefab, scene, sprite) instantiated for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomAssetEntry {
    pub room_type: RoomType,
    /// Engine-specific asset key, e.g. `"rooms/spawn"`.
    pub asset: String,
}

/// The root structure for the room asset configuration file.
///
/// ```json
/// { "entries": [ { "room_type": "spawn", "asset": "rooms/spawn" } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RoomAssetMapping {
    pub entries: Vec<RoomAssetEntry>,
}
