//! Room types, door states, and the per-cell room record

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::cell::{Cell, Direction};

/// Gameplay role of a generated room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    /// Player entry point, exactly one per layout
    Spawn,
    /// Treasure room, also the fallback for unassigned cells
    #[default]
    Loot,
    /// Holds the key for one Locked room
    Key,
    /// Sealed until a key is used
    Locked,
    /// Level exit, exactly one per layout
    Gate,
    Trap,
    Empty,
}

impl RoomType {
    /// All room types for iteration
    pub const ALL: [RoomType; 7] = [
        RoomType::Spawn,
        RoomType::Loot,
        RoomType::Key,
        RoomType::Locked,
        RoomType::Gate,
        RoomType::Trap,
        RoomType::Empty,
    ];

    /// Check if this is one of the fixed single-instance roles
    pub const fn is_unique(self) -> bool {
        matches!(self, RoomType::Spawn | RoomType::Gate)
    }

    /// Whether enemy/item spawners may populate this room
    pub const fn accepts_spawns(self) -> bool {
        !self.is_unique()
    }
}

/// Per-side passability of a room boundary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    /// No passage
    #[default]
    Wall,
    Open,
    /// Passable only after the controlling Locked room is unlocked
    Locked,
}

impl DoorState {
    pub const fn is_passable(self) -> bool {
        matches!(self, DoorState::Open)
    }

    /// Door state for a boundary shared by two existing rooms
    pub const fn between(a: RoomType, b: RoomType) -> Self {
        if matches!(a, RoomType::Locked) || matches!(b, RoomType::Locked) {
            DoorState::Locked
        } else {
            DoorState::Open
        }
    }
}

/// A generated room occupying one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_type: RoomType,
    pub position: Cell,
    /// Indexed by `Direction::index()`
    doors: [DoorState; 4],
}

impl Room {
    /// Create a room with all four sides walled
    pub fn new(position: Cell, room_type: RoomType) -> Self {
        Self {
            room_type,
            position,
            doors: [DoorState::Wall; 4],
        }
    }

    pub fn door(&self, dir: Direction) -> DoorState {
        self.doors[dir.index()]
    }

    /// Iterate `(direction, state)` pairs in door-table order
    pub fn doors(&self) -> impl Iterator<Item = (Direction, DoorState)> + '_ {
        Direction::ALL.into_iter().map(|dir| (dir, self.door(dir)))
    }

    pub(crate) fn set_door(&mut self, dir: Direction, state: DoorState) {
        self.doors[dir.index()] = state;
    }

    /// Number of sides a player can currently walk through
    pub fn open_sides(&self) -> usize {
        self.doors.iter().filter(|d| d.is_passable()).count()
    }
}
