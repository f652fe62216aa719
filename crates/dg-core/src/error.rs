//! Error types for generation and layout mutation

use thiserror::Error;

use crate::config::ConfigError;
use crate::dungeon::{Cell, Direction, DoorState, RoomType};

/// Reasons a generation run produced no layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Walk produced {produced} room(s); spawn and gate need at least 2")]
    TooFewRooms { produced: usize },

    #[error("Internal consistency check failed: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// A broken structural guarantee of a finished layout
///
/// Generation never produces these; `DungeonLayout::validate` reports them
/// so tests and callers can detect corruption.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Cell {0} appears more than once in the visit order")]
    DuplicateCell(Cell),

    #[error("Cell {0} lies outside the grid")]
    OutOfBounds(Cell),

    #[error("Expected exactly one {room_type} room, found {found}")]
    UniqueRoomCount { room_type: RoomType, found: usize },

    #[error("{keys} key room(s) but {locked} locked and {unlocked} unlocked room(s)")]
    UnpairedKeys {
        keys: usize,
        locked: usize,
        unlocked: usize,
    },

    #[error("Door {dir} of {cell} is {here:?} but the neighbor's side is {there:?}")]
    AsymmetricDoor {
        cell: Cell,
        dir: Direction,
        here: DoorState,
        there: DoorState,
    },

    #[error("Door {dir} of {cell} has no neighbor but is {state:?}")]
    DoorWithoutNeighbor {
        cell: Cell,
        dir: Direction,
        state: DoorState,
    },

    #[error("Door {dir} of {cell} touches a locked room but is {state:?}")]
    UnlockedBoundary {
        cell: Cell,
        dir: Direction,
        state: DoorState,
    },
}

/// Errors from the unlock operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnlockError {
    #[error("No room at {0}")]
    NoRoom(Cell),

    #[error("Room at {cell} is {room_type}, not locked")]
    NotLocked { cell: Cell, room_type: RoomType },
}
