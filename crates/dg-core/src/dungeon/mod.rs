//! Dungeon system
//!
//! Contains grid cells, room types, the random walk, type assignment, door
//! resolution, and the finished layout.

mod assign;
mod cell;
mod doors;
mod generation;
mod layout;
mod room;
mod walk;

pub use assign::{assign_room_types, round_ratio, RoomQuota};
pub use cell::{Cell, Direction};
pub use doors::resolve_doors;
pub use generation::{generate, generate_with_rng};
pub use layout::{DungeonLayout, LayoutSnapshot, WorldPos};
pub use room::{DoorState, Room, RoomType};
pub use walk::random_walk;
