//! dg-core: Procedural dungeon layout generation
//!
//! Turns a seed and a handful of knobs into a connected grid of rooms, each
//! tagged with a gameplay role and per-side door states that agree with its
//! neighbors. Pure computation, no I/O outside config file helpers.

pub mod config;
pub mod dungeon;
pub mod error;
pub mod spawn;

mod rng;

pub use config::{ConfigError, GatePlacement, GeneratorConfig, Placement, RoomRatios, WalkParams};
pub use dungeon::{generate, generate_with_rng, DungeonLayout};
pub use error::{GenerationError, InvariantViolation, UnlockError};
pub use rng::DungeonRng;
