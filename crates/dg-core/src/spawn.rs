//! Spawn-site planning for enemy and pickup spawners
//!
//! Spawners only ever populate rooms that are neither Spawn nor Gate. This
//! module decides which rooms and how many entities each; placing them on
//! walkable geometry is left to the engine.

use serde::{Deserialize, Serialize};

use crate::dungeon::{Cell, DungeonLayout};
use crate::rng::DungeonRng;

/// How a spawner spreads its entities over the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    /// Number of distinct rooms to populate
    pub rooms_to_use: usize,
    pub min_per_room: u32,
    pub max_per_room: u32,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            rooms_to_use: 3,
            min_per_room: 2,
            max_per_room: 3,
        }
    }
}

/// One room chosen by a spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSite {
    pub cell: Cell,
    pub count: u32,
}

/// Pick up to `rules.rooms_to_use` random spawnable rooms and a count for each
///
/// Returns an empty plan when the layout has no spawnable rooms. A
/// `max_per_room` below `min_per_room` is treated as `min_per_room`.
pub fn plan_spawn_sites(
    layout: &DungeonLayout,
    rules: &SpawnRules,
    rng: &mut DungeonRng,
) -> Vec<SpawnSite> {
    let mut candidates: Vec<Cell> = layout
        .rooms()
        .iter()
        .filter(|room| room.room_type.accepts_spawns())
        .map(|room| room.position)
        .collect();

    rng.shuffle(&mut candidates);
    candidates.truncate(rules.rooms_to_use);

    candidates
        .into_iter()
        .map(|cell| SpawnSite {
            cell,
            count: rng.range_inclusive(rules.min_per_room, rules.max_per_room),
        })
        .collect()
}
