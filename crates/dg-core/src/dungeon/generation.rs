//! Layout generation pipeline
//!
//! walk -> type assignment -> door resolution, with one RNG threaded through
//! every stage.

use super::assign::assign_room_types;
use super::layout::DungeonLayout;
use super::room::RoomType;
use super::walk::random_walk;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::rng::DungeonRng;

/// Generate a layout, seeding from `config.seed` or from entropy
pub fn generate(config: &GeneratorConfig) -> Result<DungeonLayout, GenerationError> {
    let mut rng = match config.seed {
        Some(seed) => DungeonRng::new(seed),
        None => DungeonRng::from_entropy(),
    };
    generate_with_rng(config, &mut rng)
}

/// Generate a layout from an explicit random source
///
/// `config.seed` is ignored; the layout records `rng.seed()`.
pub fn generate_with_rng(
    config: &GeneratorConfig,
    rng: &mut DungeonRng,
) -> Result<DungeonLayout, GenerationError> {
    config.validate()?;

    let start = config.clamped_start();
    let max_rooms = config.max_rooms as usize;
    let visited = random_walk(
        start,
        config.grid_width,
        config.grid_height,
        max_rooms,
        &config.walk,
        rng,
    );

    if visited.len() < 2 {
        return Err(GenerationError::TooFewRooms {
            produced: visited.len(),
        });
    }
    if visited.len() < max_rooms {
        log::warn!(
            "Generated {} unique rooms out of {} requested",
            visited.len(),
            max_rooms
        );
    }

    let types = assign_room_types(
        &visited,
        start,
        &config.ratios,
        config.gate_placement,
        rng,
    );

    let layout = DungeonLayout::build(
        config.grid_width,
        config.grid_height,
        rng.seed(),
        max_rooms,
        config.room_size,
        config.placement,
        visited.into_iter().zip(types),
    );
    layout.validate()?;

    log::info!(
        "Room distribution ({} total): {}",
        layout.len(),
        RoomType::ALL
            .iter()
            .map(|&t| format!("{}={}", t, layout.count(t)))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::dungeon::{Cell, DoorState};

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_default_scenario() {
        let layout = generate(&seeded(1234)).unwrap();
        assert!((2..=40).contains(&layout.len()));
        assert_eq!(layout.count(RoomType::Spawn), 1);
        assert_eq!(layout.count(RoomType::Gate), 1);
        assert_eq!(layout.count(RoomType::Key), layout.count(RoomType::Locked));
        assert_eq!(layout.seed(), 1234);
        assert_eq!(layout.spawn().map(|r| r.position), Some(Cell::new(12, 12)));
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let config = GeneratorConfig {
            grid_width: 0,
            ..seeded(1)
        };
        assert_eq!(
            generate(&config).err(),
            Some(GenerationError::Config(ConfigError::InvalidGrid {
                width: 0,
                height: 25
            }))
        );
    }

    #[test]
    fn test_generate_single_cell_grid_fails() {
        let config = GeneratorConfig {
            grid_width: 1,
            grid_height: 1,
            ..seeded(1)
        };
        assert_eq!(
            generate(&config).err(),
            Some(GenerationError::TooFewRooms { produced: 1 })
        );
    }

    #[test]
    fn test_generate_two_rooms() {
        for seed in 0..20 {
            let config = GeneratorConfig {
                max_rooms: 2,
                ..seeded(seed)
            };
            let layout = generate(&config).unwrap();
            assert_eq!(layout.len(), 2);
            let spawn = layout.spawn().unwrap();
            let gate = layout.gate().unwrap();
            // The walk's second cell is always next to the first
            assert_eq!(spawn.position.distance_sq(gate.position), 1);
            assert_eq!(spawn.open_sides(), 1);
            assert!(
                gate.doors()
                    .all(|(_, d)| d == DoorState::Wall || d == DoorState::Open)
            );
        }
    }

    #[test]
    fn test_generate_with_rng_records_rng_seed() {
        let mut rng = DungeonRng::new(55);
        let layout = generate_with_rng(&seeded(1), &mut rng).unwrap();
        assert_eq!(layout.seed(), 55);
    }
}
