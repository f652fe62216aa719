//! Room type assignment
//!
//! Turns the walk's visit order into one `RoomType` per cell:
//! - Spawn goes to the cell nearest the start, Gate to the cell furthest
//!   from Spawn
//! - key/locked pairs, traps, empties and loot are drawn from a shuffled
//!   pool in that order, up to percentage-derived quotas
//! - anything left over becomes Loot

use super::cell::{Cell, Direction};
use super::room::RoomType;
use crate::config::{GatePlacement, RoomRatios};
use crate::rng::DungeonRng;

/// Target counts for the pooled room types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomQuota {
    pub key_locked_pairs: usize,
    pub trap: usize,
    pub empty: usize,
    pub loot: usize,
}

impl RoomQuota {
    /// Quotas for `n` rooms, scaled down when they exceed the `n - 2` rooms
    /// left after Spawn and Gate
    pub fn compute(n: usize, ratios: &RoomRatios) -> Self {
        let n_wide = n as u64;
        let pct = |p: i32| p.max(0) as u64;

        let mut quota = Self {
            key_locked_pairs: round_ratio(pct(ratios.key_locked_pair) * n_wide, 200) as usize,
            trap: round_ratio(pct(ratios.trap) * n_wide, 100) as usize,
            empty: round_ratio(pct(ratios.empty) * n_wide, 100) as usize,
            loot: round_ratio(pct(ratios.loot) * n_wide, 100) as usize,
        };

        let remaining = n.saturating_sub(2);
        let requested = quota.rooms();
        if requested > remaining {
            let requested_pairs = quota.key_locked_pairs;
            let scale = |count: usize| count * remaining / requested;
            quota = Self {
                key_locked_pairs: scale(quota.key_locked_pairs),
                trap: scale(quota.trap),
                empty: scale(quota.empty),
                loot: scale(quota.loot),
            };
            if requested_pairs > 0 && quota.key_locked_pairs == 0 && remaining >= 2 {
                quota.key_locked_pairs = 1;
            }
            log::debug!(
                "Room quotas scaled down: {} requested, {} available -> {:?}",
                requested,
                remaining,
                quota
            );
        }

        quota
    }

    /// Rooms consumed if every quota is met
    pub fn rooms(&self) -> usize {
        self.key_locked_pairs * 2 + self.trap + self.empty + self.loot
    }
}

/// `num / den` rounded to the nearest integer, ties to even
pub fn round_ratio(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    let quotient = num / den;
    let remainder = num % den;
    match (remainder * 2).cmp(&den) {
        core::cmp::Ordering::Less => quotient,
        core::cmp::Ordering::Greater => quotient + 1,
        core::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}

/// Index of the cell closest to `start` (first wins ties)
fn nearest_index(visited: &[Cell], start: Cell) -> usize {
    let mut best = 0;
    for (i, cell) in visited.iter().enumerate() {
        if cell.distance_sq(start) < visited[best].distance_sq(start) {
            best = i;
        }
    }
    best
}

/// Index of the gate room; never `spawn` when another room exists
fn gate_index(
    visited: &[Cell],
    spawn: usize,
    placement: GatePlacement,
    rng: &mut DungeonRng,
) -> Option<usize> {
    let origin = visited[spawn];
    let axis = match placement {
        GatePlacement::FurthestEuclidean => None,
        GatePlacement::FurthestCardinal => Some(Direction::from_index(rng.rn2(4)).delta()),
    };
    let score = |cell: Cell| match axis {
        None => cell.distance_sq(origin),
        Some((dx, dy)) => {
            (cell.x - origin.x) as i64 * dx as i64 + (cell.y - origin.y) as i64 * dy as i64
        }
    };

    let mut best: Option<(usize, i64)> = None;
    for (i, cell) in visited.iter().enumerate() {
        if i == spawn {
            continue;
        }
        let value = score(*cell);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

/// Assign a room type to every visited cell
///
/// The result is indexed like `visited`. With two or more cells it holds
/// exactly one Spawn, exactly one Gate, and equally many Key and Locked rooms.
pub fn assign_room_types(
    visited: &[Cell],
    start: Cell,
    ratios: &RoomRatios,
    gate_placement: GatePlacement,
    rng: &mut DungeonRng,
) -> Vec<RoomType> {
    let n = visited.len();
    let mut types = vec![RoomType::Loot; n];
    if n == 0 {
        return types;
    }

    let spawn = nearest_index(visited, start);
    types[spawn] = RoomType::Spawn;

    let Some(gate) = gate_index(visited, spawn, gate_placement, rng) else {
        return types;
    };
    types[gate] = RoomType::Gate;

    let quota = RoomQuota::compute(n, ratios);

    let mut pool: Vec<usize> = (0..n).filter(|&i| i != spawn && i != gate).collect();
    rng.shuffle(&mut pool);
    let mut pool = pool.into_iter();

    for _ in 0..quota.key_locked_pairs {
        if pool.len() < 2 {
            break;
        }
        if let (Some(key), Some(locked)) = (pool.next(), pool.next()) {
            types[key] = RoomType::Key;
            types[locked] = RoomType::Locked;
        }
    }

    for (room_type, count) in [
        (RoomType::Trap, quota.trap),
        (RoomType::Empty, quota.empty),
        (RoomType::Loot, quota.loot),
    ] {
        for idx in pool.by_ref().take(count) {
            types[idx] = room_type;
        }
    }

    // Whatever the pool still holds keeps the Loot default

    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(types: &[RoomType], room_type: RoomType) -> usize {
        types.iter().filter(|&&t| t == room_type).count()
    }

    fn line(n: i32) -> Vec<Cell> {
        (0..n).map(|x| Cell::new(x, 0)).collect()
    }

    #[test]
    fn test_round_ratio_ties_to_even() {
        assert_eq!(round_ratio(5, 2), 2);
        assert_eq!(round_ratio(7, 2), 4);
        assert_eq!(round_ratio(32, 10), 3);
        assert_eq!(round_ratio(128, 10), 13);
        assert_eq!(round_ratio(3, 0), 0);
    }

    #[test]
    fn test_quota_default_ratios_forty_rooms() {
        let quota = RoomQuota::compute(40, &RoomRatios::default());
        assert_eq!(
            quota,
            RoomQuota {
                key_locked_pairs: 3,
                trap: 3,
                empty: 13,
                loot: 16,
            }
        );
        assert!(quota.rooms() <= 38);
    }

    #[test]
    fn test_quota_scale_down() {
        let ratios = RoomRatios {
            empty: 100,
            loot: 100,
            trap: 100,
            key_locked_pair: 100,
        };
        let quota = RoomQuota::compute(10, &ratios);
        assert_eq!(
            quota,
            RoomQuota {
                key_locked_pairs: 1,
                trap: 2,
                empty: 2,
                loot: 2,
            }
        );
        assert!(quota.rooms() <= 8);
    }

    #[test]
    fn test_quota_keeps_one_pair_when_requested() {
        let ratios = RoomRatios {
            empty: 0,
            loot: 0,
            trap: 100,
            key_locked_pair: 50,
        };
        let quota = RoomQuota::compute(4, &ratios);
        assert_eq!(quota.key_locked_pairs, 1);
        assert_eq!(quota.trap, 1);
    }

    #[test]
    fn test_quota_two_rooms_is_empty() {
        let quota = RoomQuota::compute(2, &RoomRatios::default());
        assert_eq!(quota, RoomQuota::default());
    }

    #[test]
    fn test_spawn_nearest_start_gate_furthest() {
        let cells = line(6);
        let mut rng = DungeonRng::new(1);
        let types = assign_room_types(
            &cells,
            Cell::new(1, 0),
            &RoomRatios::default(),
            GatePlacement::FurthestEuclidean,
            &mut rng,
        );
        assert_eq!(types[1], RoomType::Spawn);
        assert_eq!(types[5], RoomType::Gate);
    }

    #[test]
    fn test_spawn_tie_breaks_on_visit_order() {
        let cells = vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)];
        let mut rng = DungeonRng::new(1);
        let types = assign_room_types(
            &cells,
            Cell::new(0, 0),
            &RoomRatios::default(),
            GatePlacement::FurthestEuclidean,
            &mut rng,
        );
        assert_eq!(types[0], RoomType::Spawn);
        // Seen from spawn at (0,1), (1,0) is further than (1,1)
        assert_eq!(types[1], RoomType::Gate);
    }

    #[test]
    fn test_cardinal_gate_never_spawn() {
        for seed in 0..20 {
            let cells = line(5);
            let mut rng = DungeonRng::new(seed);
            let types = assign_room_types(
                &cells,
                Cell::new(0, 0),
                &RoomRatios::default(),
                GatePlacement::FurthestCardinal,
                &mut rng,
            );
            assert_eq!(count(&types, RoomType::Spawn), 1);
            assert_eq!(count(&types, RoomType::Gate), 1);
            assert_eq!(types[0], RoomType::Spawn);
        }
    }

    #[test]
    fn test_two_rooms_only_spawn_and_gate() {
        let mut rng = DungeonRng::new(9);
        let types = assign_room_types(
            &line(2),
            Cell::new(0, 0),
            &RoomRatios::default(),
            GatePlacement::FurthestEuclidean,
            &mut rng,
        );
        assert_eq!(types, vec![RoomType::Spawn, RoomType::Gate]);
    }

    #[test]
    fn test_pairs_balanced_and_zero_when_disabled() {
        for n in 2..60 {
            let cells = line(n);
            let mut rng = DungeonRng::new(n as u64);
            let types = assign_room_types(
                &cells,
                Cell::new(0, 0),
                &RoomRatios::default(),
                GatePlacement::FurthestEuclidean,
                &mut rng,
            );
            assert_eq!(count(&types, RoomType::Key), count(&types, RoomType::Locked));

            let ratios = RoomRatios {
                key_locked_pair: 0,
                ..Default::default()
            };
            let types = assign_room_types(
                &cells,
                Cell::new(0, 0),
                &ratios,
                GatePlacement::FurthestEuclidean,
                &mut rng,
            );
            assert_eq!(count(&types, RoomType::Key), 0);
            assert_eq!(count(&types, RoomType::Locked), 0);
        }
    }

    #[test]
    fn test_distribution_forty_rooms() {
        let mut rng = DungeonRng::new(1234);
        let types = assign_room_types(
            &line(40),
            Cell::new(0, 0),
            &RoomRatios::default(),
            GatePlacement::FurthestEuclidean,
            &mut rng,
        );
        assert_eq!(count(&types, RoomType::Key), 3);
        assert_eq!(count(&types, RoomType::Locked), 3);
        assert_eq!(count(&types, RoomType::Trap), 3);
        assert_eq!(count(&types, RoomType::Empty), 13);
        assert_eq!(count(&types, RoomType::Loot), 16);
    }

    #[test]
    fn test_single_cell() {
        let mut rng = DungeonRng::new(1);
        let types = assign_room_types(
            &line(1),
            Cell::new(0, 0),
            &RoomRatios::default(),
            GatePlacement::FurthestEuclidean,
            &mut rng,
        );
        assert_eq!(types, vec![RoomType::Spawn]);
        assert!(
            assign_room_types(
                &[],
                Cell::new(0, 0),
                &RoomRatios::default(),
                GatePlacement::FurthestEuclidean,
                &mut rng
            )
            .is_empty()
        );
    }
}
