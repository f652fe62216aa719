//! Random walk that picks which grid cells become rooms

use hashbrown::HashSet;

use super::cell::{Cell, Direction};
use crate::config::WalkParams;
use crate::rng::DungeonRng;

/// Walk the grid from `start` and return the visited cells in order
///
/// The result starts with the (clamped) start cell, never repeats a cell,
/// and holds at most `max_rooms` entries. When the attempt budget of
/// `max_rooms * attempt_factor` steps runs out first, whatever was collected
/// is returned; callers decide whether that is enough.
///
/// Grid dimensions must be positive.
pub fn random_walk(
    start: Cell,
    width: i32,
    height: i32,
    max_rooms: usize,
    params: &WalkParams,
    rng: &mut DungeonRng,
) -> Vec<Cell> {
    // A full grid ends the walk
    let cell_count = width.max(0) as usize * height.max(0) as usize;
    let target = max_rooms.min(cell_count);

    let mut pos = start.clamped(width, height);
    let mut occupied = HashSet::with_capacity(target);
    let mut visit_order = Vec::with_capacity(target);
    occupied.insert(pos);
    visit_order.push(pos);

    let budget = max_rooms.saturating_mul(params.attempt_factor as usize);
    let mut attempts = 0;
    let mut stuck = 0;

    while visit_order.len() < target && attempts < budget {
        let next = pos.step(Direction::from_index(rng.rn2(4)));

        if next.in_bounds(width, height) {
            if occupied.insert(next) {
                visit_order.push(next);
                pos = next;
                stuck = 0;
            } else if rng.percent(params.revisit_percent) {
                // Pass through visited territory without recording it
                pos = next;
            } else {
                stuck += 1;
            }
        } else {
            stuck += 1;
        }

        if stuck > params.stuck_threshold && visit_order.len() > 1 {
            if let Some(&jump) = rng.choose(&visit_order) {
                pos = jump;
            }
            stuck = 0;
        }

        attempts += 1;
    }

    visit_order
}
