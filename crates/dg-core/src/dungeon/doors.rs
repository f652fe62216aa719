//! Door resolution between grid-adjacent rooms

use hashbrown::HashMap;

use super::cell::{Cell, Direction};
use super::room::{DoorState, Room};

/// Set the door state of every side of every room from its neighbors
///
/// Missing neighbors give `Wall`. A shared boundary is `Locked` when either
/// room is Locked and `Open` otherwise, and both sides are written together.
/// The write only depends on the two room types, so running this again on
/// unchanged rooms leaves every door as it was.
///
/// Index entries that point past `rooms` count as missing neighbors.
pub fn resolve_doors(rooms: &mut [Room], index: &HashMap<Cell, usize>) {
    for i in 0..rooms.len() {
        resolve_room(rooms, index, i);
    }
}

/// Recompute only the sides of the room at `i` (and the matching sides of its
/// neighbors)
pub(crate) fn resolve_room(rooms: &mut [Room], index: &HashMap<Cell, usize>, i: usize) {
    let Some(room) = rooms.get(i) else {
        return;
    };
    let (cell, room_type) = (room.position, room.room_type);
    for dir in Direction::ALL {
        let neighbor = index
            .get(&cell.step(dir))
            .copied()
            .filter(|&j| j != i && j < rooms.len());
        match neighbor {
            None => rooms[i].set_door(dir, DoorState::Wall),
            Some(j) => {
                let state = DoorState::between(room_type, rooms[j].room_type);
                rooms[i].set_door(dir, state);
                rooms[j].set_door(dir.opposite(), state);
            }
        }
    }
}
