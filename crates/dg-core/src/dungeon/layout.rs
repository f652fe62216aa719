//! The finished dungeon layout
//!
//! `DungeonLayout` is the only artifact handed to collaborators (room
//! instantiation, spawners, minimap). It is read-only apart from `unlock`.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::cell::{Cell, Direction};
use super::doors::{resolve_doors, resolve_room};
use super::room::{DoorState, Room, RoomType};
use crate::config::Placement;
use crate::error::{InvariantViolation, UnlockError};

/// World-space position of a room on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

/// Grid of typed rooms with consistent door states
#[derive(Debug, Clone)]
pub struct DungeonLayout {
    grid_width: i32,
    grid_height: i32,
    seed: u64,
    requested_rooms: usize,
    room_size: f32,
    placement: Placement,
    /// Locked rooms opened through `unlock`; each still has its Key
    unlocked: usize,
    /// Walk order
    rooms: Vec<Room>,
    index: HashMap<Cell, usize>,
}

/// Serializable copy of a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub seed: u64,
    pub grid_width: i32,
    pub grid_height: i32,
    pub requested_rooms: usize,
    pub room_size: f32,
    pub placement: Placement,
    #[serde(default)]
    pub unlocked: usize,
    pub rooms: Vec<Room>,
}

impl DungeonLayout {
    /// Build a layout from typed cells in walk order and resolve its doors
    pub(crate) fn build(
        grid_width: i32,
        grid_height: i32,
        seed: u64,
        requested_rooms: usize,
        room_size: f32,
        placement: Placement,
        cells: impl IntoIterator<Item = (Cell, RoomType)>,
    ) -> Self {
        let rooms: Vec<Room> = cells
            .into_iter()
            .map(|(cell, room_type)| Room::new(cell, room_type))
            .collect();
        let mut layout = Self {
            grid_width,
            grid_height,
            seed,
            requested_rooms,
            room_size,
            placement,
            unlocked: 0,
            index: index_rooms(&rooms),
            rooms,
        };
        resolve_doors(&mut layout.rooms, &layout.index);
        layout
    }

    /// Rebuild a layout from a snapshot, rejecting inconsistent data
    pub fn from_snapshot(snapshot: LayoutSnapshot) -> Result<Self, InvariantViolation> {
        let layout = Self {
            grid_width: snapshot.grid_width,
            grid_height: snapshot.grid_height,
            seed: snapshot.seed,
            requested_rooms: snapshot.requested_rooms,
            room_size: snapshot.room_size,
            placement: snapshot.placement,
            unlocked: snapshot.unlocked,
            index: index_rooms(&snapshot.rooms),
            rooms: snapshot.rooms,
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            seed: self.seed,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            requested_rooms: self.requested_rooms,
            room_size: self.room_size,
            placement: self.placement,
            unlocked: self.unlocked,
            rooms: self.rooms.clone(),
        }
    }

    /// Seed that reproduces this layout
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid_size(&self) -> (i32, i32) {
        (self.grid_width, self.grid_height)
    }

    /// Room count the walk was asked for
    pub fn requested_rooms(&self) -> usize {
        self.requested_rooms
    }

    /// True when the walk ran out of attempts before reaching the target
    pub fn is_under_generated(&self) -> bool {
        self.rooms.len() < self.requested_rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Locked rooms opened so far
    pub fn unlocked_rooms(&self) -> usize {
        self.unlocked
    }

    /// Rooms in walk order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Visited cells in walk order
    pub fn visit_order(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rooms.iter().map(|room| room.position)
    }

    pub fn room_at(&self, cell: Cell) -> Option<&Room> {
        self.index.get(&cell).map(|&i| &self.rooms[i])
    }

    /// Door state on side `dir` of the room at `cell`
    pub fn door(&self, cell: Cell, dir: Direction) -> Option<DoorState> {
        self.room_at(cell).map(|room| room.door(dir))
    }

    /// Rooms of one type, in walk order
    pub fn rooms_of(&self, room_type: RoomType) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(move |room| room.room_type == room_type)
    }

    pub fn count(&self, room_type: RoomType) -> usize {
        self.rooms_of(room_type).count()
    }

    pub fn spawn(&self) -> Option<&Room> {
        self.rooms_of(RoomType::Spawn).next()
    }

    pub fn gate(&self) -> Option<&Room> {
        self.rooms_of(RoomType::Gate).next()
    }

    /// Existing rooms sharing a side with `cell`
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Direction, &Room)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.room_at(cell.step(dir)).map(|room| (dir, room)))
    }

    /// World-space position of a cell for room instantiation
    pub fn world_position(&self, cell: Cell) -> WorldPos {
        let (x, y) = match self.placement {
            Placement::Corner => (cell.x, cell.y),
            Placement::Centered => (cell.x - self.grid_width / 2, cell.y - self.grid_height / 2),
        };
        WorldPos {
            x: x as f32 * self.room_size,
            z: y as f32 * self.room_size,
        }
    }

    /// Unlock the Locked room at `cell`
    ///
    /// The room becomes Empty and its shared doors are recomputed on both
    /// sides: Open, unless the neighbor is itself still Locked. Returns how
    /// many of its sides became passable.
    pub fn unlock(&mut self, cell: Cell) -> Result<usize, UnlockError> {
        let &i = self.index.get(&cell).ok_or(UnlockError::NoRoom(cell))?;
        let room_type = self.rooms[i].room_type;
        if room_type != RoomType::Locked {
            return Err(UnlockError::NotLocked { cell, room_type });
        }

        self.rooms[i].room_type = RoomType::Empty;
        self.unlocked += 1;
        resolve_room(&mut self.rooms, &self.index, i);
        Ok(self.rooms[i].open_sides())
    }

    /// Check every structural guarantee of a finished layout
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(self.rooms.len());
        for room in &self.rooms {
            if !seen.insert(room.position) {
                return Err(InvariantViolation::DuplicateCell(room.position));
            }
            if !room.position.in_bounds(self.grid_width, self.grid_height) {
                return Err(InvariantViolation::OutOfBounds(room.position));
            }
        }

        for room_type in [RoomType::Spawn, RoomType::Gate] {
            let found = self.count(room_type);
            if found != 1 {
                return Err(InvariantViolation::UniqueRoomCount { room_type, found });
            }
        }

        let keys = self.count(RoomType::Key);
        let locked = self.count(RoomType::Locked);
        if keys != locked + self.unlocked {
            return Err(InvariantViolation::UnpairedKeys {
                keys,
                locked,
                unlocked: self.unlocked,
            });
        }

        for room in &self.rooms {
            let cell = room.position;
            for (dir, here) in room.doors() {
                match self.room_at(cell.step(dir)) {
                    None if here != DoorState::Wall => {
                        return Err(InvariantViolation::DoorWithoutNeighbor {
                            cell,
                            dir,
                            state: here,
                        });
                    }
                    None => {}
                    Some(other) => {
                        let there = other.door(dir.opposite());
                        if here != there {
                            return Err(InvariantViolation::AsymmetricDoor {
                                cell,
                                dir,
                                here,
                                there,
                            });
                        }
                        let touches_locked = room.room_type == RoomType::Locked
                            || other.room_type == RoomType::Locked;
                        if touches_locked && here != DoorState::Locked {
                            return Err(InvariantViolation::UnlockedBoundary {
                                cell,
                                dir,
                                state: here,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

fn index_rooms(rooms: &[Room]) -> HashMap<Cell, usize> {
    rooms
        .iter()
        .enumerate()
        .map(|(i, room)| (room.position, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Spawn - Locked - Gate in a row, with a Key above the spawn
    fn sample() -> DungeonLayout {
        DungeonLayout::build(
            5,
            5,
            7,
            4,
            10.0,
            Placement::Corner,
            [
                (Cell::new(0, 0), RoomType::Spawn),
                (Cell::new(1, 0), RoomType::Locked),
                (Cell::new(2, 0), RoomType::Gate),
                (Cell::new(0, 1), RoomType::Key),
            ],
        )
    }

    #[test]
    fn test_build_resolves_doors() {
        let layout = sample();
        assert_eq!(layout.validate(), Ok(()));
        let spawn = Cell::new(0, 0);
        assert_eq!(layout.door(spawn, Direction::Right), Some(DoorState::Locked));
        assert_eq!(layout.door(spawn, Direction::Up), Some(DoorState::Open));
        assert_eq!(layout.door(spawn, Direction::Left), Some(DoorState::Wall));
        assert_eq!(layout.door(Cell::new(4, 4), Direction::Up), None);
    }

    #[test]
    fn test_read_api() {
        let layout = sample();
        assert_eq!(layout.len(), 4);
        assert!(!layout.is_under_generated());
        assert_eq!(layout.spawn().map(|r| r.position), Some(Cell::new(0, 0)));
        assert_eq!(layout.gate().map(|r| r.position), Some(Cell::new(2, 0)));
        assert_eq!(layout.count(RoomType::Key), 1);
        let order: Vec<_> = layout.visit_order().collect();
        assert_eq!(order[1], Cell::new(1, 0));
        let neighbors: Vec<_> = layout.neighbors(Cell::new(0, 0)).map(|(d, _)| d).collect();
        assert_eq!(neighbors, vec![Direction::Up, Direction::Right]);
    }

    #[test]
    fn test_unlock_opens_shared_doors() {
        let mut layout = sample();
        let locked = Cell::new(1, 0);
        assert_eq!(layout.unlock(locked), Ok(2));
        assert_eq!(layout.room_at(locked).map(|r| r.room_type), Some(RoomType::Empty));
        assert_eq!(layout.door(locked, Direction::Left), Some(DoorState::Open));
        assert_eq!(layout.door(locked, Direction::Right), Some(DoorState::Open));
        assert_eq!(
            layout.door(Cell::new(0, 0), Direction::Right),
            Some(DoorState::Open)
        );
        assert_eq!(
            layout.door(Cell::new(2, 0), Direction::Left),
            Some(DoorState::Open)
        );
        assert_eq!(layout.unlocked_rooms(), 1);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn test_unpaired_keys_detected() {
        let mut layout = sample();
        layout.rooms[1].room_type = RoomType::Empty;
        resolve_doors(&mut layout.rooms, &layout.index);
        assert_eq!(
            layout.validate(),
            Err(InvariantViolation::UnpairedKeys {
                keys: 1,
                locked: 0,
                unlocked: 0
            })
        );
    }

    #[test]
    fn test_snapshot_after_unlock_reloads() {
        let mut layout = sample();
        layout.unlock(Cell::new(1, 0)).unwrap();
        let json = serde_json::to_string(&layout.snapshot()).unwrap();
        let parsed: LayoutSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.unlocked, 1);
        let rebuilt = DungeonLayout::from_snapshot(parsed).unwrap();
        assert_eq!(rebuilt.rooms(), layout.rooms());
        assert_eq!(rebuilt.unlocked_rooms(), 1);
    }

    #[test]
    fn test_unlock_keeps_door_to_other_locked_room() {
        let mut layout = DungeonLayout::build(
            4,
            1,
            1,
            4,
            10.0,
            Placement::Corner,
            [
                (Cell::new(0, 0), RoomType::Spawn),
                (Cell::new(1, 0), RoomType::Locked),
                (Cell::new(2, 0), RoomType::Locked),
                (Cell::new(3, 0), RoomType::Gate),
            ],
        );
        assert_eq!(layout.unlock(Cell::new(1, 0)), Ok(1));
        assert_eq!(
            layout.door(Cell::new(1, 0), Direction::Right),
            Some(DoorState::Locked)
        );
        assert_eq!(
            layout.door(Cell::new(2, 0), Direction::Left),
            Some(DoorState::Locked)
        );
    }

    #[test]
    fn test_unlock_errors() {
        let mut layout = sample();
        assert_eq!(
            layout.unlock(Cell::new(3, 3)),
            Err(UnlockError::NoRoom(Cell::new(3, 3)))
        );
        assert_eq!(
            layout.unlock(Cell::new(0, 0)),
            Err(UnlockError::NotLocked {
                cell: Cell::new(0, 0),
                room_type: RoomType::Spawn
            })
        );
    }

    #[test]
    fn test_validate_detects_asymmetric_door() {
        let mut layout = sample();
        layout.rooms[0].set_door(Direction::Up, DoorState::Wall);
        assert!(matches!(
            layout.validate(),
            Err(InvariantViolation::AsymmetricDoor { .. })
        ));
    }

    #[test]
    fn test_validate_detects_door_into_nothing() {
        let mut layout = sample();
        layout.rooms[2].set_door(Direction::Right, DoorState::Open);
        assert!(matches!(
            layout.validate(),
            Err(InvariantViolation::DoorWithoutNeighbor { .. })
        ));
    }

    #[test]
    fn test_validate_detects_unlocked_boundary() {
        let mut layout = sample();
        layout.rooms[0].set_door(Direction::Right, DoorState::Open);
        layout.rooms[1].set_door(Direction::Left, DoorState::Open);
        assert!(matches!(
            layout.validate(),
            Err(InvariantViolation::UnlockedBoundary { .. })
        ));
    }

    #[test]
    fn test_validate_detects_counts() {
        let mut layout = sample();
        layout.rooms[2].room_type = RoomType::Loot;
        assert_eq!(
            layout.validate(),
            Err(InvariantViolation::UniqueRoomCount {
                room_type: RoomType::Gate,
                found: 0
            })
        );
    }

    #[test]
    fn test_world_position() {
        let mut layout = sample();
        assert_eq!(
            layout.world_position(Cell::new(2, 1)),
            WorldPos { x: 20.0, z: 10.0 }
        );
        layout.placement = Placement::Centered;
        assert_eq!(
            layout.world_position(Cell::new(2, 1)),
            WorldPos { x: 0.0, z: -10.0 }
        );
    }

    #[test]
    fn test_snapshot_rejects_duplicates() {
        let mut snapshot = sample().snapshot();
        let copy = snapshot.rooms[3].clone();
        snapshot.rooms.push(copy);
        assert_eq!(
            DungeonLayout::from_snapshot(snapshot).err(),
            Some(InvariantViolation::DuplicateCell(Cell::new(0, 1)))
        );
    }

    #[test]
    fn test_snapshot_json() {
        let layout = sample();
        let json = serde_json::to_string(&layout.snapshot()).unwrap();
        let parsed: LayoutSnapshot = serde_json::from_str(&json).unwrap();
        let rebuilt = DungeonLayout::from_snapshot(parsed).unwrap();
        assert_eq!(rebuilt.rooms(), layout.rooms());
        assert_eq!(rebuilt.seed(), 7);
    }
}
