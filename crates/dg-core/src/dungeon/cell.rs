//! Grid cells and cardinal directions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Integer grid coordinate identifying a room slot
///
/// `y` grows upward: `Direction::Up` is `(0, 1)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `dir`
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Check whether the cell lies inside `[0,width) x [0,height)`
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }

    /// Clamp the cell into `[0,width) x [0,height)`
    ///
    /// Dimensions must be positive.
    pub fn clamped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.clamp(0, width - 1),
            y: self.y.clamp(0, height - 1),
        }
    }

    /// Squared Euclidean distance (exact, used for ordering)
    pub const fn distance_sq(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Euclidean distance
    pub fn distance(self, other: Cell) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction on the room grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// All directions, in door-table order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Get the delta (dx, dy) for this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a uniform draw in `0..4` to a direction
    pub const fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }

    /// Position of this direction in a door table
    pub const fn index(self) -> usize {
        self as usize
    }
}
