//! Cardinal directions and their connection-mask bits.
//!
//! A cell's connection mask packs its four sides into the low nibble in
//! Left-Up-Right-Down order. `Up` means decreasing `y`, so a grid printed
//! row by row reads top to bottom.

use serde::{Deserialize, Serialize};

/// One of the four cardinal directions a cell can open toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions in neighbor-slot order (Left, Up, Right, Down).
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Connection-mask bit for this direction.
    pub fn bit(self) -> u8 {
        match self {
            Direction::Left => 0b1000,
            Direction::Up => 0b0100,
            Direction::Right => 0b0010,
            Direction::Down => 0b0001,
        }
    }

    /// The direction a corridor enters a cell from, given the direction it
    /// was exited toward.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit grid step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// Slot index in four-way neighbor arrays (0: Left, 1: Up, 2: Right, 3: Down).
    pub fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }
}
