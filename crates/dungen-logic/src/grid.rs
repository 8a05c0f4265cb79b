//! Bounds-checked cell grid and connection masks.
//!
//! The grid is dense: every `(x, y)` in `[0,width) × [0,height)` holds
//! exactly one [`Cell`] from construction onward. Lookups outside that
//! range are errors, never clamped. Cells accumulate direction bits as
//! corridors are carved through them; bits are only ever OR'ed in.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::Direction;

/// Errors raised by grid construction, lookup, placement, and carving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid dimensions must both be positive.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// A position fell outside the grid extents.
    #[error("{position} is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        position: GridPos,
        width: i32,
        height: i32,
    },
    /// A region's rectangle, clipped to the grid, contains no cells.
    #[error("region '{name}' does not overlap the grid")]
    InvalidRegion { name: String },
    /// Every cell in a region's rectangle already holds an anchor.
    #[error("region '{name}' has no free cell left for an anchor")]
    RegionExhausted { name: String },
}

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one cell away in the given direction.
    pub fn offset_by(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for GridPos {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for GridPos {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One grid position with its accumulated 4-bit connection mask.
///
/// A cell is either *generated* (displays as the decimal value of its mask)
/// or an *anchor* (carries a fixed caller-supplied room name that never
/// changes, no matter how many corridors reach it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: GridPos,
    mask: u8,
    anchor: Option<String>,
}

impl Cell {
    pub(crate) fn empty(position: GridPos) -> Self {
        Self {
            position,
            mask: 0,
            anchor: None,
        }
    }

    pub(crate) fn anchor(position: GridPos, mask: u8, name: impl Into<String>) -> Self {
        Self {
            position,
            mask: mask & 0x0F,
            anchor: Some(name.into()),
        }
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    /// Current connection mask. Always fits in the low nibble.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn is_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// True when nothing has touched this cell: no corridor, no anchor.
    /// Empty cells mean "no room here" and are skipped by linking.
    pub fn is_empty(&self) -> bool {
        self.mask == 0 && self.anchor.is_none()
    }

    /// Open the given side of this cell. OR-only, so repeated calls with
    /// the same direction are no-ops.
    pub fn set_direction(&mut self, direction: Direction) {
        self.mask |= direction.bit();
    }

    pub fn has_direction(&self, direction: Direction) -> bool {
        self.mask & direction.bit() != 0
    }

    /// Display identity: the anchor name for anchor cells, the decimal
    /// string of the current mask for generated cells.
    pub fn display_name(&self) -> String {
        match &self.anchor {
            Some(name) => name.clone(),
            None => self.mask.to_string(),
        }
    }

    /// 4-character '0'/'1' string of the mask in Left-Up-Right-Down order,
    /// the key handed to content-instantiation services.
    pub fn lurd_string(&self) -> String {
        let mut s = String::with_capacity(4);
        for d in Direction::ALL {
            s.push(if self.has_direction(d) { '1' } else { '0' });
        }
        s
    }
}

/// Dense 2D grid of cells, row-major (`y` outer, `x` inner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid fully populated with empty generated cells.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::empty(GridPos::new(x, y)));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, position: GridPos) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    fn slot(&self, position: GridPos) -> Result<usize, GridError> {
        if !self.contains(position) {
            return Err(GridError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            });
        }
        Ok((position.y * self.width + position.x) as usize)
    }

    /// Bounds-checked cell lookup.
    pub fn get(&self, position: GridPos) -> Result<&Cell, GridError> {
        Ok(&self.cells[self.slot(position)?])
    }

    /// Bounds-checked mutable cell lookup.
    pub fn get_mut(&mut self, position: GridPos) -> Result<&mut Cell, GridError> {
        let slot = self.slot(position)?;
        Ok(&mut self.cells[slot])
    }

    /// Convenience lookup by raw coordinates.
    pub fn get_xy(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        self.get(GridPos::new(x, y))
    }

    /// All cells in row-major order (`y` outer, `x` inner).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Replace the cell at `position` with an anchor bearing `name`.
    pub(crate) fn place_anchor(
        &mut self,
        position: GridPos,
        name: impl Into<String>,
    ) -> Result<(), GridError> {
        let slot = self.slot(position)?;
        self.cells[slot] = Cell::anchor(position, 0, name);
        Ok(())
    }
}

impl fmt::Display for Grid {
    /// Renders each row as `[name_LURD, ...]`, with empty cells as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "[")?;
            for x in 0..self.width {
                let cell = &self.cells[(y * self.width + x) as usize];
                if cell.is_empty() {
                    write!(f, "0")?;
                } else {
                    write!(f, "{}_{}", cell.display_name(), cell.lurd_string())?;
                }
                if x != self.width - 1 {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if y != self.height - 1 {
                writeln!(f, ",")?;
            }
        }
        Ok(())
    }
}
