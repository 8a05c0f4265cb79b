//! Deterministic corridor carving.
//!
//! Walk scheme: the cursor resolves all horizontal distance before any
//! vertical distance, so one call yields a straight or L-shaped corridor.
//! Each step ORs the exit bit into the cell being left; the matching entry
//! bit lands on the next cell at the top of the following iteration, so
//! the start cell never gets an entry bit and the end cell never gets an
//! exit bit from this call.

use crate::direction::Direction;
use crate::grid::{Grid, GridError, GridPos};

/// Carve a corridor from `start` to `end`, accumulating direction bits on
/// every cell crossed.
///
/// Both endpoints are validated before any cell is touched, so a failed
/// call never leaves a half-carved corridor. Bits only accumulate, which
/// makes repeat calls idempotent and lets corridors that cross share cells
/// to form junctions. Endpoints need not be anchors; chaining calls
/// through shared positions builds branching layouts.
pub fn connect(grid: &mut Grid, start: GridPos, end: GridPos) -> Result<(), GridError> {
    grid.get(start)?;
    grid.get(end)?;

    let mut cursor = start;
    let mut entry: Option<Direction> = None;
    loop {
        if let Some(direction) = entry {
            grid.get_mut(cursor)?.set_direction(direction);
        }

        let delta = end - cursor;
        if delta.x == 0 && delta.y == 0 {
            break;
        }

        let exit = if delta.x != 0 {
            if delta.x < 0 {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if delta.y < 0 {
            Direction::Up
        } else {
            Direction::Down
        };

        grid.get_mut(cursor)?.set_direction(exit);
        entry = Some(exit.opposite());
        cursor = cursor.offset_by(exit);
    }

    Ok(())
}
