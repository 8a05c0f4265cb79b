//! Four-way neighbor linking over a finished grid.
//!
//! Produces the flat list of occupied cells in row-major order (`y` outer,
//! `x` inner) with each cell's neighbor slots resolved to indices into
//! that same list. Consumers rely on the order being stable, so it is
//! fixed here and nowhere else.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::{Grid, GridPos};

/// One occupied cell with its four resolved neighbor slots.
///
/// Neighbor slots hold indices into the list returned by [`build_links`];
/// `None` means the neighbor position is off-grid or unoccupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCell {
    pub position: GridPos,
    pub mask: u8,
    /// Display name at link time (anchor name or decimal mask).
    pub name: String,
    /// Content key: the mask as a 4-character Left-Up-Right-Down string.
    pub lurd: String,
    neighbors: [Option<usize>; 4],
}

impl LinkedCell {
    /// Index of the neighbor in the given direction, if one exists.
    pub fn neighbor_at(&self, direction: Direction) -> Option<usize> {
        self.neighbors[direction.index()]
    }
}

/// Collect every occupied cell and wire up its neighbor slots.
///
/// A cell is occupied when its mask is non-zero or it is an anchor: a
/// named room exists even before any corridor reaches it. Cells with an
/// all-zero mask and no name mean "no room here" and are skipped, both as
/// entries and as neighbors.
pub fn build_links(grid: &Grid) -> Vec<LinkedCell> {
    let mut slot_of: HashMap<GridPos, usize> = HashMap::new();
    let mut linked = Vec::new();

    for cell in grid.cells() {
        if cell.is_empty() {
            continue;
        }
        slot_of.insert(cell.position(), linked.len());
        linked.push(LinkedCell {
            position: cell.position(),
            mask: cell.mask(),
            name: cell.display_name(),
            lurd: cell.lurd_string(),
            neighbors: [None; 4],
        });
    }

    for i in 0..linked.len() {
        for direction in Direction::ALL {
            let neighbor_pos = linked[i].position.offset_by(direction);
            // Absent from the map means off-grid or unoccupied; either way
            // the slot stays None rather than being an error.
            linked[i].neighbors[direction.index()] = slot_of.get(&neighbor_pos).copied();
        }
    }

    linked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve::connect;
    use crate::generate::{create_grid, Seed};
    use crate::region::RegionSpec;

    #[test]
    fn test_untouched_grid_yields_no_links() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(build_links(&grid).is_empty());
    }

    #[test]
    fn test_corridor_cells_link_both_ways() {
        let mut grid = Grid::new(4, 1).unwrap();
        connect(&mut grid, GridPos::new(0, 0), GridPos::new(3, 0)).unwrap();
        let linked = build_links(&grid);
        assert_eq!(linked.len(), 4);
        for i in 0..4 {
            let right = linked[i].neighbor_at(Direction::Right);
            let left = linked[i].neighbor_at(Direction::Left);
            assert_eq!(right, if i < 3 { Some(i + 1) } else { None });
            assert_eq!(left, if i > 0 { Some(i - 1) } else { None });
            assert_eq!(linked[i].neighbor_at(Direction::Up), None);
            assert_eq!(linked[i].neighbor_at(Direction::Down), None);
        }
    }

    #[test]
    fn test_row_major_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        connect(&mut grid, GridPos::new(0, 0), GridPos::new(2, 2)).unwrap();
        let linked = build_links(&grid);
        let positions: Vec<GridPos> = linked.iter().map(|c| c.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_by_key(|p| (p.y, p.x));
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_order_stable_across_calls() {
        let specs = vec![RegionSpec::at("A", 0, 0), RegionSpec::at("B", 4, 4)];
        let (mut grid, anchors) = create_grid(5, 5, &specs, Seed::Fixed(11)).unwrap();
        connect(&mut grid, anchors[0], anchors[1]).unwrap();
        assert_eq!(build_links(&grid), build_links(&grid));
    }

    #[test]
    fn test_unoccupied_neighbor_is_none() {
        let mut grid = Grid::new(3, 3).unwrap();
        connect(&mut grid, GridPos::new(0, 0), GridPos::new(2, 0)).unwrap();
        let linked = build_links(&grid);
        // Row y=1 is untouched, so nothing links downward.
        assert!(linked.iter().all(|c| c.neighbor_at(Direction::Down).is_none()));
    }

    #[test]
    fn test_unconnected_anchor_is_included() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place_anchor(GridPos::new(1, 1), "vault").unwrap();
        let linked = build_links(&grid);
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].name, "vault");
        assert_eq!(linked[0].mask, 0);
        assert_eq!(linked[0].lurd, "0000");
    }

    #[test]
    fn test_content_keys_carried() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.place_anchor(GridPos::new(0, 0), "entry").unwrap();
        connect(&mut grid, GridPos::new(0, 0), GridPos::new(1, 0)).unwrap();
        let linked = build_links(&grid);
        assert_eq!(linked[0].name, "entry");
        assert_eq!(linked[0].lurd, "0010");
        assert_eq!(linked[1].name, "8");
        assert_eq!(linked[1].lurd, "1000");
    }
}
