//! Rectangular placement constraints for named anchor rooms.

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;

/// Where one named anchor room may be placed.
///
/// Sampling treats each axis as `[min, max)`, except that `min == max` on
/// an axis degenerates to exactly `min` — so `RegionSpec::at` pins the
/// anchor to a single cell. Consumed once, during placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Logical room identifier; becomes the anchor cell's display name.
    pub name: String,
    pub min: GridPos,
    pub max: GridPos,
}

impl RegionSpec {
    /// A region covering a rectangle of candidate positions.
    pub fn new(name: impl Into<String>, min: GridPos, max: GridPos) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// A region pinned to a single fixed cell.
    pub fn at(name: impl Into<String>, x: i32, y: i32) -> Self {
        let pos = GridPos::new(x, y);
        Self {
            name: name.into(),
            min: pos,
            max: pos,
        }
    }

    /// Axis range with the degenerate `min == max` rule applied:
    /// exclusive upper bound, a single-point axis yields itself, and an
    /// inverted axis yields nothing (making the region invalid).
    pub(crate) fn axis_range(min: i32, max: i32) -> std::ops::Range<i32> {
        match max.cmp(&min) {
            std::cmp::Ordering::Greater => min..max,
            std::cmp::Ordering::Equal => min..min + 1,
            std::cmp::Ordering::Less => min..min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_builds_degenerate_region() {
        let spec = RegionSpec::at("boss", 4, 2);
        assert_eq!(spec.min, spec.max);
        assert_eq!(spec.min, GridPos::new(4, 2));
    }

    #[test]
    fn test_axis_range_exclusive_max() {
        assert_eq!(RegionSpec::axis_range(1, 4), 1..4);
    }

    #[test]
    fn test_axis_range_degenerate_point() {
        let range = RegionSpec::axis_range(3, 3);
        assert_eq!(range.collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_axis_range_inverted_is_empty() {
        assert_eq!(RegionSpec::axis_range(4, 1).count(), 0);
    }
}
