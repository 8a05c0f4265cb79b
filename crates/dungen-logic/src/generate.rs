//! Seeded anchor placement.
//!
//! For each [`RegionSpec`], in the order given, one anchor cell is placed
//! at a uniformly random free position inside the spec's rectangle. The
//! free candidates are enumerated up front, so placement always terminates:
//! a rectangle that never overlapped the grid is `InvalidRegion`, and one
//! whose cells are all taken by earlier anchors is `RegionExhausted`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::{Grid, GridError, GridPos};
use crate::region::RegionSpec;

/// How the placement RNG is initialized.
///
/// `Entropy` draws a fresh seed from the OS — explicitly non-deterministic,
/// and distinct from `Fixed(0)`, which is a legal literal seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Seed {
    #[default]
    Entropy,
    Fixed(u64),
}

/// Build a `width` x `height` grid and place one anchor per spec.
///
/// Returns the grid and the anchor positions, one per spec in input order,
/// pairwise distinct. On any error no grid is returned.
pub fn create_grid(
    width: i32,
    height: i32,
    specs: &[RegionSpec],
    seed: Seed,
) -> Result<(Grid, Vec<GridPos>), GridError> {
    let mut rng = match seed {
        Seed::Entropy => StdRng::from_entropy(),
        Seed::Fixed(s) => StdRng::seed_from_u64(s),
    };
    create_grid_with_rng(width, height, specs, &mut rng)
}

/// [`create_grid`] with a caller-owned RNG, for callers that thread one
/// random source through a larger generation pass.
pub fn create_grid_with_rng(
    width: i32,
    height: i32,
    specs: &[RegionSpec],
    rng: &mut impl Rng,
) -> Result<(Grid, Vec<GridPos>), GridError> {
    let mut grid = Grid::new(width, height)?;
    let mut anchors = Vec::with_capacity(specs.len());

    for spec in specs {
        let position = place_anchor(&mut grid, spec, rng)?;
        anchors.push(position);
    }

    Ok((grid, anchors))
}

fn place_anchor(
    grid: &mut Grid,
    spec: &RegionSpec,
    rng: &mut impl Rng,
) -> Result<GridPos, GridError> {
    let candidates = clipped_candidates(grid, spec);
    if candidates.is_empty() {
        return Err(GridError::InvalidRegion {
            name: spec.name.clone(),
        });
    }

    let free: Vec<GridPos> = candidates
        .into_iter()
        .filter(|&pos| {
            // candidates are in bounds by construction
            !grid.get(pos).map(|c| c.is_anchor()).unwrap_or(false)
        })
        .collect();
    if free.is_empty() {
        return Err(GridError::RegionExhausted {
            name: spec.name.clone(),
        });
    }

    let position = free[rng.gen_range(0..free.len())];
    grid.place_anchor(position, spec.name.as_str())?;
    Ok(position)
}

/// Every position in the spec's rectangle that lies on the grid.
fn clipped_candidates(grid: &Grid, spec: &RegionSpec) -> Vec<GridPos> {
    let mut candidates = Vec::new();
    for y in RegionSpec::axis_range(spec.min.y, spec.max.y) {
        for x in RegionSpec::axis_range(spec.min.x, spec.max.x) {
            let pos = GridPos::new(x, y);
            if grid.contains(pos) {
                candidates.push(pos);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_region(pos: GridPos, spec: &RegionSpec) -> bool {
        RegionSpec::axis_range(spec.min.x, spec.max.x).contains(&pos.x)
            && RegionSpec::axis_range(spec.min.y, spec.max.y).contains(&pos.y)
    }

    #[test]
    fn test_anchor_per_spec_in_order() {
        let specs = vec![
            RegionSpec::at("A", 0, 0),
            RegionSpec::at("B", 4, 4),
            RegionSpec::new("C", GridPos::new(1, 1), GridPos::new(4, 4)),
        ];
        let (grid, anchors) = create_grid(5, 5, &specs, Seed::Fixed(7)).unwrap();
        assert_eq!(anchors.len(), 3);
        assert_eq!(anchors[0], GridPos::new(0, 0));
        assert_eq!(anchors[1], GridPos::new(4, 4));
        for (spec, pos) in specs.iter().zip(&anchors) {
            assert!(in_region(*pos, spec));
            let cell = grid.get(*pos).unwrap();
            assert!(cell.is_anchor());
            assert_eq!(cell.display_name(), spec.name);
        }
    }

    #[test]
    fn test_anchors_pairwise_distinct() {
        let specs: Vec<RegionSpec> = (0..9)
            .map(|i| {
                RegionSpec::new(format!("r{}", i), GridPos::new(0, 0), GridPos::new(3, 3))
            })
            .collect();
        for seed in 0..50 {
            let (_, anchors) = create_grid(3, 3, &specs, Seed::Fixed(seed)).unwrap();
            for i in 0..anchors.len() {
                for j in 0..i {
                    assert_ne!(anchors[i], anchors[j], "seed {}", seed);
                }
            }
        }
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let specs = vec![RegionSpec::new(
            "A",
            GridPos::new(0, 0),
            GridPos::new(8, 8),
        )];
        let (_, a) = create_grid(8, 8, &specs, Seed::Fixed(42)).unwrap();
        let (_, b) = create_grid(8, 8, &specs, Seed::Fixed(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_region_outside_grid_is_invalid() {
        let specs = vec![RegionSpec::at("A", 9, 9)];
        assert_eq!(
            create_grid(5, 5, &specs, Seed::Fixed(1)),
            Err(GridError::InvalidRegion { name: "A".into() })
        );
    }

    #[test]
    fn test_inverted_region_is_invalid() {
        let specs = vec![RegionSpec::new(
            "A",
            GridPos::new(3, 3),
            GridPos::new(1, 1),
        )];
        assert_eq!(
            create_grid(5, 5, &specs, Seed::Fixed(1)),
            Err(GridError::InvalidRegion { name: "A".into() })
        );
    }

    #[test]
    fn test_full_region_is_exhausted() {
        // Two specs pinned to the same single cell: the second must fail
        // instead of retrying forever.
        let specs = vec![RegionSpec::at("A", 2, 2), RegionSpec::at("B", 2, 2)];
        assert_eq!(
            create_grid(5, 5, &specs, Seed::Fixed(1)),
            Err(GridError::RegionExhausted { name: "B".into() })
        );
    }

    #[test]
    fn test_overlapping_regions_fill_without_collision() {
        // Four specs over the same 2x2 rectangle exactly fill it.
        let specs: Vec<RegionSpec> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| RegionSpec::new(*n, GridPos::new(0, 0), GridPos::new(2, 2)))
            .collect();
        let (grid, anchors) = create_grid(2, 2, &specs, Seed::Fixed(3)).unwrap();
        assert_eq!(anchors.len(), 4);
        assert!(grid.cells().all(|c| c.is_anchor()));
    }

    #[test]
    fn test_region_partially_off_grid_clips() {
        let specs = vec![RegionSpec::new(
            "A",
            GridPos::new(3, 3),
            GridPos::new(10, 10),
        )];
        for seed in 0..20 {
            let (_, anchors) = create_grid(5, 5, &specs, Seed::Fixed(seed)).unwrap();
            assert!(anchors[0].x >= 3 && anchors[0].x < 5);
            assert!(anchors[0].y >= 3 && anchors[0].y < 5);
        }
    }
}
