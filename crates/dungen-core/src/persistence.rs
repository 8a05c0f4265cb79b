//! Save/Load for finished grids.
//!
//! Uses bincode for compact binary serialization. Sessions are not saved:
//! rooms are cheap to re-instantiate from the grid, and entity ids would
//! not survive a round trip anyway.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dungen_logic::grid::Grid;

/// Version number for the save format (increment when the format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of one generated map.
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// The full carved grid, anchors and masks included.
    pub grid: Grid,
}

#[derive(Debug, Error)]
pub enum PersistError {
    /// The save was written by an incompatible format version.
    #[error("unsupported save file version {0}")]
    Version(u32),
    #[error(transparent)]
    Codec(#[from] bincode::Error),
}

/// Write a grid snapshot to `writer`.
pub fn save_map<W: Write>(grid: &Grid, writer: &mut W) -> Result<(), PersistError> {
    let data = SaveData {
        version: SAVE_VERSION,
        grid: grid.clone(),
    };
    bincode::serialize_into(writer, &data)?;
    Ok(())
}

/// Read a grid snapshot back from `reader`.
pub fn load_map<R: Read>(reader: &mut R) -> Result<Grid, PersistError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    if data.version != SAVE_VERSION {
        return Err(PersistError::Version(data.version));
    }
    Ok(data.grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungen_logic::carve::connect;
    use dungen_logic::generate::{create_grid, Seed};
    use dungen_logic::grid::GridPos;
    use dungen_logic::region::RegionSpec;

    fn carved_grid() -> Grid {
        let specs = vec![RegionSpec::at("A", 0, 0), RegionSpec::at("B", 4, 4)];
        let (mut grid, anchors) = create_grid(5, 5, &specs, Seed::Fixed(9)).unwrap();
        connect(&mut grid, anchors[0], anchors[1]).unwrap();
        grid
    }

    #[test]
    fn test_save_load_round_trip() {
        let grid = carved_grid();
        let mut buffer = Vec::new();
        save_map(&grid, &mut buffer).unwrap();

        let loaded = load_map(&mut buffer.as_slice()).unwrap();
        assert_eq!(loaded.width(), grid.width());
        assert_eq!(loaded.height(), grid.height());
        for (a, b) in grid.cells().zip(loaded.cells()) {
            assert_eq!(a, b);
        }
        let anchor = loaded.get(GridPos::new(0, 0)).unwrap();
        assert!(anchor.is_anchor());
        assert_eq!(anchor.display_name(), "A");
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let data = SaveData {
            version: 99,
            grid: carved_grid(),
        };
        let bytes = bincode::serialize(&data).unwrap();
        let err = load_map(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, PersistError::Version(99)));
    }

    #[test]
    fn test_truncated_save_is_codec_error() {
        let grid = carved_grid();
        let mut buffer = Vec::new();
        save_map(&grid, &mut buffer).unwrap();
        buffer.truncate(buffer.len() / 2);
        let err = load_map(&mut buffer.as_slice()).unwrap_err();
        assert!(matches!(err, PersistError::Codec(_)));
    }
}
