//! Config-driven map generation.
//!
//! `MapEngine` runs the whole pipeline: anchor placement, corridor
//! carving between anchor pairs, and session instantiation.

use thiserror::Error;

use dungen_logic::carve::connect;
use dungen_logic::generate::{create_grid, Seed};
use dungen_logic::grid::{Grid, GridError, GridPos};
use dungen_logic::region::RegionSpec;

use crate::session::MapSession;

/// Configuration for map generation
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    /// One anchor room per region, placed in order.
    pub regions: Vec<RegionSpec>,
    /// Corridors to carve, as (from, to) indices into `regions`.
    pub corridors: Vec<(usize, usize)>,
    pub seed: Seed,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            regions: vec![RegionSpec::at("A", 0, 0), RegionSpec::at("B", 4, 4)],
            corridors: vec![(0, 1)],
            seed: Seed::Entropy,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// A corridor referenced a region index that does not exist.
    #[error("corridor endpoint {index} has no matching region (have {regions})")]
    CorridorIndex { index: usize, regions: usize },
}

/// Main generation engine: owns the config and the generated map state.
pub struct MapEngine {
    pub config: MapConfig,
    /// The carved grid, once generation has run.
    pub grid: Option<Grid>,
    /// Anchor positions, one per configured region, in region order.
    pub anchors: Vec<GridPos>,
    /// Instantiated room session, once generation has run.
    pub session: Option<MapSession>,
}

impl MapEngine {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            grid: None,
            anchors: Vec::new(),
            session: None,
        }
    }

    /// Generate the full map: place anchors, carve corridors, instantiate
    /// rooms. On error the previous map state is left untouched.
    pub fn generate(&mut self) -> Result<(), EngineError> {
        let regions = self.config.regions.len();
        for &(from, to) in &self.config.corridors {
            for index in [from, to] {
                if index >= regions {
                    return Err(EngineError::CorridorIndex { index, regions });
                }
            }
        }

        let (mut grid, anchors) = create_grid(
            self.config.width,
            self.config.height,
            &self.config.regions,
            self.config.seed,
        )?;
        for &(from, to) in &self.config.corridors {
            connect(&mut grid, anchors[from], anchors[to])?;
        }

        let session = MapSession::from_grid(&grid);
        log::info!(
            "Generated {}x{} map: {} anchors, {} corridors, {} rooms",
            grid.width(),
            grid.height(),
            anchors.len(),
            self.config.corridors.len(),
            session.rooms().len(),
        );

        self.grid = Some(grid);
        self.anchors = anchors;
        self.session = Some(session);
        Ok(())
    }
}
