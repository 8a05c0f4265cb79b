//! Pure dungeon grid generation logic.
//!
//! This crate contains the level layout algorithms independent of any
//! engine, ECS, or rendering concern. Functions take plain data and return
//! results, making them unit-testable and portable to whatever layer ends
//! up attaching concrete room content.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`direction`] | Cardinal directions, connection-mask bits, unit offsets |
//! | [`grid`] | Bounds-checked cell grid, positions, connection masks |
//! | [`region`] | Rectangular placement constraints for named anchor rooms |
//! | [`generate`] | Seeded anchor placement with region exhaustion detection |
//! | [`carve`] | Deterministic corridor carving between grid positions |
//! | [`adjacency`] | Flat occupied-cell list with four-way neighbor links |

pub mod adjacency;
pub mod carve;
pub mod direction;
pub mod generate;
pub mod grid;
pub mod region;
