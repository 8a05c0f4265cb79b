//! Dungeon map engine.
//!
//! Takes the abstract grids produced by `dungen-logic` and turns them into
//! something a game layer can hold onto: one ECS entity per occupied cell
//! (via `hecs`), neighbor links as components, an explicit session object
//! tracking the active room, and binary save/load of finished grids.
//!
//! Rendering, scene instancing, and asset loading stay outside: the engine
//! hands each room a `(name, LURD)` content key and accepts back an opaque
//! handle through [`instantiate::ContentSource`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dungen_core::prelude::*;
//!
//! let mut engine = MapEngine::new(MapConfig::default());
//! engine.generate().expect("generation failed");
//!
//! let session = engine.session.as_mut().unwrap();
//! let first = session.rooms()[0];
//! session.activate(first).unwrap();
//! ```

pub mod components;
pub mod engine;
pub mod instantiate;
pub mod persistence;
pub mod session;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{MapConfig, MapEngine};
    pub use crate::session::MapSession;
}
