//! Spawning room entities from a finished grid.
//!
//! One entity per occupied cell, in the same row-major order as
//! `build_links`, so callers can index rooms the way they index linked
//! cells. Neighbor links become [`Neighbors`] components pointing at
//! entities instead of list slots.

use hecs::{Entity, World};

use dungen_logic::adjacency::build_links;
use dungen_logic::direction::Direction;
use dungen_logic::grid::Grid;

use crate::components::{ContentHandle, ContentKey, Neighbors, RoomCell};

/// External service that resolves a room's content key to concrete
/// content. The engine never inspects storage; it only supplies the key.
pub trait ContentSource {
    /// Resolve a key to a content handle, or `None` when no content
    /// variant exists for it.
    fn resolve(&mut self, key: &ContentKey) -> Option<ContentHandle>;
}

/// Spawn one entity per occupied cell and wire up neighbor links.
///
/// Returned entities are in row-major (`y` outer, `x` inner) order over
/// the occupied cells. Empty cells produce no entity at all.
pub fn instantiate_grid(world: &mut World, grid: &Grid) -> Vec<Entity> {
    let linked = build_links(grid);

    let mut entities = Vec::with_capacity(linked.len());
    for cell in &linked {
        let entity = world.spawn((
            RoomCell {
                position: cell.position,
                mask: cell.mask,
                name: cell.name.clone(),
            },
            ContentKey {
                name: cell.name.clone(),
                lurd: cell.lurd.clone(),
            },
            Neighbors::default(),
        ));
        entities.push(entity);
    }

    for (i, cell) in linked.iter().enumerate() {
        let mut neighbors = Neighbors::default();
        for direction in Direction::ALL {
            neighbors.set(
                direction,
                cell.neighbor_at(direction).map(|slot| entities[slot]),
            );
        }
        if let Ok(mut slot) = world.get::<&mut Neighbors>(entities[i]) {
            *slot = neighbors;
        }
    }

    entities
}

/// Attach content handles to every room the source can resolve.
///
/// Returns how many rooms received content. Rooms the source declines
/// keep their key but get no handle.
pub fn attach_content(world: &mut World, source: &mut dyn ContentSource) -> usize {
    let keys: Vec<(Entity, ContentKey)> = world
        .query::<&ContentKey>()
        .iter()
        .map(|(entity, key)| (entity, key.clone()))
        .collect();

    let mut attached = 0;
    for (entity, key) in keys {
        if let Some(handle) = source.resolve(&key) {
            if world.insert_one(entity, handle).is_ok() {
                attached += 1;
            }
        }
    }
    attached
}
