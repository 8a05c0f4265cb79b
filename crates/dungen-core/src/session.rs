//! Explicit map session state.
//!
//! Replaces any process-wide "current rooms" registry: the session owns
//! the ECS world, the room entity list, and which room is active. One
//! session per generated map, single writer.

use hecs::{Entity, World};
use thiserror::Error;

use dungen_logic::direction::Direction;
use dungen_logic::grid::Grid;

use crate::components::{ActiveRoom, Neighbors};
use crate::instantiate::instantiate_grid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The entity was not spawned by this session.
    #[error("entity is not a room in this session")]
    NotARoom,
}

/// One generated map's rooms plus the currently active room.
///
/// Activating a room marks it and every linked neighbor with
/// [`ActiveRoom`], clearing the previous ring; a navigator can then make
/// each neighbor active in turn without the session knowing anything
/// about how activation is visualized.
pub struct MapSession {
    world: World,
    rooms: Vec<Entity>,
    active: Option<Entity>,
}

impl MapSession {
    /// Instantiate every occupied cell of `grid` into a fresh world.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut world = World::new();
        let rooms = instantiate_grid(&mut world, grid);
        Self {
            world,
            rooms,
            active: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Room entities in row-major occupied-cell order.
    pub fn rooms(&self) -> &[Entity] {
        &self.rooms
    }

    pub fn active(&self) -> Option<Entity> {
        self.active
    }

    /// Make `room` active: it and its linked neighbors gain [`ActiveRoom`],
    /// everything else loses it.
    pub fn activate(&mut self, room: Entity) -> Result<(), SessionError> {
        if !self.rooms.contains(&room) {
            return Err(SessionError::NotARoom);
        }

        let previous: Vec<Entity> = self
            .world
            .query::<&ActiveRoom>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in previous {
            let _ = self.world.remove_one::<ActiveRoom>(entity);
        }

        let ring: Vec<Entity> = match self.world.get::<&Neighbors>(room) {
            Ok(neighbors) => neighbors.iter().collect(),
            Err(_) => Vec::new(),
        };
        let _ = self.world.insert_one(room, ActiveRoom);
        for entity in ring {
            let _ = self.world.insert_one(entity, ActiveRoom);
        }

        self.active = Some(room);
        Ok(())
    }

    /// Move activation across a link from the active room, if the link
    /// exists. Returns the newly active room.
    pub fn activate_neighbor(&mut self, direction: Direction) -> Option<Entity> {
        let current = self.active?;
        let neighbor = self.world.get::<&Neighbors>(current).ok()?.at(direction)?;
        self.activate(neighbor).ok()?;
        Some(neighbor)
    }

    /// Rooms currently marked active, in room-list order.
    pub fn active_set(&self) -> Vec<Entity> {
        self.rooms
            .iter()
            .copied()
            .filter(|&entity| {
                self.world
                    .satisfies::<&ActiveRoom>(entity)
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungen_logic::carve::connect;
    use dungen_logic::grid::GridPos;

    fn corridor_session() -> MapSession {
        let mut grid = Grid::new(4, 1).unwrap();
        connect(&mut grid, GridPos::new(0, 0), GridPos::new(3, 0)).unwrap();
        MapSession::from_grid(&grid)
    }

    #[test]
    fn test_activate_marks_room_and_ring() {
        let mut session = corridor_session();
        let rooms: Vec<Entity> = session.rooms().to_vec();
        session.activate(rooms[1]).unwrap();
        assert_eq!(session.active(), Some(rooms[1]));
        // Room 1 plus both horizontal neighbors.
        assert_eq!(session.active_set(), vec![rooms[0], rooms[1], rooms[2]]);
    }

    #[test]
    fn test_reactivation_clears_previous_ring() {
        let mut session = corridor_session();
        let rooms: Vec<Entity> = session.rooms().to_vec();
        session.activate(rooms[0]).unwrap();
        session.activate(rooms[3]).unwrap();
        assert_eq!(session.active_set(), vec![rooms[2], rooms[3]]);
    }

    #[test]
    fn test_activate_neighbor_walks_links() {
        let mut session = corridor_session();
        let rooms: Vec<Entity> = session.rooms().to_vec();
        session.activate(rooms[0]).unwrap();

        let next = session.activate_neighbor(Direction::Right);
        assert_eq!(next, Some(rooms[1]));
        assert_eq!(session.active(), Some(rooms[1]));

        // No vertical link on a straight corridor.
        assert_eq!(session.activate_neighbor(Direction::Down), None);
        assert_eq!(session.active(), Some(rooms[1]));
    }

    #[test]
    fn test_activate_foreign_entity_fails() {
        let mut session = corridor_session();
        // Spawn enough entities elsewhere that the last id cannot collide
        // with this session's four rooms.
        let mut other = World::new();
        let foreign = (0..10).map(|_| other.spawn((ActiveRoom,))).last().unwrap();
        assert_eq!(session.activate(foreign), Err(SessionError::NotARoom));
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_activate_neighbor_without_active_room() {
        let mut session = corridor_session();
        assert_eq!(session.activate_neighbor(Direction::Left), None);
    }
}
