//! Room components attached to instantiated map entities.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use dungen_logic::direction::Direction;
use dungen_logic::grid::GridPos;

/// Room component - one occupied grid cell promoted to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCell {
    pub position: GridPos,
    /// Connection mask at instantiation time (Left-Up-Right-Down bits).
    pub mask: u8,
    /// Display name: anchor name, or the decimal mask for generated rooms.
    pub name: String,
}

/// The key handed to an external content service to pick a concrete room
/// variant: the room name plus its mask as a 4-character LURD string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub name: String,
    pub lurd: String,
}

/// Opaque handle returned by a content service for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHandle(pub u64);

/// Links to the neighboring room entities (for navigation).
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors([Option<Entity>; 4]);

impl Neighbors {
    pub fn at(&self, direction: Direction) -> Option<Entity> {
        self.0[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, entity: Option<Entity>) {
        self.0[direction.index()] = entity;
    }

    /// Every linked neighbor in Left-Up-Right-Down order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().flatten().copied()
    }
}

/// Marker for the currently active room and its neighbor ring.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveRoom;
