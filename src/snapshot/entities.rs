//! Transient entities: tanks, bullets, effects and pickups
//!
//! Every collection is keyed by an id that stays unique for as long as the
//! entity is alive. `BTreeMap` gives a deterministic, id-ordered iteration for
//! layer construction.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier of an entity within its collection
pub type EntityId = u32;

/// Id-keyed entity collection
pub type EntityMap<T> = BTreeMap<EntityId, T>;

/// Facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// Who controls a tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankSide {
    #[default]
    Human,
    Bot,
}

/// Tank model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankLevel {
    #[default]
    Basic,
    Fast,
    Power,
    Armor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankColor {
    #[default]
    Yellow,
    Green,
    Silver,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankRecord {
    pub pos: Vec2,
    pub side: TankSide,
    pub level: TankLevel,
    pub color: TankColor,
    pub hp: u8,
    pub direction: Direction,
    pub moving: bool,
    /// Inactive tanks are awaiting spawn or already destroyed
    pub active: bool,
    /// Remaining shield time in milliseconds (0 = no shield)
    pub helmet_duration: u32,
    /// Drops a power-up when destroyed
    pub with_power_up: bool,
}

impl TankRecord {
    pub fn new(pos: Vec2, side: TankSide) -> Self {
        Self {
            pos,
            side,
            level: TankLevel::Basic,
            color: match side {
                TankSide::Human => TankColor::Yellow,
                TankSide::Bot => TankColor::Silver,
            },
            hp: 1,
            direction: match side {
                TankSide::Human => Direction::Up,
                TankSide::Bot => Direction::Down,
            },
            moving: false,
            active: true,
            helmet_duration: 0,
            with_power_up: false,
        }
    }

    pub fn has_helmet(&self) -> bool {
        self.helmet_duration > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletRecord {
    pub pos: Vec2,
    pub direction: Direction,
    pub speed: f32,
    /// Tank that fired the bullet
    pub owner: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplosionKind {
    #[default]
    Bullet,
    Tank,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionRecord {
    pub pos: Vec2,
    pub kind: ExplosionKind,
    /// Animation frame index
    pub shape: u8,
}

/// Spawn blink shown before a tank appears
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlickerRecord {
    pub pos: Vec2,
    pub shape: u8,
}

/// Floating points popup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub pos: Vec2,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Tank,
    Star,
    Grenade,
    Timer,
    Helmet,
    Shovel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpRecord {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Blink state
    pub visible: bool,
}

/// Text drawn over the scene (root coordinates, not battlefield)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    pub pos: Vec2,
    pub content: String,
    pub fill: String,
}
