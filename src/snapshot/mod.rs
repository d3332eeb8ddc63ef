//! Snapshot data model
//!
//! Read-only description of one instant of a battle, as handed over by the
//! simulation:
//! - Status and current stage
//! - Terrain (`map`)
//! - Transient entity collections keyed by id
//! - HUD state

pub mod entities;
pub mod map;
pub mod state;

pub use entities::{
    BulletRecord, Direction, EntityId, EntityMap, ExplosionKind, ExplosionRecord, FlickerRecord,
    PowerUpKind, PowerUpRecord, ScoreRecord, TankColor, TankLevel, TankRecord, TankSide,
    TextRecord,
};
pub use map::{EagleRecord, MapState, Rect};
pub use state::{GameStatus, HudState, PlayerHud, Snapshot};
