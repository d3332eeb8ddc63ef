//! Tank Battle - battlefield scene and session lifecycle
//!
//! Core modules:
//! - `snapshot`: Read-only game state handed over by the simulation
//! - `scene`: Ordered layer composition and renderers
//! - `lifecycle`: When to (re)start a game for the requested stage
//! - `stage`: Stage catalog
//! - `settings`: Host configuration
//! - `demo`: Seeded stand-in for the simulation

pub mod demo;
pub mod lifecycle;
pub mod scene;
pub mod settings;
pub mod snapshot;
pub mod stage;

pub use lifecycle::{Command, CommandSink, LifecycleInputs, SessionHost, evaluate};
pub use scene::{ScenePlan, SceneRenderer, compose};
pub use settings::Settings;
pub use snapshot::{GameStatus, Snapshot};
pub use stage::StageCatalog;

/// Battlefield geometry
pub mod consts {
    /// Side of one battlefield block in pixels
    pub const BLOCK_SIZE: f32 = 16.0;
    /// The battlefield is FIELD_BLOCKS x FIELD_BLOCKS blocks
    pub const FIELD_BLOCKS: u32 = 13;
    /// Side of the battlefield in pixels
    pub const FIELD_SIZE: f32 = FIELD_BLOCKS as f32 * BLOCK_SIZE;

    /// Bricks are quarter blocks
    pub const BRICK_SIZE: f32 = BLOCK_SIZE / 4.0;
    /// Steels are half blocks
    pub const STEEL_SIZE: f32 = BLOCK_SIZE / 2.0;
}
