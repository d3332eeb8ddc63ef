//! Battlefield terrain

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::EntityMap;

/// The base the players defend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EagleRecord {
    pub pos: Vec2,
    pub broken: bool,
}

/// Axis-aligned rectangle in battlefield coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
}

/// Terrain of the current stage
///
/// Each terrain kind is a list of cell origins (top-left corner, battlefield
/// coordinates). Bricks are quarter blocks, steels half blocks, and the rest
/// whole blocks; see [`crate::consts`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapState {
    pub bricks: Vec<Vec2>,
    pub steels: Vec<Vec2>,
    pub rivers: Vec<Vec2>,
    pub snows: Vec<Vec2>,
    pub forests: Vec<Vec2>,
    pub eagle: Option<EagleRecord>,
    /// Zones tanks may not enter (diagnostic overlay only)
    pub restricted_areas: EntityMap<Rect>,
}

impl MapState {
    /// True when the eagle exists and has been destroyed
    pub fn eagle_broken(&self) -> bool {
        self.eagle.is_some_and(|e| e.broken)
    }
}
