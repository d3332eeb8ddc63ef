//! Game status and the per-tick snapshot aggregate

use serde::{Deserialize, Serialize};

use super::entities::{
    BulletRecord, EntityId, EntityMap, ExplosionRecord, FlickerRecord, PowerUpRecord,
    ScoreRecord, TankRecord, TextRecord,
};
use super::map::MapState;

/// Session status as reported by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// No game has been started yet
    #[default]
    Idle,
    /// A stage is being played
    On,
    /// The run was lost
    GameOver,
    /// Post-stage statistics screen
    Statistics,
}

impl GameStatus {
    /// True when there is no game worth preserving
    pub fn is_stopped(&self) -> bool {
        matches!(self, GameStatus::Idle | GameStatus::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::On => "on",
            GameStatus::GameOver => "gameover",
            GameStatus::Statistics => "statistics",
        }
    }
}

/// Per-player HUD line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerHud {
    pub lives: u8,
    pub score: u32,
}

/// Side-panel information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HudState {
    /// Bots still waiting to spawn this stage
    pub remaining_enemies: u32,
    pub players: Vec<PlayerHud>,
    /// Label shown next to the stage flag
    pub stage_label: Option<String>,
}

/// Everything that exists at one instant
///
/// Produced by the simulation and replaced wholesale on every update;
/// nothing in this crate mutates a received snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Monotonic tick stamp from the producer
    pub version: u64,
    pub status: GameStatus,
    pub current_stage: Option<String>,
    pub hud: HudState,
    pub map: MapState,
    pub bullets: EntityMap<BulletRecord>,
    pub tanks: EntityMap<TankRecord>,
    pub explosions: EntityMap<ExplosionRecord>,
    pub flickers: EntityMap<FlickerRecord>,
    pub scores: EntityMap<ScoreRecord>,
    pub power_ups: EntityMap<PowerUpRecord>,
    pub texts: EntityMap<TextRecord>,
}

impl Snapshot {
    /// Empty snapshot in the given status
    pub fn new(status: GameStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Current stage name, treating an empty string as unset
    pub fn current_stage(&self) -> Option<&str> {
        self.current_stage.as_deref().filter(|s| !s.is_empty())
    }

    /// Tanks currently on the field, ordered by id
    pub fn active_tanks(&self) -> impl Iterator<Item = (EntityId, &TankRecord)> {
        self.tanks
            .iter()
            .filter(|(_, tank)| tank.active)
            .map(|(&id, tank)| (id, tank))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
