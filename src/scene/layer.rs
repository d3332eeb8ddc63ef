//! Layer kinds and per-layer render calls

use glam::Vec2;

use crate::snapshot::{
    BulletRecord, EagleRecord, EntityId, ExplosionRecord, FlickerRecord, HudState,
    PowerUpRecord, Rect, ScoreRecord, TankRecord, TextRecord,
};

/// Background fill of the battlefield
pub const BATTLEFIELD_FILL: &str = "#000000";

/// Which group a layer is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneGroup {
    /// Scene root (HUD, floating text)
    Root,
    /// Battlefield group, offset by its origin
    Battlefield,
}

/// Layer kinds in draw order
///
/// The discriminant order is the draw order. Forest comes after bullets and
/// tanks so both pass beneath tree cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Hud,
    Background,
    River,
    Steel,
    Brick,
    Snow,
    Eagle,
    Bullets,
    Tanks,
    Helmets,
    Forest,
    RestrictedAreas,
    PowerUps,
    Explosions,
    Flickers,
    Scores,
    Texts,
}

impl LayerKind {
    /// Every layer, in draw order
    pub const ORDER: [LayerKind; 17] = [
        LayerKind::Hud,
        LayerKind::Background,
        LayerKind::River,
        LayerKind::Steel,
        LayerKind::Brick,
        LayerKind::Snow,
        LayerKind::Eagle,
        LayerKind::Bullets,
        LayerKind::Tanks,
        LayerKind::Helmets,
        LayerKind::Forest,
        LayerKind::RestrictedAreas,
        LayerKind::PowerUps,
        LayerKind::Explosions,
        LayerKind::Flickers,
        LayerKind::Scores,
        LayerKind::Texts,
    ];

    pub fn group(&self) -> SceneGroup {
        match self {
            LayerKind::Hud | LayerKind::Texts => SceneGroup::Root,
            _ => SceneGroup::Battlefield,
        }
    }

    /// Diagnostic-only layers that renderers may skip
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, LayerKind::RestrictedAreas)
    }
}

/// An entity borrowed from the snapshot together with its key
#[derive(Debug, PartialEq)]
pub struct Keyed<'a, T> {
    pub key: EntityId,
    pub item: &'a T,
}

impl<T> Clone for Keyed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Keyed<'_, T> {}

impl<'a, T> Keyed<'a, T> {
    pub fn new(key: EntityId, item: &'a T) -> Self {
        Self { key, item }
    }
}

/// One layer's read-only projection of the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall<'a> {
    Hud(&'a HudState),
    Background { size: Vec2, fill: &'static str },
    River(&'a [Vec2]),
    Steel(&'a [Vec2]),
    Brick(&'a [Vec2]),
    Snow(&'a [Vec2]),
    /// `None` draws nothing (no base on this map)
    Eagle(Option<&'a EagleRecord>),
    Bullets(Vec<Keyed<'a, BulletRecord>>),
    /// Active tanks only
    Tanks(Vec<Keyed<'a, TankRecord>>),
    /// Active tanks with a running shield; drawn over, but separate from, the tank layer
    Helmets(Vec<Keyed<'a, TankRecord>>),
    Forest(&'a [Vec2]),
    RestrictedAreas(Vec<Keyed<'a, Rect>>),
    PowerUps(Vec<Keyed<'a, PowerUpRecord>>),
    Explosions(Vec<Keyed<'a, ExplosionRecord>>),
    Flickers(Vec<Keyed<'a, FlickerRecord>>),
    Scores(Vec<Keyed<'a, ScoreRecord>>),
    Texts(Vec<Keyed<'a, TextRecord>>),
}

fn keys_of<T>(entries: &[Keyed<'_, T>]) -> Vec<EntityId> {
    entries.iter().map(|e| e.key).collect()
}

impl RenderCall<'_> {
    pub fn kind(&self) -> LayerKind {
        match self {
            RenderCall::Hud(_) => LayerKind::Hud,
            RenderCall::Background { .. } => LayerKind::Background,
            RenderCall::River(_) => LayerKind::River,
            RenderCall::Steel(_) => LayerKind::Steel,
            RenderCall::Brick(_) => LayerKind::Brick,
            RenderCall::Snow(_) => LayerKind::Snow,
            RenderCall::Eagle(_) => LayerKind::Eagle,
            RenderCall::Bullets(_) => LayerKind::Bullets,
            RenderCall::Tanks(_) => LayerKind::Tanks,
            RenderCall::Helmets(_) => LayerKind::Helmets,
            RenderCall::Forest(_) => LayerKind::Forest,
            RenderCall::RestrictedAreas(_) => LayerKind::RestrictedAreas,
            RenderCall::PowerUps(_) => LayerKind::PowerUps,
            RenderCall::Explosions(_) => LayerKind::Explosions,
            RenderCall::Flickers(_) => LayerKind::Flickers,
            RenderCall::Scores(_) => LayerKind::Scores,
            RenderCall::Texts(_) => LayerKind::Texts,
        }
    }

    /// Number of drawable items in this call
    pub fn len(&self) -> usize {
        match self {
            RenderCall::Hud(_) | RenderCall::Background { .. } => 1,
            RenderCall::River(cells)
            | RenderCall::Steel(cells)
            | RenderCall::Brick(cells)
            | RenderCall::Snow(cells)
            | RenderCall::Forest(cells) => cells.len(),
            RenderCall::Eagle(eagle) => usize::from(eagle.is_some()),
            RenderCall::Bullets(v) => v.len(),
            RenderCall::Tanks(v) | RenderCall::Helmets(v) => v.len(),
            RenderCall::RestrictedAreas(v) => v.len(),
            RenderCall::PowerUps(v) => v.len(),
            RenderCall::Explosions(v) => v.len(),
            RenderCall::Flickers(v) => v.len(),
            RenderCall::Scores(v) => v.len(),
            RenderCall::Texts(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entity keys, in draw order (empty for terrain and singletons)
    pub fn keys(&self) -> Vec<EntityId> {
        match self {
            RenderCall::Bullets(v) => keys_of(v),
            RenderCall::Tanks(v) | RenderCall::Helmets(v) => keys_of(v),
            RenderCall::RestrictedAreas(v) => keys_of(v),
            RenderCall::PowerUps(v) => keys_of(v),
            RenderCall::Explosions(v) => keys_of(v),
            RenderCall::Flickers(v) => keys_of(v),
            RenderCall::Scores(v) => keys_of(v),
            RenderCall::Texts(v) => keys_of(v),
            _ => Vec::new(),
        }
    }
}
