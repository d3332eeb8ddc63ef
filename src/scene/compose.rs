//! Snapshot -> ordered render plan
//!
//! [`compose`] always emits every layer, in [`LayerKind::ORDER`], whatever the
//! game status. Empty collections become empty calls; renderers draw nothing
//! for them.

use glam::Vec2;

use super::layer::{BATTLEFIELD_FILL, Keyed, LayerKind, RenderCall, SceneGroup};
use crate::consts::{BLOCK_SIZE, FIELD_SIZE};
use crate::snapshot::{EntityMap, Snapshot};

/// Receives a plan's layers in draw order
///
/// Only [`SceneRenderer::draw`] is required. Group hooks bracket the
/// battlefield layers so a renderer can push/pop its translation.
pub trait SceneRenderer {
    /// Called before the first layer of a battlefield group
    fn begin_group(&mut self, _group: SceneGroup, _origin: Vec2) {}

    /// Called after the last layer of a battlefield group
    fn end_group(&mut self, _group: SceneGroup) {}

    fn draw(&mut self, call: &RenderCall<'_>);
}

/// Ordered layer calls for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlan<'a> {
    /// Translation of the battlefield group within the scene
    pub battlefield_origin: Vec2,
    calls: Vec<RenderCall<'a>>,
}

impl<'a> ScenePlan<'a> {
    pub fn calls(&self) -> &[RenderCall<'a>] {
        &self.calls
    }

    pub fn layer_kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.calls.iter().map(RenderCall::kind)
    }

    /// The call for one layer kind
    pub fn layer(&self, kind: LayerKind) -> Option<&RenderCall<'a>> {
        self.calls.iter().find(|c| c.kind() == kind)
    }

    /// Drive a renderer through the plan
    pub fn render<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) {
        let mut in_battlefield = false;
        for call in &self.calls {
            let group = call.kind().group();
            match (in_battlefield, group) {
                (false, SceneGroup::Battlefield) => {
                    renderer.begin_group(SceneGroup::Battlefield, self.battlefield_origin);
                    in_battlefield = true;
                }
                (true, SceneGroup::Root) => {
                    renderer.end_group(SceneGroup::Battlefield);
                    in_battlefield = false;
                }
                _ => {}
            }
            renderer.draw(call);
        }
        if in_battlefield {
            renderer.end_group(SceneGroup::Battlefield);
        }
    }
}

fn keyed<T>(map: &EntityMap<T>) -> Vec<Keyed<'_, T>> {
    map.iter().map(|(&id, item)| Keyed::new(id, item)).collect()
}

/// Build the render plan for a snapshot
pub fn compose(snapshot: &Snapshot) -> ScenePlan<'_> {
    let map = &snapshot.map;

    let tanks: Vec<_> = snapshot
        .active_tanks()
        .map(|(id, tank)| Keyed::new(id, tank))
        .collect();
    let helmets = tanks
        .iter()
        .copied()
        .filter(|t| t.item.has_helmet())
        .collect();

    let calls = vec![
        RenderCall::Hud(&snapshot.hud),
        RenderCall::Background {
            size: Vec2::splat(FIELD_SIZE),
            fill: BATTLEFIELD_FILL,
        },
        RenderCall::River(&map.rivers),
        RenderCall::Steel(&map.steels),
        RenderCall::Brick(&map.bricks),
        RenderCall::Snow(&map.snows),
        RenderCall::Eagle(map.eagle.as_ref()),
        RenderCall::Bullets(keyed(&snapshot.bullets)),
        RenderCall::Tanks(tanks),
        RenderCall::Helmets(helmets),
        RenderCall::Forest(&map.forests),
        RenderCall::RestrictedAreas(keyed(&map.restricted_areas)),
        RenderCall::PowerUps(keyed(&snapshot.power_ups)),
        RenderCall::Explosions(keyed(&snapshot.explosions)),
        RenderCall::Flickers(keyed(&snapshot.flickers)),
        RenderCall::Scores(keyed(&snapshot.scores)),
        RenderCall::Texts(keyed(&snapshot.texts)),
    ];

    log::trace!(
        "Composed snapshot v{} ({}): {} tanks, {} bullets",
        snapshot.version,
        snapshot.status.as_str(),
        calls[LayerKind::Tanks as usize].len(),
        calls[LayerKind::Bullets as usize].len()
    );

    ScenePlan {
        battlefield_origin: Vec2::splat(BLOCK_SIZE),
        calls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LayerTrace;
    use crate::snapshot::{
        BulletRecord, Direction, EagleRecord, GameStatus, ScoreRecord, TankRecord, TankSide,
    };
    use proptest::prelude::*;

    fn tank(active: bool, helmet_duration: u32) -> TankRecord {
        let mut tank = TankRecord::new(Vec2::new(64.0, 64.0), TankSide::Bot);
        tank.active = active;
        tank.helmet_duration = helmet_duration;
        tank
    }

    #[test]
    fn test_fixed_layer_order() {
        let snapshot = Snapshot::new(GameStatus::On);
        let plan = compose(&snapshot);
        let kinds: Vec<LayerKind> = plan.layer_kinds().collect();
        assert_eq!(kinds, LayerKind::ORDER.to_vec());
    }

    #[test]
    fn test_every_status_renders_every_layer() {
        for status in [
            GameStatus::Idle,
            GameStatus::On,
            GameStatus::GameOver,
            GameStatus::Statistics,
        ] {
            let snapshot = Snapshot::new(status);
            let plan = compose(&snapshot);
            assert_eq!(plan.calls().len(), LayerKind::ORDER.len());
            for call in plan.calls() {
                match call.kind() {
                    LayerKind::Hud | LayerKind::Background => assert_eq!(call.len(), 1),
                    _ => assert!(call.is_empty(), "{:?} should be empty", call.kind()),
                }
            }
        }
    }

    #[test]
    fn test_inactive_tank_excluded() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        snapshot.tanks.insert(1, tank(false, 500));

        let plan = compose(&snapshot);
        assert!(plan.layer(LayerKind::Tanks).unwrap().keys().is_empty());
        assert!(plan.layer(LayerKind::Helmets).unwrap().keys().is_empty());
    }

    #[test]
    fn test_helmet_layer_subset_of_active_tanks() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        snapshot.tanks.insert(4, tank(true, 0));
        snapshot.tanks.insert(5, tank(false, 3000));
        snapshot.tanks.insert(6, tank(true, 3000));
        snapshot.tanks.insert(8, tank(true, 1));

        let plan = compose(&snapshot);
        assert_eq!(plan.layer(LayerKind::Tanks).unwrap().keys(), vec![4, 6, 8]);
        assert_eq!(plan.layer(LayerKind::Helmets).unwrap().keys(), vec![6, 8]);
    }

    #[test]
    fn test_eagle_projection() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        let plan = compose(&snapshot);
        assert_eq!(plan.layer(LayerKind::Eagle), Some(&RenderCall::Eagle(None)));

        let eagle = EagleRecord {
            pos: Vec2::new(96.0, 192.0),
            broken: false,
        };
        snapshot.map.eagle = Some(eagle);
        let plan = compose(&snapshot);
        assert_eq!(plan.layer(LayerKind::Eagle), Some(&RenderCall::Eagle(Some(&eagle))));
    }

    #[test]
    fn test_battlefield_group_brackets() {
        let snapshot = Snapshot::new(GameStatus::Idle);
        let plan = compose(&snapshot);
        let mut trace = LayerTrace::default();
        plan.render(&mut trace);

        assert_eq!(trace.origin, Some(Vec2::splat(BLOCK_SIZE)));
        let groups: Vec<SceneGroup> = trace.entries.iter().map(|e| e.group).collect();
        assert_eq!(groups.first(), Some(&SceneGroup::Root));
        assert_eq!(groups.last(), Some(&SceneGroup::Root));
        assert!(groups[1..groups.len() - 1]
            .iter()
            .all(|g| *g == SceneGroup::Battlefield));
        assert_eq!(trace.groups_closed, 1);
    }

    #[test]
    fn test_background_covers_field() {
        let snapshot = Snapshot::default();
        let plan = compose(&snapshot);
        match plan.layer(LayerKind::Background) {
            Some(RenderCall::Background { size, fill }) => {
                assert_eq!(*size, Vec2::splat(13.0 * BLOCK_SIZE));
                assert_eq!(*fill, "#000000");
            }
            other => panic!("unexpected background call {:?}", other),
        }
    }

    fn snapshot_with(tank_count: u32, bullet_count: u32, score_count: u32, eagle: bool) -> Snapshot {
        let mut snapshot = Snapshot::new(GameStatus::On);
        for id in 0..tank_count {
            snapshot.tanks.insert(id, tank(id % 2 == 0, id % 3 * 100));
        }
        for id in 0..bullet_count {
            snapshot.bullets.insert(
                id + 100,
                BulletRecord {
                    pos: Vec2::new(id as f32, 0.0),
                    direction: Direction::Left,
                    speed: 0.12,
                    owner: 0,
                },
            );
        }
        for id in 0..score_count {
            snapshot.scores.insert(id, ScoreRecord { pos: Vec2::ZERO, score: 100 });
        }
        if eagle {
            snapshot.map.eagle = Some(EagleRecord {
                pos: Vec2::new(96.0, 192.0),
                broken: true,
            });
        }
        snapshot.map.forests = vec![Vec2::ZERO; tank_count as usize];
        snapshot
    }

    proptest! {
        #[test]
        fn prop_layer_kinds_independent_of_contents(
            a in (0u32..12, 0u32..12, 0u32..5, any::<bool>()),
            b in (0u32..12, 0u32..12, 0u32..5, any::<bool>()),
        ) {
            let first = snapshot_with(a.0, a.1, a.2, a.3);
            let second = snapshot_with(b.0, b.1, b.2, b.3);
            let kinds_a: Vec<LayerKind> = compose(&first).layer_kinds().collect();
            let kinds_b: Vec<LayerKind> = compose(&second).layer_kinds().collect();
            prop_assert_eq!(kinds_a, kinds_b);
        }

        #[test]
        fn prop_tank_layer_is_exactly_active_tanks(tank_count in 0u32..20) {
            let snapshot = snapshot_with(tank_count, 0, 0, false);
            let plan = compose(&snapshot);
            let expected: Vec<u32> = snapshot
                .tanks
                .iter()
                .filter(|(_, t)| t.active)
                .map(|(&id, _)| id)
                .collect();
            prop_assert_eq!(plan.layer(LayerKind::Tanks).unwrap().keys(), expected);
            let helmets = plan.layer(LayerKind::Helmets).unwrap().keys();
            for id in helmets {
                prop_assert!(snapshot.tanks[&id].active);
                prop_assert!(snapshot.tanks[&id].helmet_duration > 0);
            }
        }
    }
}
