//! Recording renderer
//!
//! Captures which layers were drawn, in which group, with which entity keys.
//! Hosts can compare two traces to find the layers that changed between
//! frames.

use glam::Vec2;

use super::compose::SceneRenderer;
use super::layer::{LayerKind, RenderCall, SceneGroup};
use crate::snapshot::EntityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub kind: LayerKind,
    pub group: SceneGroup,
    pub count: usize,
    pub keys: Vec<EntityId>,
}

#[derive(Debug, Clone, Default)]
pub struct LayerTrace {
    pub entries: Vec<TraceEntry>,
    /// Origin passed to the last battlefield group
    pub origin: Option<Vec2>,
    pub groups_closed: usize,
    in_battlefield: bool,
}

impl LayerTrace {
    pub fn kinds(&self) -> Vec<LayerKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    pub fn entry(&self, kind: LayerKind) -> Option<&TraceEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Layers whose count or keys differ from `previous`
    pub fn changed_since(&self, previous: &LayerTrace) -> Vec<LayerKind> {
        self.entries
            .iter()
            .filter(|&entry| previous.entry(entry.kind) != Some(entry))
            .map(|entry| entry.kind)
            .collect()
    }
}

impl SceneRenderer for LayerTrace {
    fn begin_group(&mut self, group: SceneGroup, origin: Vec2) {
        if group == SceneGroup::Battlefield {
            self.in_battlefield = true;
            self.origin = Some(origin);
        }
    }

    fn end_group(&mut self, group: SceneGroup) {
        if group == SceneGroup::Battlefield {
            self.in_battlefield = false;
            self.groups_closed += 1;
        }
    }

    fn draw(&mut self, call: &RenderCall<'_>) {
        let group = if self.in_battlefield {
            SceneGroup::Battlefield
        } else {
            SceneGroup::Root
        };
        self.entries.push(TraceEntry {
            kind: call.kind(),
            group,
            count: call.len(),
            keys: call.keys(),
        });
    }
}
