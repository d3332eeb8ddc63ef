//! Scene composition
//!
//! Turns a [`Snapshot`](crate::snapshot::Snapshot) into an ordered list of
//! layer calls and drives renderers through it. Drawing primitives live in
//! [`SceneRenderer`] implementations; this module only decides what is drawn
//! and in which order.

pub mod ascii;
pub mod compose;
pub mod layer;
pub mod trace;

pub use ascii::AsciiCanvas;
pub use compose::{ScenePlan, SceneRenderer, compose};
pub use layer::{BATTLEFIELD_FILL, Keyed, LayerKind, RenderCall, SceneGroup};
pub use trace::{LayerTrace, TraceEntry};
