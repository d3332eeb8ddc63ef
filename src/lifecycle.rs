//! Session lifecycle
//!
//! Decides when a game must be (re)started for the stage the player navigated
//! to. The decision itself ([`evaluate`]) is a pure function of the status,
//! the current stage and the requested stage name. [`SessionHost`] does the
//! change detection around it and forwards commands to a [`CommandSink`].

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::snapshot::{GameStatus, Snapshot};
use crate::stage::StageCatalog;

/// Outbound command for the game store
///
/// Serializes exactly as `{"type":"GAMESTART","stageIndex":N}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    #[serde(rename = "GAMESTART")]
    GameStart {
        #[serde(rename = "stageIndex")]
        stage_index: usize,
    },
}

impl Command {
    /// Wire form sent to the game store
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The tuple the lifecycle decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleInputs<'a> {
    pub status: GameStatus,
    pub current_stage: Option<&'a str>,
    pub requested_stage: Option<&'a str>,
}

impl<'a> LifecycleInputs<'a> {
    pub fn new(
        status: GameStatus,
        current_stage: Option<&'a str>,
        requested_stage: Option<&'a str>,
    ) -> Self {
        Self {
            status,
            current_stage,
            requested_stage,
        }
    }

    /// Inputs taken from a snapshot plus the navigation request
    pub fn from_snapshot(snapshot: &'a Snapshot, requested_stage: Option<&'a str>) -> Self {
        Self::new(snapshot.status, snapshot.current_stage(), requested_stage)
    }
}

/// Decide whether a game start must be issued
///
/// - Idle / game over: always start, at the requested stage or stage 0 when the
///   name is missing or unknown.
/// - On / statistics: restart only when a game stage is set and the requested
///   name is a different, known stage. Anything else leaves the running game
///   alone.
pub fn evaluate(inputs: &LifecycleInputs<'_>, catalog: &StageCatalog) -> Option<Command> {
    let requested = inputs.requested_stage.filter(|s| !s.is_empty());

    if inputs.status.is_stopped() {
        if let Some(name) = requested {
            if !catalog.contains(name) {
                log::warn!("Unknown stage {:?}, starting stage 0", name);
            }
        }
        let stage_index = catalog.resolve(requested);
        log::debug!(
            "Status {} -> start stage {}",
            inputs.status.as_str(),
            stage_index
        );
        return Some(Command::GameStart { stage_index });
    }

    let current = inputs.current_stage.filter(|s| !s.is_empty())?;
    let name = requested?;
    if name == current {
        return None;
    }
    let stage_index = catalog.index_of(name)?;
    log::debug!(
        "Requested stage {:?} differs from current {:?} -> restart at {}",
        name,
        current,
        stage_index
    );
    Some(Command::GameStart { stage_index })
}

/// Destination for emitted commands
pub trait CommandSink {
    fn dispatch(&mut self, command: Command);
}

impl CommandSink for Vec<Command> {
    fn dispatch(&mut self, command: Command) {
        self.push(command);
    }
}

impl CommandSink for Sender<Command> {
    fn dispatch(&mut self, command: Command) {
        if self.send(command).is_err() {
            log::warn!("Command receiver dropped, discarding {:?}", command);
        }
    }
}

/// Last input tuple seen by the host (owned copy)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    status: GameStatus,
    current_stage: Option<String>,
    requested_stage: Option<String>,
}

impl Observed {
    fn matches(&self, inputs: &LifecycleInputs<'_>) -> bool {
        self.status == inputs.status
            && self.current_stage.as_deref() == inputs.current_stage
            && self.requested_stage.as_deref() == inputs.requested_stage
    }
}

impl From<&LifecycleInputs<'_>> for Observed {
    fn from(inputs: &LifecycleInputs<'_>) -> Self {
        Self {
            status: inputs.status,
            current_stage: inputs.current_stage.map(str::to_owned),
            requested_stage: inputs.requested_stage.map(str::to_owned),
        }
    }
}

/// Re-runs [`evaluate`] whenever its input tuple changes
///
/// The first observation plays the role of "mount"; every later observation
/// with a different tuple is an "update". Observations with an unchanged
/// tuple are ignored, so a start command is not repeated while the simulation
/// has yet to react to it.
#[derive(Debug, Clone)]
pub struct SessionHost {
    catalog: StageCatalog,
    last: Option<Observed>,
}

impl SessionHost {
    pub fn new(catalog: StageCatalog) -> Self {
        Self {
            catalog,
            last: None,
        }
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Feed the current inputs; returns the command dispatched, if any
    pub fn observe<S: CommandSink + ?Sized>(
        &mut self,
        inputs: LifecycleInputs<'_>,
        sink: &mut S,
    ) -> Option<Command> {
        if self.last.as_ref().is_some_and(|last| last.matches(&inputs)) {
            return None;
        }
        self.last = Some(Observed::from(&inputs));

        let command = evaluate(&inputs, &self.catalog)?;
        log::info!("Dispatching {:?}", command);
        sink.dispatch(command);
        Some(command)
    }

    /// Convenience wrapper for a fresh snapshot plus navigation request
    pub fn observe_snapshot<S: CommandSink + ?Sized>(
        &mut self,
        snapshot: &Snapshot,
        requested_stage: Option<&str>,
        sink: &mut S,
    ) -> Option<Command> {
        self.observe(LifecycleInputs::from_snapshot(snapshot, requested_stage), sink)
    }

    /// Forget the last observation so the next one is treated as a mount
    pub fn reset(&mut self) {
        self.last = None;
    }
}
