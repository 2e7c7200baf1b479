use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::error::AppError;

/// Kinds of user-triggered external actions, one in-flight slot each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Connect,
    CreateToken,
    MintTokens,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Connect => "wallet connect",
            ActionKind::CreateToken => "token creation",
            ActionKind::MintTokens => "minting",
        }
    }
}

/// Lifecycle of an async action as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
    Done,
    Failed,
}

/// Single-slot in-flight guard keyed by action kind.
///
/// At most one external action of a given kind runs at a time; a second
/// trigger while the first is pending fails with [`AppError::ActionInFlight`]
/// so controls can stay disabled instead of double-submitting.
#[derive(Debug, Default)]
pub struct ActionGuard {
    states: Arc<Mutex<HashMap<ActionKind, ActionState>>>,
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: ActionKind) -> ActionState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied()
            .unwrap_or_default()
    }

    /// Claims the slot for `kind`, marking it Pending. The returned slot must
    /// be completed with the action's outcome; dropping it unfinished records
    /// a failure.
    pub fn begin(&self, kind: ActionKind) -> Result<ActionSlot, AppError> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if states.get(&kind) == Some(&ActionState::Pending) {
            return Err(AppError::ActionInFlight(kind.label()));
        }
        states.insert(kind, ActionState::Pending);
        Ok(ActionSlot {
            states: Arc::clone(&self.states),
            kind,
            finished: false,
        })
    }
}

pub struct ActionSlot {
    states: Arc<Mutex<HashMap<ActionKind, ActionState>>>,
    kind: ActionKind,
    finished: bool,
}

impl ActionSlot {
    pub fn complete(mut self, success: bool) {
        self.finish(if success {
            ActionState::Done
        } else {
            ActionState::Failed
        });
    }

    fn finish(&mut self, state: ActionState) {
        if !self.finished {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(self.kind, state);
            self.finished = true;
        }
    }
}

impl Drop for ActionSlot {
    fn drop(&mut self) {
        // An early return (`?`) drops the slot without completing it.
        self.finish(ActionState::Failed);
    }
}
