//! Run lifecycle tracking.

use std::fmt;

use tracing::debug;

/// Transaction progress inside live mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Begun,
    /// Number of batches executed so far.
    Inserting(usize),
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Reading,
    Previewing,
    FileEmitting,
    Transacting(TxState),
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    fn can_advance_to(self, next: RunState) -> bool {
        use RunState::{Done, Failed, FileEmitting, Idle, Previewing, Reading, Transacting};
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Reading) => true,
            (Reading, Previewing | FileEmitting | Transacting(TxState::Begun)) => true,
            (Previewing | FileEmitting, Done) => true,
            (Transacting(from), Transacting(to)) => from.can_advance_to(to),
            (Transacting(TxState::Committed), Done) => true,
            _ => false,
        }
    }
}

impl TxState {
    fn can_advance_to(self, next: TxState) -> bool {
        match (self, next) {
            (TxState::Begun, TxState::Inserting(1)) => true,
            (TxState::Inserting(done), TxState::Inserting(next)) => next == done + 1,
            (TxState::Begun | TxState::Inserting(_), TxState::Committed | TxState::RolledBack) => {
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => f.write_str("idle"),
            RunState::Reading => f.write_str("reading"),
            RunState::Previewing => f.write_str("previewing"),
            RunState::FileEmitting => f.write_str("file-emitting"),
            RunState::Transacting(TxState::Begun) => f.write_str("transaction begun"),
            RunState::Transacting(TxState::Inserting(n)) => {
                write!(f, "transaction inserting ({n} batches)")
            }
            RunState::Transacting(TxState::Committed) => f.write_str("committed"),
            RunState::Transacting(TxState::RolledBack) => f.write_str("rolled back"),
            RunState::Done => f.write_str("done"),
            RunState::Failed => f.write_str("failed"),
        }
    }
}

/// Records every state a run passes through.
#[derive(Debug, Clone)]
pub struct RunTracker {
    history: Vec<RunState>,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            history: vec![RunState::Idle],
        }
    }

    pub fn current(&self) -> RunState {
        self.history.last().copied().unwrap_or(RunState::Idle)
    }

    /// The most recent transaction state, if live mode was entered.
    pub fn transaction(&self) -> Option<TxState> {
        self.history.iter().rev().find_map(|state| match state {
            RunState::Transacting(tx) => Some(*tx),
            _ => None,
        })
    }

    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Moves to `next`. Illegal transitions are a driver bug.
    pub fn advance(&mut self, next: RunState) {
        let from = self.current();
        debug_assert!(
            from.can_advance_to(next),
            "illegal run transition {from} -> {next}"
        );
        debug!(from = %from, to = %next, "run state");
        self.history.push(next);
    }

    /// Marks the run failed unless it already finished.
    pub fn fail(&mut self) {
        if !self.current().is_terminal() {
            self.advance(RunState::Failed);
        }
    }
}
