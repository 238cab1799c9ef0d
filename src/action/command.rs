use chrono::{DateTime, Local};
use std::fmt::{self, Display};

/// Kind of irreversible action the trigger can commit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Shutdown,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// A committed request handed to an [`ActionExecutor`](super::ActionExecutor)
#[derive(Clone, Debug)]
pub struct ActionCommand {
    pub kind: ActionKind,
    /// Wall-clock time of the commit, for logs only
    pub issued_at: DateTime<Local>,
}

impl ActionCommand {
    pub fn shutdown() -> Self {
        Self {
            kind: ActionKind::Shutdown,
            issued_at: Local::now(),
        }
    }
}

impl Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} issued at {}",
            self.kind,
            self.issued_at.format("%H:%M:%S.%3f")
        )
    }
}
