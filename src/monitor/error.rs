use thiserror::Error;

use crate::action::{ActionError, ActionKind};

/// Errors surfaced by one frame-loop step
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The executor failed to run a committed action. It is not retried and the
    /// trigger stays in cooldown.
    #[error("Action {kind} failed: {source}")]
    ActionFailed {
        kind: ActionKind,
        #[source]
        source: ActionError,
    },
}
