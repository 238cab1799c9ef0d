use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::action::ActionCommand;
use crate::gesture::GestureLabel;

pub const DEFAULT_ARMING_DELAY: Duration = Duration::from_millis(3000);

/// What an armed trigger does when the gesture is released before the delay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleasePolicy {
    /// Once armed, commit when the delay elapses no matter what is observed
    #[default]
    Commit,
    /// Any non-Target frame while armed returns the trigger to idle
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Armed { armed_at: Instant },
    Cooldown,
}

impl TriggerState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TriggerState::Idle)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, TriggerState::Armed { .. })
    }

    pub fn is_cooldown(&self) -> bool {
        matches!(self, TriggerState::Cooldown)
    }
}

impl Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerState::Idle => write!(f, "Idle"),
            TriggerState::Armed { .. } => write!(f, "Armed"),
            TriggerState::Cooldown => write!(f, "Cooldown"),
        }
    }
}

/// Trigger state owned by the frame loop
///
/// Emits at most one [`ActionCommand`] per armed episode. After a commit the
/// machine latches in `Cooldown` until the gesture is released, so holding the
/// gesture never fires twice.
#[derive(Debug, Clone)]
pub struct TriggerStateMachine {
    state: TriggerState,
    arming_delay: Duration,
    release_policy: ReleasePolicy,
}

impl Default for TriggerStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_ARMING_DELAY, ReleasePolicy::default())
    }
}

impl TriggerStateMachine {
    pub fn new(arming_delay: Duration, release_policy: ReleasePolicy) -> Self {
        Self {
            state: TriggerState::Idle,
            arming_delay,
            release_policy,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn arming_delay(&self) -> Duration {
        self.arming_delay
    }

    pub fn release_policy(&self) -> ReleasePolicy {
        self.release_policy
    }

    /// Time left before an armed trigger commits, `None` unless armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TriggerState::Armed { armed_at } => Some(
                self.arming_delay
                    .saturating_sub(now.saturating_duration_since(armed_at)),
            ),
            _ => None,
        }
    }

    /// Advance the machine by one frame
    ///
    /// `now` must come from a monotonic clock. Returns the command to execute
    /// on the frame where an armed episode commits, `None` on every other frame.
    pub fn on_frame(&mut self, label: GestureLabel, now: Instant) -> Option<ActionCommand> {
        match self.state {
            TriggerState::Idle => {
                if label.is_target() {
                    info!(
                        "Target gesture detected, arming trigger for {}ms",
                        self.arming_delay.as_millis()
                    );
                    self.state = TriggerState::Armed { armed_at: now };
                }
                None
            }
            TriggerState::Armed { armed_at } => {
                if self.release_policy == ReleasePolicy::Cancel && !label.is_target() {
                    info!("Gesture released while armed ({}), disarming", label);
                    self.state = TriggerState::Idle;
                    return None;
                }

                let elapsed = now.saturating_duration_since(armed_at);
                if elapsed >= self.arming_delay {
                    let command = ActionCommand::shutdown();
                    info!(
                        "Arming delay elapsed after {}ms, committing {}",
                        elapsed.as_millis(),
                        command.kind
                    );
                    self.state = TriggerState::Cooldown;
                    Some(command)
                } else {
                    debug!(
                        "Trigger armed, {}ms of {}ms elapsed",
                        elapsed.as_millis(),
                        self.arming_delay.as_millis()
                    );
                    None
                }
            }
            TriggerState::Cooldown => {
                if !label.is_target() {
                    info!("Gesture released ({}), trigger ready again", label);
                    self.state = TriggerState::Idle;
                }
                None
            }
        }
    }
}
