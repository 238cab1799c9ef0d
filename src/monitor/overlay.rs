use std::fmt::{self, Display};
use std::time::Duration;
use tracing::info;

use crate::gesture::GestureLabel;
use crate::hand::FingerStates;
use crate::trigger::TriggerState;

pub const TARGET_TEXT: &str = "TARGET GESTURE DETECTED";
pub const NO_TARGET_TEXT: &str = "NO TARGET GESTURE";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayColor {
    Red,
    Green,
}

impl OverlayColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            OverlayColor::Red => (255, 0, 0),
            OverlayColor::Green => (0, 255, 0),
        }
    }
}

/// The single label drawn over the video frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayText {
    pub text: &'static str,
    pub color: OverlayColor,
}

impl OverlayText {
    /// Red while the gesture is seen or a trigger is pending/latched, green otherwise
    pub fn for_frame(label: GestureLabel, state: &TriggerState) -> Self {
        if label.is_target() || state.is_armed() || state.is_cooldown() {
            Self {
                text: TARGET_TEXT,
                color: OverlayColor::Red,
            }
        } else {
            Self {
                text: NO_TARGET_TEXT,
                color: OverlayColor::Green,
            }
        }
    }
}

impl Display for OverlayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.text, self.color)
    }
}

/// What the display collaborator gets after each processed frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFrame {
    pub label: GestureLabel,
    pub state: TriggerState,
    pub finger_states: Option<FingerStates>,
    /// Time left before an armed trigger commits
    pub remaining: Option<Duration>,
    pub text: OverlayText,
}

/// Render/display collaborator. Observes state only.
pub trait Overlay: Send {
    fn render(&mut self, frame: &OverlayFrame);
}

/// Logs the overlay label whenever it changes, plus a per-second countdown
/// while armed
#[derive(Debug, Default)]
pub struct LogOverlay {
    last: Option<OverlayText>,
    last_countdown: Option<u64>,
}

impl LogOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Overlay for LogOverlay {
    fn render(&mut self, frame: &OverlayFrame) {
        if self.last != Some(frame.text) {
            match frame.finger_states {
                Some(states) => info!("{} | fingers {}", frame.text, states),
                None => info!("{}", frame.text),
            }
            self.last = Some(frame.text);
        }

        let countdown = frame.remaining.map(countdown_secs);
        if let Some(secs) = countdown.filter(|secs| self.last_countdown != Some(*secs)) {
            info!("Armed, committing in {}s", secs);
        }
        self.last_countdown = countdown;
    }
}

/// Whole seconds left, rounded up so the last second reads 1
pub fn countdown_secs(remaining: Duration) -> u64 {
    let millis = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
    millis.div_ceil(1000)
}
