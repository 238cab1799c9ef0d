//! Frame loop and its external collaborators
//!
//! 1. [`source`] - per-frame hand landmarks from the pose estimator
//! 2. [`monitor`] - the loop itself, owning the trigger state
//! 3. [`overlay`] - label shown to the user
//! 4. [`clock`] - monotonic time for the arming delay
//!
//! ```text
//! LandmarkSource ──► extract ──► classify ──► TriggerStateMachine ──► ActionExecutor
//!                                     │                │
//!                                     └──► Overlay ◄───┘
//! ```

pub mod clock;
pub mod error;
#[allow(clippy::module_inception)]
pub mod monitor;
pub mod overlay;
pub mod source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::MonitorError;
pub use monitor::{
    FrameReport, GestureMonitor, Initializing, MonitorState, MonitorSummary, Running, StepOutcome,
    StopReason, Stopped,
};
pub use overlay::{
    countdown_secs, LogOverlay, Overlay, OverlayColor, OverlayFrame, OverlayText, NO_TARGET_TEXT,
    TARGET_TEXT,
};
pub use source::{
    FrameInput, HandObservation, JsonLinesSource, LandmarkSource, SourceError,
    DEFAULT_POLL_INTERVAL,
};
