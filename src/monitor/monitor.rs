//! Frame-loop controller with statum lifecycle
//!
//! ```text
//! Initializing ──start()──► Running ──run()──► Stopped(StopReason)
//! ```
//!
//! One `step` per frame: acquire, extract, classify, advance the trigger,
//! render, then execute a committed action. The exit signal is checked before
//! every frame and after every idle poll, independent of trigger state.

use statum::{machine, state};
use std::fmt::{self, Display};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::clock::Clock;
use super::error::MonitorError;
use super::overlay::{Overlay, OverlayFrame, OverlayText};
use super::source::{FrameInput, LandmarkSource, SourceError};
use crate::action::{ActionExecutor, ActionKind};
use crate::gesture::{classify, GestureLabel};
use crate::hand::{extract, FingerStates, HandPose, Landmark};
use crate::trigger::{TriggerState, TriggerStateMachine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Escape on the display or Ctrl-C
    ExitRequested,
    /// The landmark stream ended
    SourceClosed,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::ExitRequested => write!(f, "exit requested"),
            StopReason::SourceClosed => write!(f, "source closed"),
        }
    }
}

/// Counters kept across the life of the loop
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub frames: u64,
    pub skipped_frames: u64,
    pub invalid_poses: u64,
    pub commands: u64,
    pub failed_actions: u64,
}

/// Result of one processed frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub label: GestureLabel,
    pub state: TriggerState,
    /// Action committed on this frame, executed successfully
    pub committed: Option<ActionKind>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Processed(FrameReport),
    /// Acquisition failed; trigger state untouched
    Skipped,
    /// No frame arrived within the source's poll interval
    Idle,
    SourceClosed,
}

#[state]
#[derive(Debug, Clone)]
pub enum MonitorState {
    Initializing,
    Running,
    Stopped(StopReason),
}

#[machine]
pub struct GestureMonitor<S: MonitorState> {
    source: Box<dyn LandmarkSource>,
    overlay: Box<dyn Overlay>,
    executor: Box<dyn ActionExecutor>,
    clock: Box<dyn Clock>,
    trigger: TriggerStateMachine,
    exit: CancellationToken,
    summary: MonitorSummary,
}

impl<S: MonitorState> GestureMonitor<S> {
    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    pub fn summary(&self) -> &MonitorSummary {
        &self.summary
    }
}

impl GestureMonitor<Initializing> {
    pub fn create(
        source: Box<dyn LandmarkSource>,
        overlay: Box<dyn Overlay>,
        executor: Box<dyn ActionExecutor>,
        clock: Box<dyn Clock>,
        trigger: TriggerStateMachine,
        exit: CancellationToken,
    ) -> Self {
        debug!(
            "Creating gesture monitor: arming delay {}ms, release policy {:?}, executor {}",
            trigger.arming_delay().as_millis(),
            trigger.release_policy(),
            executor.name()
        );
        Self::new(
            source,
            overlay,
            executor,
            clock,
            trigger,
            exit,
            MonitorSummary::default(),
        )
    }

    pub fn start(self) -> GestureMonitor<Running> {
        info!(
            "Gesture monitor running, executor: {}",
            self.executor.name()
        );
        self.transition()
    }
}

impl GestureMonitor<Running> {
    /// Process frames until an exit is requested or the source closes
    ///
    /// Action failures are logged and counted; they never end the loop.
    pub fn run(mut self) -> GestureMonitor<Stopped> {
        let reason = loop {
            if self.exit.is_cancelled() {
                break StopReason::ExitRequested;
            }

            match self.step() {
                Ok(StepOutcome::SourceClosed) => break StopReason::SourceClosed,
                Ok(StepOutcome::Processed(_) | StepOutcome::Skipped | StepOutcome::Idle) => {}
                Err(e) => error!("{}", e),
            }
        };

        info!(
            "Gesture monitor stopped ({}): {} frames, {} skipped, {} commands, {} failed",
            reason,
            self.summary.frames,
            self.summary.skipped_frames,
            self.summary.commands,
            self.summary.failed_actions
        );
        self.transition_with(reason)
    }

    /// Process exactly one frame
    pub fn step(&mut self) -> Result<StepOutcome, MonitorError> {
        let input = match self.source.next_frame() {
            Ok(input) => input,
            Err(SourceError::Closed) => {
                info!("Landmark source closed");
                return Ok(StepOutcome::SourceClosed);
            }
            Err(SourceError::Idle) => return Ok(StepOutcome::Idle),
            Err(e) => {
                warn!("Skipping frame: {}", e);
                self.summary.skipped_frames += 1;
                return Ok(StepOutcome::Skipped);
            }
        };
        self.summary.frames += 1;

        let FrameInput { hand, quit } = input;
        let finger_states = hand.and_then(|hand| self.finger_states(hand.landmarks));
        let label = classify(finger_states.as_ref());

        let now = self.clock.now();
        let command = self.trigger.on_frame(label, now);
        let state = self.trigger.state();

        self.overlay.render(&OverlayFrame {
            label,
            state,
            finger_states,
            remaining: self.trigger.remaining(now),
            text: OverlayText::for_frame(label, &state),
        });

        if quit {
            info!("Quit requested by display");
            self.exit.cancel();
        }

        let mut committed = None;
        if let Some(command) = command {
            self.summary.commands += 1;
            if let Err(source) = self.executor.execute(&command) {
                self.summary.failed_actions += 1;
                return Err(MonitorError::ActionFailed {
                    kind: command.kind,
                    source,
                });
            }
            committed = Some(command.kind);
        }

        Ok(StepOutcome::Processed(FrameReport {
            label,
            state,
            committed,
        }))
    }

    // A malformed pose is treated as no hand
    fn finger_states(&mut self, landmarks: Vec<Landmark>) -> Option<FingerStates> {
        match HandPose::try_from(landmarks) {
            Ok(pose) => Some(extract(&pose)),
            Err(e) => {
                warn!("{}, treating frame as empty", e);
                self.summary.invalid_poses += 1;
                None
            }
        }
    }
}

impl GestureMonitor<Stopped> {
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.get_state_data().copied()
    }
}
