//! Shared doubles for driving the frame loop with simulated frame time.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use handtrigger::action::{ActionCommand, ActionError, ActionExecutor, ActionKind};
use handtrigger::hand::landmarks::{
    INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP,
    THUMB_IP, THUMB_TIP,
};
use handtrigger::hand::{Landmark, LANDMARK_COUNT};
use handtrigger::monitor::{
    FrameInput, GestureMonitor, Initializing, LandmarkSource, ManualClock, Overlay, OverlayFrame,
    SourceError,
};
use handtrigger::trigger::{ReleasePolicy, TriggerStateMachine};
use tokio_util::sync::CancellationToken;

pub const TARGET: [bool; 5] = [false, false, true, false, false];
pub const OPEN_HAND: [bool; 5] = [true; 5];

/// Landmarks of an upright, mirrored hand showing the given finger pattern
pub fn hand_landmarks(pattern: [bool; 5]) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];

    points[THUMB_IP] = Landmark::new(0.40, 0.55, 0.0);
    points[THUMB_TIP] = if pattern[0] {
        Landmark::new(0.30, 0.50, 0.0)
    } else {
        Landmark::new(0.45, 0.60, 0.0)
    };

    let fingers = [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ];
    for (i, (tip, pip)) in fingers.into_iter().enumerate() {
        points[pip] = Landmark::new(0.5, 0.50, 0.0);
        points[tip] = if pattern[i + 1] {
            Landmark::new(0.5, 0.30, 0.0)
        } else {
            Landmark::new(0.5, 0.60, 0.0)
        };
    }
    points
}

pub fn hand_frame(pattern: [bool; 5]) -> FrameInput {
    FrameInput::with_hand(hand_landmarks(pattern))
}

/// Plays back frames, moving the shared clock to each frame's timestamp
pub struct ScriptedSource {
    frames: VecDeque<(u64, Result<FrameInput, SourceError>)>,
    clock: ManualClock,
    cancel_at: Option<(u64, CancellationToken)>,
}

impl ScriptedSource {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            frames: VecDeque::new(),
            clock,
            cancel_at: None,
        }
    }

    pub fn frame(mut self, at_ms: u64, frame: FrameInput) -> Self {
        self.frames.push_back((at_ms, Ok(frame)));
        self
    }

    pub fn failure(mut self, at_ms: u64) -> Self {
        self.frames.push_back((
            at_ms,
            Err(SourceError::Acquisition("camera read failed".to_string())),
        ));
        self
    }

    /// Repeats `frame` every `step_ms` over `[from_ms, to_ms]`
    pub fn hold(mut self, from_ms: u64, to_ms: u64, step_ms: u64, frame: FrameInput) -> Self {
        let mut at = from_ms;
        while at <= to_ms {
            self.frames.push_back((at, Ok(frame.clone())));
            at += step_ms;
        }
        self
    }

    /// Cancels `token` when the frame at `at_ms` is delivered, like Ctrl-C
    pub fn cancel_at(mut self, at_ms: u64, token: CancellationToken) -> Self {
        self.cancel_at = Some((at_ms, token));
        self
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<FrameInput, SourceError> {
        let (at_ms, frame) = self.frames.pop_front().ok_or(SourceError::Closed)?;
        self.clock.set_ms(at_ms);
        if let Some((cancel_ms, token)) = &self.cancel_at {
            if *cancel_ms == at_ms {
                token.cancel();
            }
        }
        frame
    }
}

/// Byte stream that blocks until fed, like a pipe whose writer went quiet.
/// Reads return EOF once the sender is dropped.
pub struct FeedReader(Receiver<Vec<u8>>);

impl FeedReader {
    pub fn pair() -> (Sender<Vec<u8>>, Self) {
        let (feed, rx) = mpsc::channel();
        (feed, Self(rx))
    }
}

impl Read for FeedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.recv() {
            Ok(bytes) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
            Err(_) => Ok(0),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingOverlay {
    pub frames: Arc<Mutex<Vec<OverlayFrame>>>,
}

impl Overlay for RecordingOverlay {
    fn render(&mut self, frame: &OverlayFrame) {
        self.frames.lock().unwrap().push(*frame);
    }
}

#[derive(Clone, Default)]
pub struct RecordingExecutor {
    pub executed: Arc<Mutex<Vec<ActionKind>>>,
    pub fail: bool,
}

impl RecordingExecutor {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.executed.lock().unwrap().len()
    }
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, command: &ActionCommand) -> Result<(), ActionError> {
        self.executed.lock().unwrap().push(command.kind);
        if self.fail {
            Err(ActionError::Other("power-off refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub struct Harness {
    pub clock: ManualClock,
    pub overlay: RecordingOverlay,
    pub executor: RecordingExecutor,
    pub exit: CancellationToken,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_executor(RecordingExecutor::default())
    }

    pub fn with_executor(executor: RecordingExecutor) -> Self {
        Self {
            clock: ManualClock::new(),
            overlay: RecordingOverlay::default(),
            executor,
            exit: CancellationToken::new(),
        }
    }

    pub fn source(&self) -> ScriptedSource {
        ScriptedSource::new(self.clock.clone())
    }

    pub fn monitor(
        &self,
        source: impl LandmarkSource + 'static,
        policy: ReleasePolicy,
    ) -> GestureMonitor<Initializing> {
        GestureMonitor::create(
            Box::new(source),
            Box::new(self.overlay.clone()),
            Box::new(self.executor.clone()),
            Box::new(self.clock.clone()),
            TriggerStateMachine::new(std::time::Duration::from_millis(3000), policy),
            self.exit.clone(),
        )
    }
}
