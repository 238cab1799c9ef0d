//! Landmark sources
//!
//! The pose-estimation model runs outside this process. [`JsonLinesSource`]
//! reads its output as one JSON object per frame:
//!
//! ```text
//! {"hands": [{"landmarks": [[x, y, z], ...], "score": 0.93}], "quit": false}
//! ```
//!
//! `hands` and `quit` may be omitted. `quit` is how the display side forwards
//! the Escape key.

use serde::Deserialize;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DetectionConfig;
use crate::hand::Landmark;

/// How long [`JsonLinesSource::next_frame`] waits before reporting
/// [`SourceError::Idle`]
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One hand as reported by the estimator, not yet validated
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub landmarks: Vec<Landmark>,
    pub score: Option<f32>,
}

/// Everything the loop receives for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub hand: Option<HandObservation>,
    /// Display collaborator asked to stop
    pub quit: bool,
}

impl FrameInput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hand(landmarks: Vec<Landmark>) -> Self {
        Self {
            hand: Some(HandObservation {
                landmarks,
                score: None,
            }),
            quit: false,
        }
    }

    pub fn quitting(mut self) -> Self {
        self.quit = true;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transient failure; the frame is skipped
    #[error("Failed to acquire frame: {0}")]
    Acquisition(String),

    /// No frame arrived yet; the caller may poll again
    #[error("No frame within the poll interval")]
    Idle,

    /// No more frames will arrive
    #[error("Landmark source closed")]
    Closed,
}

/// Supplies zero or one hand per frame
///
/// May block until the next frame. Sources that can stall should give up after
/// a bounded wait with [`SourceError::Idle`] so the caller can check for exit.
pub trait LandmarkSource: Send {
    fn next_frame(&mut self) -> Result<FrameInput, SourceError>;
}

#[derive(Deserialize)]
struct WireFrame {
    #[serde(default)]
    hands: Vec<WireHand>,
    #[serde(default)]
    quit: bool,
}

#[derive(Deserialize)]
struct WireHand {
    landmarks: Vec<Vec<f32>>,
    #[serde(default)]
    score: Option<f32>,
}

impl From<WireHand> for HandObservation {
    // A point without exactly three values is dropped, leaving a short pose
    fn from(hand: WireHand) -> Self {
        let landmarks = hand
            .landmarks
            .into_iter()
            .enumerate()
            .filter_map(|(index, point)| match <[f32; 3]>::try_from(point.as_slice()) {
                Ok(xyz) => Some(Landmark::from(xyz)),
                Err(_) => {
                    warn!(
                        "Dropping landmark {} with {} values, expected 3",
                        index,
                        point.len()
                    );
                    None
                }
            })
            .collect();
        Self {
            landmarks,
            score: hand.score,
        }
    }
}

/// Reads frames from a JSON-lines stream, typically stdin
///
/// Lines are read on a background thread so a stalled stream never blocks the
/// caller for longer than the poll interval.
///
/// Applies the detection settings on the way in: hands past `max_hands` are
/// dropped, a hand scoring below the active threshold counts as absent, and
/// landmarks are mirrored when `mirror_input` is set. The threshold is
/// `detection_confidence` for a new hand and `tracking_confidence` while the
/// previous frame had one.
pub struct JsonLinesSource {
    lines: Receiver<io::Result<String>>,
    settings: DetectionConfig,
    tracking: bool,
    poll_interval: Duration,
}

impl JsonLinesSource {
    pub fn spawn<R>(reader: R, settings: DetectionConfig) -> Result<Self, SourceError>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, lines) = mpsc::channel();
        thread::Builder::new()
            .name("landmark-reader".to_string())
            .spawn(move || read_lines(reader, tx))
            .map_err(|e| SourceError::Acquisition(format!("Failed to start reader: {}", e)))?;

        Ok(Self {
            lines,
            settings,
            tracking: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn read_wire_frame(&mut self) -> Result<WireFrame, SourceError> {
        loop {
            let line = match self.lines.recv_timeout(self.poll_interval) {
                Ok(Ok(line)) => line,
                Ok(Err(e)) => return Err(SourceError::Acquisition(e.to_string())),
                Err(RecvTimeoutError::Timeout) => return Err(SourceError::Idle),
                Err(RecvTimeoutError::Disconnected) => return Err(SourceError::Closed),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return serde_json::from_str(line)
                .map_err(|e| SourceError::Acquisition(format!("Malformed frame: {}", e)));
        }
    }

    fn select_hand(&mut self, hands: Vec<WireHand>) -> Option<HandObservation> {
        if hands.len() > self.settings.max_hands {
            debug!(
                "Frame reported {} hands, keeping {}",
                hands.len(),
                self.settings.max_hands
            );
        }

        let threshold = if self.tracking {
            self.settings.tracking_confidence
        } else {
            self.settings.detection_confidence
        };

        let hand = hands
            .into_iter()
            .take(self.settings.max_hands)
            .next()
            .filter(|hand| hand.score.map_or(true, |score| score >= threshold));
        self.tracking = hand.is_some();

        hand.map(|hand| {
            let mut hand = HandObservation::from(hand);
            if self.settings.mirror_input {
                hand.landmarks = hand.landmarks.into_iter().map(Landmark::mirrored).collect();
            }
            hand
        })
    }
}

impl LandmarkSource for JsonLinesSource {
    fn next_frame(&mut self) -> Result<FrameInput, SourceError> {
        let frame = self.read_wire_frame()?;
        let hand = self.select_hand(frame.hands);
        Ok(FrameInput {
            hand,
            quit: frame.quit,
        })
    }
}

// Forwards lines until EOF, a fatal read error, or the source is dropped.
// Invalid UTF-8 only spoils its own line.
fn read_lines<R: BufRead>(reader: R, lines: Sender<io::Result<String>>) {
    for line in reader.lines() {
        let fatal = matches!(&line, Err(e) if e.kind() != io::ErrorKind::InvalidData);
        if lines.send(line).is_err() || fatal {
            break;
        }
    }
    debug!("Landmark reader finished");
}
