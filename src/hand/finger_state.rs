//! Extended/folded classification per finger
//!
//! A cheap geometric heuristic, not a trained model. It assumes an upright hand
//! facing the camera in a mirrored image and is sensitive to hand rotation.

use std::fmt;

use super::landmarks::{
    HandPose, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// (tip, reference joint) landmark indices
    fn landmark_pair(self) -> (usize, usize) {
        match self {
            Finger::Thumb => (THUMB_TIP, THUMB_IP),
            Finger::Index => (INDEX_TIP, INDEX_PIP),
            Finger::Middle => (MIDDLE_TIP, MIDDLE_PIP),
            Finger::Ring => (RING_TIP, RING_PIP),
            Finger::Pinky => (PINKY_TIP, PINKY_PIP),
        }
    }
}

/// Extension flags in `[thumb, index, middle, ring, pinky]` order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct FingerStates(pub [bool; 5]);

impl FingerStates {
    pub const fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }
}

impl fmt::Display for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, extended) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", u8::from(*extended))?;
        }
        write!(f, "]")
    }
}

/// Derive the finger pattern of one hand pose
///
/// The thumb folds sideways, so it is compared on x (tip left of the IP joint
/// means extended). The other fingers fold downward and are compared on y (tip
/// above the PIP joint means extended; image y grows downward).
pub fn extract(pose: &HandPose) -> FingerStates {
    let mut states = [false; 5];
    for finger in Finger::ALL {
        let (tip, joint) = finger.landmark_pair();
        let (tip, joint) = (pose.at(tip), pose.at(joint));
        states[finger as usize] = match finger {
            Finger::Thumb => tip.x < joint.x,
            _ => tip.y < joint.y,
        };
    }
    FingerStates(states)
}
