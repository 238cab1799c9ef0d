//! Hand pose subsystem
//!
//! Turns one detected hand into a discrete finger pattern:
//!
//! 1. [`landmarks`] - 21-point hand pose with the fixed anatomical topology
//! 2. [`finger_state`] - geometric extended/folded heuristic per finger
//!
//! # Architecture
//!
//! ```text
//! Vec<Landmark> ──► HandPose ──► FingerStates
//!                 (validated)   [thumb, index, middle, ring, pinky]
//! ```

pub mod finger_state;
pub mod landmarks;

pub use finger_state::{extract, Finger, FingerStates};
pub use landmarks::{HandPose, Landmark, PoseError, LANDMARK_COUNT};
