//! Gesture classification from finger patterns.

pub mod classifier;

pub use classifier::{classify, GestureLabel, TARGET_PATTERN};
