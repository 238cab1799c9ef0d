//! Hand-gesture trigger
//!
//! Watches a stream of hand poses, classifies the finger pattern of each frame
//! and commits a shutdown once the target gesture has been held for the arming
//! delay.
//!
//! ```text
//! LandmarkSource ──► hand ──► gesture ──► trigger ──► action
//!                        (monitor drives one frame at a time)
//! ```

pub mod action;
pub mod config;
pub mod gesture;
pub mod hand;
pub mod monitor;
pub mod trigger;
