use std::fmt::{self, Display};

use crate::hand::FingerStates;

/// The single pattern that counts as the trigger gesture: middle finger only
pub const TARGET_PATTERN: FingerStates = FingerStates::new([false, false, true, false, false]);

/// Classification result for one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureLabel {
    /// No hand in this frame
    #[default]
    None,
    /// Hand matches [`TARGET_PATTERN`] exactly
    Target,
    /// Hand present, any other pattern
    Other,
}

impl GestureLabel {
    pub fn is_target(self) -> bool {
        self == GestureLabel::Target
    }
}

impl Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureLabel::None => write!(f, "None"),
            GestureLabel::Target => write!(f, "Target"),
            GestureLabel::Other => write!(f, "Other"),
        }
    }
}

/// Map an optional finger pattern to a label. Pure and total.
pub fn classify(states: Option<&FingerStates>) -> GestureLabel {
    match states {
        None => GestureLabel::None,
        Some(states) if *states == TARGET_PATTERN => GestureLabel::Target,
        Some(_) => GestureLabel::Other,
    }
}
