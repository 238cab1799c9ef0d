//! One-shot, debounced trigger driven by per-frame gesture labels
//!
//! # State Machine
//!
//! ```text
//!          Target                 elapsed >= arming delay
//! Idle ───────────► Armed ─────────────────────────────► Cooldown
//!  ▲                  │            (emit ActionCommand)      │
//!  │                  │ release (cancel policy only)         │
//!  ├──────────────────┘                                      │
//!  └─────────────────────────────────────────────────────────┘
//!                        first non-Target label
//! ```
//!
//! The arming delay is a timestamp comparison made once per frame, so frame
//! intake never stalls while a trigger is pending.

pub mod state_machine;

pub use state_machine::{ReleasePolicy, TriggerState, TriggerStateMachine, DEFAULT_ARMING_DELAY};
