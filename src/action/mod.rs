//! Execution of committed trigger actions
//!
//! The trigger only produces an [`ActionCommand`]; running it is delegated to an
//! [`ActionExecutor`] so the frame loop can be driven without touching the OS.
//!
//! - [`SystemExecutor`] - runs the platform shutdown command
//! - [`DryRunExecutor`] - logs the command and does nothing else

pub mod command;
pub mod error;
pub mod executor;

pub use command::{ActionCommand, ActionKind};
pub use error::ActionError;
pub use executor::{executor_for, ActionExecutor, DryRunExecutor, SystemExecutor};
