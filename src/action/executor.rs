use std::process::Command;
use tracing::{info, warn};

use super::{ActionCommand, ActionError};
use crate::config::ActionConfig;

/// Capability to run a committed [`ActionCommand`]
///
/// Called at most once per armed episode. Implementations must not retry on
/// failure; the error is returned to the frame loop as is.
pub trait ActionExecutor: Send {
    fn execute(&mut self, command: &ActionCommand) -> Result<(), ActionError>;

    fn name(&self) -> &str {
        "executor"
    }
}

/// Runs an OS command for each action
#[derive(Clone, Debug)]
pub struct SystemExecutor {
    argv: Vec<String>,
}

impl SystemExecutor {
    /// Executor running an explicit argv, program first
    pub fn new(argv: Vec<String>) -> Result<Self, ActionError> {
        if argv.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(ActionError::EmptyCommand);
        }
        Ok(Self { argv })
    }

    /// The immediate power-off command for the current platform
    pub fn platform_shutdown() -> Self {
        let argv: &[&str] = if cfg!(windows) {
            &["shutdown", "/s", "/t", "0"]
        } else {
            &["shutdown", "-h", "now"]
        };
        Self {
            argv: argv.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl ActionExecutor for SystemExecutor {
    fn execute(&mut self, command: &ActionCommand) -> Result<(), ActionError> {
        let (program, args) = self.argv.split_first().ok_or(ActionError::EmptyCommand)?;
        info!("Executing {}: {} {}", command, program, args.join(" "));

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| ActionError::Spawn {
                program: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ActionError::ExitStatus {
                program: program.clone(),
                status: status.to_string(),
            })
        }
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// Logs commands instead of running them
#[derive(Clone, Debug, Default)]
pub struct DryRunExecutor {
    executed: usize,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> usize {
        self.executed
    }
}

impl ActionExecutor for DryRunExecutor {
    fn execute(&mut self, command: &ActionCommand) -> Result<(), ActionError> {
        self.executed += 1;
        warn!("Dry run, not executing {}", command);
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}

/// Build the executor selected by the `[action]` config section
pub fn executor_for(config: &ActionConfig) -> Result<Box<dyn ActionExecutor>, ActionError> {
    if config.dry_run {
        return Ok(Box::new(DryRunExecutor::new()));
    }
    match &config.command {
        Some(argv) => Ok(Box::new(SystemExecutor::new(argv.clone())?)),
        None => Ok(Box::new(SystemExecutor::platform_shutdown())),
    }
}
