use thiserror::Error;

/// Errors reported by an action executor
#[derive(Debug, Error)]
pub enum ActionError {
    /// No program configured to run
    #[error("Empty action command")]
    EmptyCommand,

    /// The program could not be started
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure
    #[error("'{program}' exited unsuccessfully: {status}")]
    ExitStatus { program: String, status: String },

    /// Executor-specific failure
    #[error("Action failed: {0}")]
    Other(String),
}
