use std::process::ExitStatus;

pub type ProvisionResult<T> = Result<T, ProvisionError>;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("command failed: {command}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("administrative privileges required, re-run with sudo")]
    NotRoot,

    #[error("project directory missing: {0}")]
    ProjectMissing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProvisionError {
    /// Exit code surfaced by the binary: a failed child's own code
    /// when it has one, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CommandFailed { status, .. } => status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .unwrap_or(1),
            _ => 1,
        }
    }
}

/// Outcome of a provisioning step that is allowed to degrade.
///
/// The optional extras (local database, firewall rules, TLS
/// issuance) report failure as a value instead of an error, so the
/// orchestrator can log it and keep the run going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped(String),
    Tolerated(String),
}
