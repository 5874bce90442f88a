//! Error codes and exit status for carebotctl

use carebot_common::ConfigError;
use thiserror::Error;

/// Exit code when daemon returns invalid JSON
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// Exit code when daemon is unavailable/unreachable
pub const EXIT_DAEMON_UNAVAILABLE: i32 = 70;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

#[derive(Debug, Error)]
pub enum CtlError {
    #[error("daemon unavailable: {0}")]
    DaemonUnavailable(String),

    #[error("invalid daemon response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start: {0:#}")]
    Startup(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CtlError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DaemonUnavailable(_) => EXIT_DAEMON_UNAVAILABLE,
            Self::InvalidResponse(_) => EXIT_INVALID_RESPONSE,
            Self::Config(_) | Self::Startup(_) | Self::Io(_) => EXIT_GENERAL_ERROR,
        }
    }
}
