//! Error types for watchdog operations.
//!
//! Every error here means "there is nothing to drive": register writes
//! themselves cannot fail. Callers that run the same code on every board
//! are free to ignore them.

use thiserror::Error;

/// Errors that can occur during watchdog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WatchdogError {
    /// The board has no timer block configured.
    #[error("no GPTIMER block configured")]
    NoTimerBlock,

    /// The timer block has no channel to spare beyond the system tick.
    #[error("GPTIMER implements {implemented} channel(s), at least 2 are needed for a watchdog")]
    NoSpareChannel {
        /// Channels reported by the configuration register.
        implemented: usize,
    },

    /// No watchdog exists at the requested index.
    #[error("no watchdog at index {id}")]
    NotPresent {
        /// The requested watchdog index.
        id: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub const fn invalid_configuration(msg: &'static str) -> Self {
        Self::InvalidConfiguration(msg)
    }

    /// Whether the error only reports missing hardware.
    #[must_use]
    pub const fn is_absence(&self) -> bool {
        matches!(
            self,
            Self::NoTimerBlock | Self::NoSpareChannel { .. } | Self::NotPresent { .. }
        )
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = core::result::Result<T, WatchdogError>;
