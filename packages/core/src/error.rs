//! Error types for action dispatch.

use std::io;

use crate::path::PathError;
use crate::reply::{Outcome, Reply};
use crate::request::Action;

/// Reasons an action can fail.
///
/// Every variant maps to a fixed reply text (see [`ActionError::client_text`]).
/// Underlying I/O errors are kept for logging but never shown to callers.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A required parameter was absent or empty.
    #[error("{action}: missing required parameter")]
    Missing { action: Action },

    /// A filename could not be resolved inside the store root.
    #[error("{action}: {source}")]
    InvalidName {
        action: Action,
        #[source]
        source: PathError,
    },

    /// The target file does not exist.
    #[error("{action}: {source}")]
    NotFound {
        action: Action,
        #[source]
        source: io::Error,
    },

    /// Any other filesystem failure.
    #[error("{action}: {source}")]
    Io {
        action: Action,
        #[source]
        source: io::Error,
    },
}

impl ActionError {
    /// Classify a filesystem error raised while performing `action`.
    pub fn from_io(action: Action, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ActionError::NotFound { action, source }
        } else {
            ActionError::Io { action, source }
        }
    }

    /// Classify a resolver failure. Empty names read as a missing parameter.
    pub fn from_path(action: Action, source: PathError) -> Self {
        match source {
            PathError::Empty => ActionError::Missing { action },
            source => ActionError::InvalidName { action, source },
        }
    }

    pub fn action(&self) -> Action {
        match self {
            ActionError::Missing { action }
            | ActionError::InvalidName { action, .. }
            | ActionError::NotFound { action, .. }
            | ActionError::Io { action, .. } => *action,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            ActionError::Missing { .. } | ActionError::InvalidName { .. } => Outcome::Invalid,
            ActionError::NotFound { .. } => Outcome::NotFound,
            ActionError::Io { .. } => Outcome::Failed,
        }
    }

    /// The fixed text sent back to the caller.
    pub fn client_text(&self) -> &'static str {
        match self {
            ActionError::Missing { action } => action.missing_text(),
            ActionError::InvalidName { action, .. } => action.invalid_text(),
            ActionError::NotFound { action, .. } | ActionError::Io { action, .. } => {
                action.failure_text()
            }
        }
    }

    /// Record the failure server-side. Validation problems are expected
    /// traffic; filesystem failures are not.
    pub(crate) fn log(&self) {
        match self {
            ActionError::Missing { .. } | ActionError::InvalidName { .. } => {
                tracing::debug!(error = %self, "rejected request");
            }
            ActionError::NotFound { .. } => {
                tracing::info!(error = %self, "file not found");
            }
            ActionError::Io { .. } => {
                tracing::warn!(error = %self, "filesystem operation failed");
            }
        }
    }
}

impl From<ActionError> for Reply {
    fn from(error: ActionError) -> Self {
        Reply::new(error.outcome(), error.client_text())
    }
}
