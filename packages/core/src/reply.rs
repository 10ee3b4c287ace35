//! Dispatcher results.

use std::fmt;

/// Coarse classification of a reply, for callers that want more than the
/// body text (the HTTP layer uses it to pick a status code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The action ran and succeeded.
    Success,
    /// No recognized action; the body is the help text.
    Help,
    /// A parameter was missing or unusable. Nothing was touched.
    Invalid,
    /// The target file does not exist.
    NotFound,
    /// The filesystem call failed.
    Failed,
    /// The dispatcher could not run at all.
    Internal,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::Help)
    }
}

/// Text body plus its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    outcome: Outcome,
    body: String,
}

impl Reply {
    pub fn new(outcome: Outcome, body: impl Into<String>) -> Self {
        Self {
            outcome,
            body: body.into(),
        }
    }

    pub fn success(body: impl Into<String>) -> Self {
        Self::new(Outcome::Success, body)
    }

    /// The listing of every supported action.
    pub fn help() -> Self {
        Self::new(Outcome::Help, crate::HELP_TEXT)
    }

    /// Fixed reply for when dispatch itself could not complete.
    pub fn internal() -> Self {
        Self::new(Outcome::Internal, "Internal error")
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
