//! Typed action requests built from raw query parameters.

use std::collections::HashMap;
use std::fmt;

use crate::error::ActionError;

/// Raw query parameters, as parsed from the request's query string.
pub type Params = HashMap<String, String>;

/// The fixed set of operations a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Delete,
    List,
    Rename,
    Meta,
    SystemInfo,
    /// Absent or unrecognized action names. Answered with the help text.
    Unknown,
}

impl Action {
    /// Every supported action, in the order the help text lists them.
    pub const SUPPORTED: [Action; 7] = [
        Action::Create,
        Action::Read,
        Action::Delete,
        Action::List,
        Action::Rename,
        Action::Meta,
        Action::SystemInfo,
    ];

    /// Parse an action name. Matching is exact; anything else is `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name {
            "create" => Action::Create,
            "read" => Action::Read,
            "delete" => Action::Delete,
            "list" => Action::List,
            "rename" => Action::Rename,
            "meta" => Action::Meta,
            "systeminfo" => Action::SystemInfo,
            _ => Action::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Delete => "delete",
            Action::List => "list",
            Action::Rename => "rename",
            Action::Meta => "meta",
            Action::SystemInfo => "systeminfo",
            Action::Unknown => "unknown",
        }
    }

    /// Reply text when a required parameter is absent or empty.
    pub(crate) fn missing_text(&self) -> &'static str {
        match self {
            Action::Create => "Missing filename or content",
            Action::Rename => "Missing oldname or newname",
            _ => "Missing filename",
        }
    }

    /// Reply text when a filename is present but cannot be resolved inside
    /// the store root.
    pub(crate) fn invalid_text(&self) -> &'static str {
        match self {
            Action::Rename => "Invalid oldname or newname",
            _ => "Invalid filename",
        }
    }

    /// Reply text when the filesystem call itself fails.
    pub(crate) fn failure_text(&self) -> &'static str {
        match self {
            Action::Create => "Error creating file",
            Action::Read | Action::Meta => "File not found",
            Action::Delete => "Cannot delete file",
            Action::List => "Error listing files",
            Action::Rename => "Rename failed",
            Action::SystemInfo | Action::Unknown => "Internal error",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action name plus its still-unvalidated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: Action,
    pub params: Params,
}

impl ActionRequest {
    pub fn new(action: Action, params: Params) -> Self {
        Self { action, params }
    }

    /// Build a request from the full query mapping. The `action` key selects
    /// the operation; the remaining keys stay available as parameters.
    pub fn from_query(mut params: Params) -> Self {
        let action = params
            .remove("action")
            .map_or(Action::Unknown, |name| Action::parse(&name));
        Self { action, params }
    }

    /// Builder-style parameter setter, handy for callers that do not start
    /// from a query string.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter. Empty values count as absent.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Check that every parameter the action needs is present and produce
    /// the typed command. Nothing touches the filesystem here.
    pub fn into_command(mut self) -> Result<Command, ActionError> {
        let action = self.action;
        let mut take = |key: &str| {
            self.params
                .remove(key)
                .filter(|value| !value.is_empty())
                .ok_or(ActionError::Missing { action })
        };

        let command = match action {
            Action::Create => {
                let name = take("name");
                let content = take("content");
                Command::Create {
                    name: name?,
                    content: content?,
                }
            }
            Action::Read => Command::Read { name: take("name")? },
            Action::Delete => Command::Delete { name: take("name")? },
            Action::List => Command::List,
            Action::Rename => {
                let oldname = take("oldname");
                let newname = take("newname");
                Command::Rename {
                    oldname: oldname?,
                    newname: newname?,
                }
            }
            Action::Meta => Command::Meta { name: take("name")? },
            Action::SystemInfo => Command::SystemInfo,
            Action::Unknown => Command::Help,
        };

        Ok(command)
    }
}

/// A validated request: every required parameter is present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { name: String, content: String },
    Read { name: String },
    Delete { name: String },
    List,
    Rename { oldname: String, newname: String },
    Meta { name: String },
    SystemInfo,
    Help,
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Command::Create { .. } => Action::Create,
            Command::Read { .. } => Action::Read,
            Command::Delete { .. } => Action::Delete,
            Command::List => Action::List,
            Command::Rename { .. } => Action::Rename,
            Command::Meta { .. } => Action::Meta,
            Command::SystemInfo => Action::SystemInfo,
            Command::Help => Action::Unknown,
        }
    }
}
