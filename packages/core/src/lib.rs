//! # dirstore-core
//!
//! The request-to-filesystem dispatcher behind the dirstore file store:
//!
//! - [`StoreRoot`]: the one directory every operation is confined to, and the
//!   resolver that turns caller-supplied names into paths inside it
//! - [`ActionRequest`]: an action name plus raw parameters, validated into a
//!   typed [`Command`]
//! - [`Dispatcher`]: runs one command against the filesystem and produces a
//!   text [`Reply`]
//!
//! # Example
//!
//! ```rust
//! use dirstore_core::{Action, ActionRequest, Dispatcher, Params, StoreRoot};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let dispatcher = Dispatcher::new(StoreRoot::open(dir.path()).unwrap());
//!
//! let create = ActionRequest::new(Action::Create, Params::new())
//!     .with_param("name", "notes.txt")
//!     .with_param("content", "remember the milk");
//! assert_eq!(dispatcher.dispatch(create).body(), "File 'notes.txt' created");
//!
//! let read = ActionRequest::new(Action::Read, Params::new()).with_param("name", "notes.txt");
//! assert_eq!(dispatcher.dispatch(read).body(), "Content:\n\nremember the milk");
//! ```

mod dispatcher;
mod error;
mod meta;
mod path;
mod reply;
mod request;

pub use dispatcher::Dispatcher;
pub use error::ActionError;
pub use meta::{FileMeta, TIMESTAMP_FORMAT};
pub use path::{PathError, StoreRoot, StoreRootError};
pub use reply::{Outcome, Reply};
pub use request::{Action, ActionRequest, Command, Params};

/// Reply body for absent or unrecognized actions.
pub const HELP_TEXT: &str =
    "Available actions: create, read, delete, list, rename, meta, systeminfo";
