//! dirstore: a single-directory text file store served over HTTP.
//!
//! Callers create, read, delete, rename, and list text files, and ask for
//! per-file metadata and host statistics, all through query-string requests
//! against one long-lived server. Every operation is confined to one store
//! root directory.

pub use dirstore_core as core;
pub use dirstore_http as http;
pub use dirstore_sys as sys;

pub use dirstore_core::{Action, ActionRequest, Dispatcher, Reply, StoreRoot};
pub use dirstore_http::{serve, ServerConfig, StatusPolicy};
