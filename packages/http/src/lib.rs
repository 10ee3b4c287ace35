//! # dirstore-http
//!
//! HTTP front end for the dirstore file store.
//!
//! Requests carry everything in the query string:
//!
//! ```text
//! GET /?action=create&name=notes.txt&content=hello   -> File 'notes.txt' created
//! GET /?action=read&name=notes.txt                   -> Content:\n\nhello
//! GET /?action=list                                  -> Files:\n\nnotes.txt
//! GET /?action=rename&oldname=notes.txt&newname=n    -> Renamed 'notes.txt' to 'n'
//! GET /?action=meta&name=n                           -> File/Size/Created/Modified block
//! GET /?action=delete&name=n                         -> File 'n' deleted
//! GET /?action=systeminfo                            -> System Info block
//! GET /                                              -> Available actions: ...
//! ```
//!
//! Any path and any method work the same way. Every response is
//! `text/plain`. By default every response is `200 OK` and the body is the
//! only success signal; [`StatusPolicy::Semantic`] maps failures to
//! `400`/`404`/`500` instead, keeping the same bodies.
//!
//! ```ignore
//! use dirstore_http::{serve, ServerConfig};
//!
//! serve(ServerConfig::default()).await?;
//! ```

pub mod config;
pub mod error;
pub mod server;

pub use config::{ServerConfig, StatusPolicy, DEFAULT_BIND, DEFAULT_PORT, DEFAULT_ROOT};
pub use error::{Error, Result};
pub use server::{build_router, serve, serve_on, ServerState};
