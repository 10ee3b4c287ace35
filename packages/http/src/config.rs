//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use dirstore_core::Outcome;
use http::StatusCode;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 3000;

/// Store root, relative to the working directory, unless told otherwise.
pub const DEFAULT_ROOT: &str = "files";

/// Listen on every interface by default.
pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// How reply outcomes map onto HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Always `200 OK`; the body text is the only success/failure signal.
    #[default]
    AlwaysOk,
    /// `400` for invalid parameters, `404` for missing files, `500` for
    /// filesystem failures. The body text is unchanged.
    Semantic,
}

impl StatusPolicy {
    pub fn status_for(&self, outcome: Outcome) -> StatusCode {
        match self {
            StatusPolicy::AlwaysOk => StatusCode::OK,
            StatusPolicy::Semantic => match outcome {
                Outcome::Success | Outcome::Help => StatusCode::OK,
                Outcome::Invalid => StatusCode::BAD_REQUEST,
                Outcome::NotFound => StatusCode::NOT_FOUND,
                Outcome::Failed | Outcome::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Everything needed to start a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub root: PathBuf,
    pub status_policy: StatusPolicy,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            port: DEFAULT_PORT,
            root: PathBuf::from(DEFAULT_ROOT),
            status_policy: StatusPolicy::default(),
        }
    }
}
