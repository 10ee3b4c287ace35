use std::net::SocketAddr;

use dirstore_core::StoreRootError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Store root error: {0}")]
    StoreRoot(#[from] StoreRootError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
