use std::collections::TryReserveError;

use thiserror::Error;

use super::LinkKind;

#[derive(Debug, Error)]
pub enum UriError {
    #[error("invalid uri scheme {0:?}")]
    InvalidScheme(String),

    #[error("username {0:?} cannot be embedded in a playlist uri")]
    InvalidUsername(String),

    #[error("could not allocate {capacity} bytes for a {kind} uri")]
    Capacity {
        kind: LinkKind,
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}
