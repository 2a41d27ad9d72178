use serde_json::Value;
use thiserror::Error;

use crate::{domain::reference::PlaylistRef, uri::error::UriError};

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("{0} is not loaded")]
    NotLoaded(PlaylistRef),

    #[error("failed to build uri: {0}")]
    Uri(#[from] UriError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a json object, got {0}")]
    NotAnObject(Value),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed playlist draft: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("playlist title is blank")]
    BlankTitle,

    #[error("playlist title is {length} characters long, at most {max} allowed")]
    TitleTooLong { length: usize, max: usize },
}
