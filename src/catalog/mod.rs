//! Catalog that resolves references to loaded entities.
//!
//! The real catalog lives with the streaming service session. This crate
//! only needs read access through [`Catalog`]; [`fixture::FixtureCatalog`]
//! backs it with a hand-written TOML file.

use thiserror::Error;

use crate::domain::{
    id::CatalogId,
    playlist::Playlist,
    reference::{PlaylistRef, TrackRef},
    track::Track,
};

pub mod fixture;

pub trait Catalog {
    fn track(&self, track: &TrackRef) -> Option<&Track>;

    fn playlist(&self, playlist: &PlaylistRef) -> Option<&Playlist>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate {kind} {id}")]
    Duplicate { kind: &'static str, id: CatalogId },

    #[error("duplicate user {0:?}")]
    DuplicateUser(String),

    #[error("loaded track {0} has no album")]
    MissingAlbum(CatalogId),

    #[error("track {track} refers to unknown album {album:?}")]
    UnknownAlbum { track: CatalogId, album: String },

    #[error("track {track} refers to unknown artist {artist:?}")]
    UnknownArtist { track: CatalogId, artist: String },

    #[error("playlist {playlist} is owned by unknown user {owner:?}")]
    UnknownUser { playlist: CatalogId, owner: String },
}
