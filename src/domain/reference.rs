//! Typed references to catalog entities, as recovered from uris.
//!
//! A reference only names an entity. Resolving it to loaded metadata
//! is the catalog's job.

use std::fmt;

use super::id::CatalogId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackRef(pub CatalogId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlbumRef(pub CatalogId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtistRef(pub CatalogId);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistRef {
    pub owner: String,
    pub id: CatalogId,
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track {}", self.0)
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playlist {} of {}", self.id, self.owner)
    }
}
