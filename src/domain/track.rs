use super::{id::CatalogId, reference::TrackRef};

/// Represent a music track
///
/// `metadata` is `None` until the catalog has loaded the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: CatalogId,
    pub metadata: Option<TrackMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub name: String,
    pub duration_ms: u32,
    pub album: Album,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: CatalogId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: CatalogId,
    pub name: String,
}

impl Track {
    pub fn unloaded(id: CatalogId) -> Self {
        Self { id, metadata: None }
    }

    pub fn loaded(id: CatalogId, metadata: TrackMetadata) -> Self {
        Self {
            id,
            metadata: Some(metadata),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn reference(&self) -> TrackRef {
        TrackRef(self.id)
    }
}

impl TrackMetadata {
    /// Only the first artist is currently emitted anywhere.
    pub fn first_artist(&self) -> Option<&Artist> {
        self.artists.first()
    }
}
