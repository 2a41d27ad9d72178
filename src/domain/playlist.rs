use super::{id::CatalogId, reference::PlaylistRef, track::Track};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Shown to people, may be empty
    pub display_name: String,
    /// Stable name embedded in playlist uris
    pub username: String,
}

/// Represent a playlist owned by a user
///
/// `metadata` is `None` until the catalog has loaded the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: CatalogId,
    pub owner: User,
    pub metadata: Option<PlaylistMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMetadata {
    pub name: String,
    pub collaborative: bool,
    pub description: Option<String>,
    pub subscribers: u32,
    /// Playlist order, significant
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn is_loaded(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn reference(&self) -> PlaylistRef {
        PlaylistRef {
            owner: self.owner.username.clone(),
            id: self.id,
        }
    }
}
