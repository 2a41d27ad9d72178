//! Canonical uri codec
//!
//! Maps typed entity links to their canonical uri strings and back:
//!
//! ```text
//! scheme:track:<id>
//! scheme:album:<id>
//! scheme:artist:<id>
//! scheme:user:<username>:playlist:<id>
//! ```
//!
//! A [`Link`] is the transient handle between the two forms. It borrows
//! from the entity (when encoding) or from the input string (when decoding)
//! and is released when it goes out of scope, on every return path.

use std::fmt;

use crate::domain::{
    id::{CatalogId, ID_LENGTH},
    playlist::Playlist,
    reference::{AlbumRef, ArtistRef, PlaylistRef, TrackRef},
    track::{Album, Artist, Track},
};

pub mod error;

use error::UriError;

pub const DEFAULT_SCHEME: &str = "spotify";

const USER_TAG: &str = "user";
const PLAYLIST_TAG: &str = "playlist";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl LinkKind {
    pub fn tag(self) -> &'static str {
        match self {
            LinkKind::Track => "track",
            LinkKind::Album => "album",
            LinkKind::Artist => "artist",
            LinkKind::Playlist => PLAYLIST_TAG,
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link<'a> {
    Track(CatalogId),
    Album(CatalogId),
    Artist(CatalogId),
    Playlist { owner: &'a str, id: CatalogId },
}

impl Link<'_> {
    pub fn kind(&self) -> LinkKind {
        match self {
            Link::Track(_) => LinkKind::Track,
            Link::Album(_) => LinkKind::Album,
            Link::Artist(_) => LinkKind::Artist,
            Link::Playlist { .. } => LinkKind::Playlist,
        }
    }

    pub fn id(&self) -> CatalogId {
        match self {
            Link::Track(id) | Link::Album(id) | Link::Artist(id) => *id,
            Link::Playlist { id, .. } => *id,
        }
    }

    pub fn as_track(&self) -> Option<TrackRef> {
        match self {
            Link::Track(id) => Some(TrackRef(*id)),
            _ => None,
        }
    }

    pub fn as_album(&self) -> Option<AlbumRef> {
        match self {
            Link::Album(id) => Some(AlbumRef(*id)),
            _ => None,
        }
    }

    pub fn as_artist(&self) -> Option<ArtistRef> {
        match self {
            Link::Artist(id) => Some(ArtistRef(*id)),
            _ => None,
        }
    }

    pub fn as_playlist(&self) -> Option<PlaylistRef> {
        match self {
            Link::Playlist { owner, id } => Some(PlaylistRef {
                owner: (*owner).to_owned(),
                id: *id,
            }),
            _ => None,
        }
    }
}

impl From<&Track> for Link<'static> {
    fn from(track: &Track) -> Self {
        Link::Track(track.id)
    }
}

impl From<&Album> for Link<'static> {
    fn from(album: &Album) -> Self {
        Link::Album(album.id)
    }
}

impl From<&Artist> for Link<'static> {
    fn from(artist: &Artist) -> Self {
        Link::Artist(artist.id)
    }
}

impl<'a> From<&'a Playlist> for Link<'a> {
    fn from(playlist: &'a Playlist) -> Self {
        Link::Playlist {
            owner: &playlist.owner.username,
            id: playlist.id,
        }
    }
}

impl From<TrackRef> for Link<'static> {
    fn from(track: TrackRef) -> Self {
        Link::Track(track.0)
    }
}

impl From<AlbumRef> for Link<'static> {
    fn from(album: AlbumRef) -> Self {
        Link::Album(album.0)
    }
}

impl From<ArtistRef> for Link<'static> {
    fn from(artist: ArtistRef) -> Self {
        Link::Artist(artist.0)
    }
}

impl<'a> From<&'a PlaylistRef> for Link<'a> {
    fn from(playlist: &'a PlaylistRef) -> Self {
        Link::Playlist {
            owner: &playlist.owner,
            id: playlist.id,
        }
    }
}

/// Encodes and decodes canonical uris for one scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriCodec {
    scheme: String,
}

impl Default for UriCodec {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl UriCodec {
    /// The scheme must look like an rfc 3986 scheme: a letter followed by
    /// letters, digits, `+`, `-` or `.`.
    pub fn new(scheme: impl Into<String>) -> Result<Self, UriError> {
        let scheme = scheme.into();
        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

        if !valid {
            return Err(UriError::InvalidScheme(scheme));
        }
        Ok(Self { scheme })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Largest encoding of any link of this kind.
    ///
    /// `None` for playlists: their length depends on the owner's username,
    /// see [`UriCodec::capacity`].
    pub fn max_capacity(&self, kind: LinkKind) -> Option<usize> {
        match kind {
            LinkKind::Playlist => None,
            kind => Some(self.scheme.len() + 1 + kind.tag().len() + 1 + ID_LENGTH),
        }
    }

    /// Exact number of bytes the encoding of `link` takes.
    pub fn capacity(&self, link: &Link<'_>) -> usize {
        match link {
            Link::Playlist { owner, .. } => {
                self.scheme.len()
                    + 1
                    + USER_TAG.len()
                    + 1
                    + owner.len()
                    + 1
                    + PLAYLIST_TAG.len()
                    + 1
                    + ID_LENGTH
            }
            // exact for fixed-length kinds, which always have a maximum
            link => self.max_capacity(link.kind()).unwrap_or_default(),
        }
    }

    /// Encodes a link into its canonical uri.
    ///
    /// The string is allocated with exactly [`UriCodec::capacity`] bytes
    /// before anything is written, so it never truncates or regrows.
    pub fn encode(&self, link: &Link<'_>) -> Result<String, UriError> {
        if let Link::Playlist { owner, .. } = link {
            if !is_valid_username(owner) {
                return Err(UriError::InvalidUsername((*owner).to_owned()));
            }
        }

        let capacity = self.capacity(link);
        let mut uri = String::new();
        uri.try_reserve_exact(capacity)
            .map_err(|source| UriError::Capacity {
                kind: link.kind(),
                capacity,
                source,
            })?;

        uri.push_str(&self.scheme);
        uri.push(':');
        if let Link::Playlist { owner, .. } = link {
            uri.push_str(USER_TAG);
            uri.push(':');
            uri.push_str(owner);
            uri.push(':');
        }
        uri.push_str(link.kind().tag());
        uri.push(':');
        uri.extend(link.id().base62_digits().iter().map(|&b| char::from(b)));

        debug_assert_eq!(uri.len(), capacity);
        Ok(uri)
    }

    /// Parses a canonical uri of any kind. Returns `None` if it is malformed
    /// or uses another scheme.
    pub fn decode<'a>(&self, uri: &'a str) -> Option<Link<'a>> {
        let rest = uri.strip_prefix(self.scheme.as_str())?.strip_prefix(':')?;
        let (tag, rest) = rest.split_once(':')?;

        match tag {
            "track" => Some(Link::Track(CatalogId::from_base62(rest).ok()?)),
            "album" => Some(Link::Album(CatalogId::from_base62(rest).ok()?)),
            "artist" => Some(Link::Artist(CatalogId::from_base62(rest).ok()?)),
            USER_TAG => {
                let (owner, rest) = rest.split_once(':')?;
                let id = rest.strip_prefix(PLAYLIST_TAG)?.strip_prefix(':')?;
                if !is_valid_username(owner) {
                    return None;
                }
                Some(Link::Playlist {
                    owner,
                    id: CatalogId::from_base62(id).ok()?,
                })
            }
            _ => None,
        }
    }

    /// Like [`UriCodec::decode`], but also rejects well-formed uris of any
    /// kind other than `expected`.
    pub fn decode_as<'a>(&self, uri: &'a str, expected: LinkKind) -> Option<Link<'a>> {
        self.decode(uri).filter(|link| link.kind() == expected)
    }
}

fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && !username.contains(':')
}
