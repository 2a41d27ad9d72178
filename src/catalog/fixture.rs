//! Catalog read from a TOML fixture file
//!
//! Entries may omit `id`, in which case one is derived from the entry's kind
//! and name. References to other entries (`album`, `artists`, playlist
//! `tracks`) accept either an id or the name of an entry without an
//! explicit id.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::Path,
};

use log::{debug, info};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogError},
    domain::{
        id::CatalogId,
        playlist::{Playlist, PlaylistMetadata, User},
        reference::{PlaylistRef, TrackRef},
        track::{Album, Artist, Track, TrackMetadata},
    },
};

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    users: Vec<RawUser>,
    #[serde(default)]
    albums: Vec<RawNamed>,
    #[serde(default)]
    artists: Vec<RawNamed>,
    #[serde(default)]
    tracks: Vec<RawTrack>,
    #[serde(default)]
    playlists: Vec<RawPlaylist>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    username: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    id: Option<CatalogId>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    id: Option<CatalogId>,
    name: String,
    #[serde(default = "loaded")]
    loaded: bool,
    #[serde(default)]
    duration_ms: u32,
    album: Option<String>,
    #[serde(default)]
    artists: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlaylist {
    id: Option<CatalogId>,
    owner: String,
    name: String,
    #[serde(default = "loaded")]
    loaded: bool,
    #[serde(default)]
    collaborative: bool,
    description: Option<String>,
    #[serde(default)]
    subscribers: u32,
    #[serde(default)]
    tracks: Vec<String>,
}

fn loaded() -> bool {
    true
}

fn derive_id(kind: &str, name: &str) -> CatalogId {
    CatalogId::from_bytes(format!("{kind}:{name}").as_bytes())
}

/// `key` is either an id or the name of an entry without explicit id
fn resolve_key(kind: &str, key: &str) -> CatalogId {
    CatalogId::from_base62(key).unwrap_or_else(|_| derive_id(kind, key))
}

fn index_named<T>(
    kind: &'static str,
    entries: Vec<RawNamed>,
    build: impl Fn(CatalogId, String) -> T,
) -> Result<HashMap<CatalogId, T>, CatalogError> {
    let mut index = HashMap::with_capacity(entries.len());
    for entry in entries {
        let id = entry.id.unwrap_or_else(|| derive_id(kind, &entry.name));
        match index.entry(id) {
            Entry::Occupied(_) => return Err(CatalogError::Duplicate { kind, id }),
            Entry::Vacant(slot) => {
                slot.insert(build(id, entry.name));
            }
        }
    }
    Ok(index)
}

fn track_metadata(
    id: CatalogId,
    raw: RawTrack,
    albums: &HashMap<CatalogId, Album>,
    artists: &HashMap<CatalogId, Artist>,
) -> Result<TrackMetadata, CatalogError> {
    let album_key = raw.album.ok_or(CatalogError::MissingAlbum(id))?;
    let Some(album) = albums.get(&resolve_key("album", &album_key)) else {
        return Err(CatalogError::UnknownAlbum {
            track: id,
            album: album_key,
        });
    };

    let artists = raw
        .artists
        .into_iter()
        .map(|key| match artists.get(&resolve_key("artist", &key)) {
            Some(artist) => Ok(artist.clone()),
            None => Err(CatalogError::UnknownArtist {
                track: id,
                artist: key,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrackMetadata {
        name: raw.name,
        duration_ms: raw.duration_ms,
        album: album.clone(),
        artists,
    })
}

/// In-memory catalog built from a TOML fixture
#[derive(Debug, Default)]
pub struct FixtureCatalog {
    tracks: HashMap<CatalogId, Track>,
    playlists: Vec<Playlist>,
}

impl FixtureCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        info!(
            "Loaded catalog {} with {} tracks and {} playlists",
            path.display(),
            catalog.tracks.len(),
            catalog.playlists.len()
        );
        Ok(catalog)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(s)?;

        let albums = index_named("album", raw.albums, |id, name| Album { id, name })?;
        let artists = index_named("artist", raw.artists, |id, name| Artist { id, name })?;
        let mut users: HashMap<String, User> = HashMap::with_capacity(raw.users.len());
        for raw_user in raw.users {
            match users.entry(raw_user.username) {
                Entry::Occupied(slot) => {
                    return Err(CatalogError::DuplicateUser(slot.key().clone()));
                }
                Entry::Vacant(slot) => {
                    let username = slot.key().clone();
                    slot.insert(User {
                        display_name: raw_user.display_name,
                        username,
                    });
                }
            }
        }

        let mut tracks = HashMap::with_capacity(raw.tracks.len());
        for raw_track in raw.tracks {
            let id = raw_track
                .id
                .unwrap_or_else(|| derive_id("track", &raw_track.name));
            let track = if raw_track.loaded {
                Track::loaded(id, track_metadata(id, raw_track, &albums, &artists)?)
            } else {
                Track::unloaded(id)
            };
            if tracks.insert(id, track).is_some() {
                return Err(CatalogError::Duplicate { kind: "track", id });
            }
        }

        let mut playlists: Vec<Playlist> = Vec::with_capacity(raw.playlists.len());
        for raw_playlist in raw.playlists {
            let id = raw_playlist
                .id
                .unwrap_or_else(|| derive_id("playlist", &raw_playlist.name));
            let Some(owner) = users.get(&raw_playlist.owner).cloned() else {
                return Err(CatalogError::UnknownUser {
                    playlist: id,
                    owner: raw_playlist.owner,
                });
            };
            if playlists
                .iter()
                .any(|p| p.id == id && p.owner.username == owner.username)
            {
                return Err(CatalogError::Duplicate {
                    kind: "playlist",
                    id,
                });
            }

            let metadata = if raw_playlist.loaded {
                let entries = raw_playlist
                    .tracks
                    .iter()
                    .map(|key| {
                        let track_id = resolve_key("track", key);
                        tracks.get(&track_id).cloned().unwrap_or_else(|| {
                            debug!("playlist {id} refers to unknown track {key:?}, kept unloaded");
                            Track::unloaded(track_id)
                        })
                    })
                    .collect();
                Some(PlaylistMetadata {
                    name: raw_playlist.name,
                    collaborative: raw_playlist.collaborative,
                    description: raw_playlist.description,
                    subscribers: raw_playlist.subscribers,
                    tracks: entries,
                })
            } else {
                None
            };

            playlists.push(Playlist {
                id,
                owner,
                metadata,
            });
        }

        Ok(Self { tracks, playlists })
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }
}

impl Catalog for FixtureCatalog {
    fn track(&self, track: &TrackRef) -> Option<&Track> {
        self.tracks.get(&track.0)
    }

    fn playlist(&self, playlist: &PlaylistRef) -> Option<&Playlist> {
        self.playlists
            .iter()
            .find(|p| p.id == playlist.id && p.owner.username == playlist.owner)
    }
}
