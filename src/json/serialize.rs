//! Catalog entities to json
//!
//! Every entity is first mapped onto a borrowed, serializable view
//! (`*Json::from_domain`) and only then turned into a json object. A view is
//! either complete or not built at all, so a failed call never leaves a
//! half-filled object behind.

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    domain::{playlist::Playlist, track::Track},
    json::error::SerializeError,
    uri::{Link, UriCodec},
};

#[derive(Debug, Serialize)]
pub struct TrackJson<'a> {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
}

impl<'a> TrackJson<'a> {
    /// Unloaded tracks degrade to just their uri.
    pub fn from_domain(codec: &UriCodec, track: &'a Track) -> Result<Self, SerializeError> {
        Ok(Self {
            uri: codec.encode(&Link::from(track))?,
            title: track.metadata.as_ref().map(|m| m.name.as_str()),
        })
    }
}

/// Album or artist, inlined in a playlist track entry
#[derive(Debug, Serialize)]
pub struct NamedLinkJson<'a> {
    pub name: &'a str,
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistTrackJson<'a> {
    pub name: &'a str,
    pub duration: u32,
    pub uri: String,
    pub album: NamedLinkJson<'a>,
    pub artist: NamedLinkJson<'a>,
}

impl<'a> PlaylistTrackJson<'a> {
    /// Returns `Ok(None)` when the track can't be linked to an album and an
    /// artist, i.e. it is not loaded or has no artist.
    pub fn from_domain(codec: &UriCodec, track: &'a Track) -> Result<Option<Self>, SerializeError> {
        let Some(metadata) = &track.metadata else {
            return Ok(None);
        };
        // TODO: tracks can have several artists, only the first one is emitted
        let Some(artist) = metadata.first_artist() else {
            return Ok(None);
        };

        Ok(Some(Self {
            name: &metadata.name,
            duration: metadata.duration_ms,
            uri: codec.encode(&Link::from(track))?,
            album: NamedLinkJson {
                name: &metadata.album.name,
                uri: codec.encode(&Link::from(&metadata.album))?,
            },
            artist: NamedLinkJson {
                name: &artist.name,
                uri: codec.encode(&Link::from(artist))?,
            },
        }))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistJson<'a> {
    pub creator: &'a str,
    pub uri: String,
    pub title: &'a str,
    pub collaborative: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub subscriber_count: u32,
    pub tracks: Vec<PlaylistTrackJson<'a>>,
}

impl<'a> PlaylistJson<'a> {
    /// Fails if the playlist is not loaded or its own uri can't be built.
    ///
    /// Tracks that can't be linked are skipped with a warning, the rest keep
    /// playlist order. An unloaded track is one of those, so `tracks` can be
    /// shorter than the playlist.
    pub fn from_domain(codec: &UriCodec, playlist: &'a Playlist) -> Result<Self, SerializeError> {
        let Some(metadata) = &playlist.metadata else {
            return Err(SerializeError::NotLoaded(playlist.reference()));
        };
        let uri = codec.encode(&Link::from(playlist))?;

        let mut tracks = Vec::with_capacity(metadata.tracks.len());
        for (position, track) in metadata.tracks.iter().enumerate() {
            match PlaylistTrackJson::from_domain(codec, track)? {
                Some(entry) => tracks.push(entry),
                None => warn!(
                    "skipping {} at position {position} of {uri}: not loaded or has no artist",
                    track.reference()
                ),
            }
        }

        Ok(Self {
            creator: &playlist.owner.display_name,
            uri,
            title: &metadata.name,
            collaborative: metadata.collaborative,
            description: metadata.description.as_deref(),
            subscriber_count: metadata.subscribers,
            tracks,
        })
    }
}

fn to_object<T: Serialize>(view: &T) -> Result<Map<String, Value>, SerializeError> {
    match serde_json::to_value(view)? {
        Value::Object(object) => Ok(object),
        other => Err(SerializeError::NotAnObject(other)),
    }
}

pub fn track_to_json(codec: &UriCodec, track: &Track) -> Result<Value, SerializeError> {
    let mut object = Map::new();
    fill_track(codec, track, &mut object)?;
    Ok(Value::Object(object))
}

/// Sets the track's keys on `object`, leaving other keys alone.
pub fn fill_track(
    codec: &UriCodec,
    track: &Track,
    object: &mut Map<String, Value>,
) -> Result<(), SerializeError> {
    object.extend(to_object(&TrackJson::from_domain(codec, track)?)?);
    Ok(())
}

pub fn playlist_to_json(codec: &UriCodec, playlist: &Playlist) -> Result<Value, SerializeError> {
    let mut object = Map::new();
    fill_playlist(codec, playlist, &mut object)?;
    Ok(Value::Object(object))
}

/// Sets the playlist's keys on `object`. On error `object` is untouched.
pub fn fill_playlist(
    codec: &UriCodec,
    playlist: &Playlist,
    object: &mut Map<String, Value>,
) -> Result<(), SerializeError> {
    object.extend(to_object(&PlaylistJson::from_domain(codec, playlist)?)?);
    Ok(())
}
