//! Json track references back to typed references
//!
//! Malformed references are never an error here: a single reference decodes
//! to `None` and arrays silently drop the entries that don't decode.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::reference::{PlaylistRef, TrackRef},
    json::error::DecodeError,
    uri::{LinkKind, UriCodec},
};

/// Maximum number of characters in a playlist title
pub const MAX_PLAYLIST_TITLE_LENGTH: usize = 256;

/// `None` unless `json` is a string holding a track uri.
pub fn track_ref_from_json(codec: &UriCodec, json: &Value) -> Option<TrackRef> {
    let uri = json.as_str()?;
    codec.decode_as(uri, LinkKind::Track)?.as_track()
}

pub fn playlist_ref_from_json(codec: &UriCodec, json: &Value) -> Option<PlaylistRef> {
    let uri = json.as_str()?;
    codec.decode_as(uri, LinkKind::Playlist)?.as_playlist()
}

/// Decodes the valid track uris among the first `scan_limit` elements of a
/// json array, in array order.
///
/// `scan_limit` bounds the elements looked at, not the references returned:
/// elements past it are ignored even when some of the scanned ones were
/// invalid. A non-array yields no references.
pub fn track_refs_from_json(codec: &UriCodec, json: &Value, scan_limit: usize) -> Vec<TrackRef> {
    let Some(items) = json.as_array() else {
        debug!("expected an array of track uris, got {json}");
        return Vec::new();
    };

    items
        .iter()
        .take(scan_limit)
        .enumerate()
        .filter_map(|(index, item)| {
            let track = track_ref_from_json(codec, item);
            if track.is_none() {
                debug!("skipping invalid track reference at index {index}: {item}");
            }
            track
        })
        .collect()
}

/// Inbound request to create a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDraft {
    pub title: String,
    pub tracks: Vec<TrackRef>,
}

#[derive(Deserialize)]
struct RawDraft {
    title: String,
    #[serde(default)]
    tracks: Value,
}

/// Decodes `{"title": ..., "tracks": [...]}`.
///
/// The title is validated strictly; the tracks follow the same best-effort
/// rules as [`track_refs_from_json`].
pub fn playlist_draft_from_json(
    codec: &UriCodec,
    json: &Value,
    scan_limit: usize,
) -> Result<PlaylistDraft, DecodeError> {
    let raw = RawDraft::deserialize(json)?;

    if raw.title.trim().is_empty() {
        return Err(DecodeError::BlankTitle);
    }
    let length = raw.title.chars().count();
    if length > MAX_PLAYLIST_TITLE_LENGTH {
        return Err(DecodeError::TitleTooLong {
            length,
            max: MAX_PLAYLIST_TITLE_LENGTH,
        });
    }

    Ok(PlaylistDraft {
        tracks: track_refs_from_json(codec, &raw.tracks, scan_limit),
        title: raw.title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::CatalogId;
    use serde_json::json;

    fn track(s: &str) -> TrackRef {
        TrackRef(CatalogId::from_base62(s).unwrap())
    }

    #[test]
    fn test_single_track_uri() {
        let codec = UriCodec::default();

        assert_eq!(
            track_ref_from_json(&codec, &json!("spotify:track:58PipbkYEkKFzOowRPHF3m")),
            Some(track("58PipbkYEkKFzOowRPHF3m"))
        );
    }

    #[test]
    fn test_single_rejects_non_strings_and_other_kinds() {
        let codec = UriCodec::default();

        for value in [
            json!(null),
            json!(42),
            json!(true),
            json!(["spotify:track:58PipbkYEkKFzOowRPHF3m"]),
            json!({ "uri": "spotify:track:58PipbkYEkKFzOowRPHF3m" }),
            json!("not-a-uri"),
            json!("spotify:album:0745mDdMqet9J5nO5x7IQS"),
            json!("spotify:artist:0oSGxfWSnnOXhD2fKuz2Gy"),
            json!("spotify:user:alice:playlist:284on3DVWeAxWkgVuzZKGt"),
        ] {
            assert_eq!(track_ref_from_json(&codec, &value), None, "{value}");
        }
    }

    #[test]
    fn test_single_playlist_uri() {
        let codec = UriCodec::default();
        let value = json!("spotify:user:alice:playlist:284on3DVWeAxWkgVuzZKGt");

        let playlist = playlist_ref_from_json(&codec, &value).unwrap();

        assert_eq!(playlist.owner, "alice");
        assert_eq!(playlist.id.to_string(), "284on3DVWeAxWkgVuzZKGt");
        assert_eq!(
            playlist_ref_from_json(&codec, &json!("spotify:track:58PipbkYEkKFzOowRPHF3m")),
            None
        );
    }

    #[test]
    fn test_batch_skips_invalid_entries() {
        let value = json!([
            "spotify:track:58PipbkYEkKFzOowRPHF3m",
            "not-a-uri",
            "spotify:album:0745mDdMqet9J5nO5x7IQS",
        ]);

        let tracks = track_refs_from_json(&UriCodec::default(), &value, 3);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks, vec![track("58PipbkYEkKFzOowRPHF3m")]);
    }

    #[test]
    fn test_batch_keeps_order_of_valid_entries() {
        let value = json!([
            "spotify:track:0745mDdMqet9J5nO5x7IQS",
            7,
            "spotify:track:58PipbkYEkKFzOowRPHF3m",
            null,
            "spotify:track:0oSGxfWSnnOXhD2fKuz2Gy",
        ]);

        let tracks = track_refs_from_json(&UriCodec::default(), &value, 10);

        assert_eq!(
            tracks,
            vec![
                track("0745mDdMqet9J5nO5x7IQS"),
                track("58PipbkYEkKFzOowRPHF3m"),
                track("0oSGxfWSnnOXhD2fKuz2Gy"),
            ]
        );
    }

    #[test]
    fn test_batch_limit_bounds_scanned_elements() {
        let value = json!([
            "bad",
            "spotify:track:58PipbkYEkKFzOowRPHF3m",
            "spotify:track:0745mDdMqet9J5nO5x7IQS",
        ]);

        // the third element is never looked at, even though only one
        // of the two scanned elements was valid
        let tracks = track_refs_from_json(&UriCodec::default(), &value, 2);

        assert_eq!(tracks, vec![track("58PipbkYEkKFzOowRPHF3m")]);
    }

    #[test]
    fn test_batch_limit_beyond_array_length() {
        let value = json!(["spotify:track:58PipbkYEkKFzOowRPHF3m"]);

        assert_eq!(track_refs_from_json(&UriCodec::default(), &value, 50).len(), 1);
        assert!(track_refs_from_json(&UriCodec::default(), &value, 0).is_empty());
    }

    #[test]
    fn test_batch_non_array_is_empty() {
        let codec = UriCodec::default();

        for value in [
            json!(null),
            json!("spotify:track:58PipbkYEkKFzOowRPHF3m"),
            json!({ "tracks": [] }),
        ] {
            assert!(track_refs_from_json(&codec, &value, 10).is_empty());
        }
    }

    #[test]
    fn test_draft_decodes_title_and_tracks() -> anyhow::Result<()> {
        let value = json!({
            "title": "Road Trip",
            "tracks": ["spotify:track:58PipbkYEkKFzOowRPHF3m", "nope"],
        });

        let draft = playlist_draft_from_json(&UriCodec::default(), &value, 100)?;

        assert_eq!(
            draft,
            PlaylistDraft {
                title: "Road Trip".to_string(),
                tracks: vec![track("58PipbkYEkKFzOowRPHF3m")],
            }
        );
        Ok(())
    }

    #[test]
    fn test_draft_without_tracks() -> anyhow::Result<()> {
        let draft = playlist_draft_from_json(&UriCodec::default(), &json!({ "title": "Empty" }), 100)?;

        assert!(draft.tracks.is_empty());
        Ok(())
    }

    #[test]
    fn test_draft_rejects_bad_titles() {
        let codec = UriCodec::default();

        assert!(matches!(
            playlist_draft_from_json(&codec, &json!({ "tracks": [] }), 10),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(
            playlist_draft_from_json(&codec, &json!({ "title": 5 }), 10),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(
            playlist_draft_from_json(&codec, &json!("title"), 10),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(
            playlist_draft_from_json(&codec, &json!({ "title": "   " }), 10),
            Err(DecodeError::BlankTitle)
        ));
    }

    #[test]
    fn test_draft_title_length_counts_characters() {
        let codec = UriCodec::default();

        let longest = "é".repeat(MAX_PLAYLIST_TITLE_LENGTH);
        assert!(playlist_draft_from_json(&codec, &json!({ "title": longest }), 10).is_ok());

        let too_long = "a".repeat(MAX_PLAYLIST_TITLE_LENGTH + 1);
        assert!(matches!(
            playlist_draft_from_json(&codec, &json!({ "title": too_long }), 10),
            Err(DecodeError::TitleTooLong { length: 257, max: 256 })
        ));
    }
}
