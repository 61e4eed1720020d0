//! SHOWROOM API types
//!
//! This module defines the monitored target and the serde mappings for the
//! two endpoint responses the recorder consumes.

use serde::Deserialize;

use crate::utils::error::AppError;

/// The single room being monitored, identified by the key segment of its URL.
///
/// Set once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTarget {
    key: String,
}

impl RoomTarget {
    /// Extract the room key from a room URL.
    ///
    /// Expected format: `https://www.showroom-live.com/r/<room_key>`.
    /// The URL must contain exactly one `/r/` segment with a non-empty
    /// key after it.
    pub fn parse(room_url: &str) -> Result<Self, AppError> {
        let parts: Vec<&str> = room_url.split("/r/").collect();
        if parts.len() != 2 {
            return Err(AppError::InvalidRoomUrl(format!(
                "expected a URL like https://www.showroom-live.com/r/<room_key>, got {room_url}"
            )));
        }

        let key = parts[1].trim();
        if key.is_empty() {
            return Err(AppError::InvalidRoomUrl(format!(
                "empty room key in {room_url}"
            )));
        }

        Ok(Self {
            key: key.to_string(),
        })
    }

    /// The room URL key, e.g. `watashi_idol_0196`.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Response from `/api/live/onlives`: currently-live rooms grouped by genre.
///
/// Missing fields deserialize to their zero values so a partially filled
/// listing still parses.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OnlivesResponse {
    pub onlives: Vec<GenreGroup>,
}

/// One genre group in the onlives listing
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GenreGroup {
    pub genre_id: i64,
    pub genre_name: String,
    pub lives: Vec<LiveRoom>,
}

/// One currently-live room
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LiveRoom {
    pub room_id: u64,
    pub room_url_key: String,
    pub started_at: i64,
}

impl OnlivesResponse {
    /// First live entry whose key matches, scanning every genre group in
    /// listing order.
    pub fn find_room(self, key: &str) -> Option<LiveRoom> {
        self.onlives
            .into_iter()
            .flat_map(|genre| genre.lives)
            .find(|room| room.room_url_key == key)
    }
}

/// Response from `/api/live/streaming_url`: the candidate renditions for a
/// live room.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StreamingUrlResponse {
    pub streaming_url_list: Vec<StreamRendition>,
}

/// One candidate encoded stream variant
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StreamRendition {
    pub id: u64,
    pub label: String,
    pub quality: i64,
    #[serde(rename = "type")]
    pub stream_type: String,
    pub url: String,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_target_from_url() {
        let target = RoomTarget::parse("https://host/r/abc123").unwrap();
        assert_eq!(target.key(), "abc123");
    }

    #[test]
    fn test_room_target_empty_key() {
        assert!(RoomTarget::parse("https://host/r/").is_err());
    }

    #[test]
    fn test_room_target_missing_segment() {
        assert!(RoomTarget::parse("https://host/rooms/abc123").is_err());
    }

    #[test]
    fn test_room_target_doubled_segment() {
        assert!(RoomTarget::parse("https://host/r/a/r/b").is_err());
    }

    #[test]
    fn test_find_room_across_genres() {
        let json = r#"{
            "onlives": [
                {
                    "genre_id": 1,
                    "genre_name": "Music",
                    "lives": [
                        { "room_id": 100, "room_url_key": "other_room", "started_at": 1700000000 }
                    ]
                },
                {
                    "genre_id": 2,
                    "genre_name": "Idol",
                    "lives": [
                        { "room_id": 513601, "room_url_key": "abc123", "started_at": 1700000100 }
                    ]
                }
            ]
        }"#;

        let listing: OnlivesResponse = serde_json::from_str(json).unwrap();
        let room = listing.find_room("abc123").unwrap();
        assert_eq!(room.room_id, 513601);
    }

    #[test]
    fn test_find_room_absent() {
        let json = r#"{
            "onlives": [
                {
                    "genre_id": 1,
                    "genre_name": "Music",
                    "lives": [
                        { "room_id": 100, "room_url_key": "other_room", "started_at": 0 }
                    ]
                }
            ]
        }"#;

        let listing: OnlivesResponse = serde_json::from_str(json).unwrap();
        assert!(listing.find_room("abc123").is_none());
    }

    #[test]
    fn test_onlives_tolerates_sparse_entries() {
        // Fields the API omits deserialize to zero values, like an empty
        // listing entirely
        let listing: OnlivesResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.find_room("abc123").is_none());

        let listing: OnlivesResponse =
            serde_json::from_str(r#"{ "onlives": [ { "lives": [ {} ] } ] }"#).unwrap();
        assert!(listing.find_room("abc123").is_none());
    }

    #[test]
    fn test_malformed_onlives_is_an_error() {
        assert!(serde_json::from_str::<OnlivesResponse>("not json").is_err());
        assert!(serde_json::from_str::<OnlivesResponse>(r#"{ "onlives": 42 }"#).is_err());
    }

    #[test]
    fn test_streaming_url_parse() {
        let json = r#"{
            "streaming_url_list": [
                {
                    "id": 1,
                    "label": "original quality",
                    "quality": 1000,
                    "type": "hls",
                    "url": "https://cdn.example/stream.m3u8",
                    "is_default": true
                }
            ]
        }"#;

        let resp: StreamingUrlResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.streaming_url_list.len(), 1);
        assert_eq!(resp.streaming_url_list[0].quality, 1000);
        assert_eq!(resp.streaming_url_list[0].stream_type, "hls");
    }
}
