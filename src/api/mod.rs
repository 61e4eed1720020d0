//! SHOWROOM web API client
//!
//! Thin wrappers around the two public endpoints the recorder consumes:
//! the onlives listing (live status) and the streaming_url resolver.
//! Each call is independent and stateless; retrying is left to the
//! caller's poll interval.

pub mod types;

pub use types::{LiveRoom, RoomTarget};

use thiserror::Error;

use types::{OnlivesResponse, StreamRendition, StreamingUrlResponse};

const ONLIVES_URL: &str = "https://www.showroom-live.com/api/live/onlives";
const STREAMING_URL: &str = "https://www.showroom-live.com/api/live/streaming_url";

/// API call errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no streams available")]
    NoStreamsAvailable,
}

/// Client for the SHOWROOM live API
pub struct ShowroomClient {
    http: reqwest::Client,
}

impl ShowroomClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Look up the target in the onlives listing.
    ///
    /// Returns `Ok(None)` when the room is not currently live. The first
    /// matching entry wins if the listing ever carries duplicates.
    pub async fn find_live_room(
        &self,
        target: &RoomTarget,
    ) -> Result<Option<LiveRoom>, ApiError> {
        let body = self
            .http
            .get(ONLIVES_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let listing: OnlivesResponse = serde_json::from_str(&body)?;

        Ok(listing.find_room(target.key()))
    }

    /// Resolve the playback URL for a live room, preferring the highest
    /// quality rendition.
    pub async fn resolve_stream_url(&self, room_id: u64) -> Result<String, ApiError> {
        let url = format!("{STREAMING_URL}?room_id={room_id}&abr_available=1");
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let resp: StreamingUrlResponse = serde_json::from_str(&body)?;

        let best =
            best_rendition(&resp.streaming_url_list).ok_or(ApiError::NoStreamsAvailable)?;
        tracing::debug!(
            "Selected rendition {} (quality {})",
            best.label,
            best.quality
        );

        Ok(best.url.clone())
    }
}

impl Default for ShowroomClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Strictly highest quality wins; ties keep the first entry in list order.
///
/// Not `Iterator::max_by_key`, which keeps the last maximum.
fn best_rendition(list: &[StreamRendition]) -> Option<&StreamRendition> {
    let mut best: Option<&StreamRendition> = None;
    for rendition in list {
        if best.map_or(true, |b| rendition.quality > b.quality) {
            best = Some(rendition);
        }
    }
    best
}
