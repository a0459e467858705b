//! Image records and per-candidate payload decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One accepted image. Immutable once constructed; the collector only ever
/// appends records, never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Identifier assigned by the remote service. Primary dedup key.
    pub id: String,
    /// URL of the regular-resolution variant.
    pub regular_url: String,
    /// URL of the full-resolution variant.
    pub full_url: String,
    /// URL of the raw variant.
    pub raw_url: String,
    /// Pixel width as reported by the service.
    pub width: u32,
    /// Pixel height as reported by the service.
    pub height: u32,
    /// Alt description. May be empty; the service often omits it.
    pub alt_text: String,
    /// Dominant-color tag as reported by the service.
    pub color: String,
    /// Like count at fetch time.
    pub likes: u64,
}

impl ImageRecord {
    /// Decode one candidate from a page's `results` array.
    ///
    /// A candidate missing any required field (id, the three variant URLs,
    /// dimensions, color, likes) is a per-record decode failure: the caller
    /// skips it and moves on without aborting the run.
    pub fn from_candidate(candidate: &Value) -> Result<Self, serde_json::Error> {
        let payload: CandidatePayload = serde_json::from_value(candidate.clone())?;
        Ok(Self {
            id: payload.id,
            regular_url: payload.urls.regular,
            full_url: payload.urls.full,
            raw_url: payload.urls.raw,
            width: payload.width,
            height: payload.height,
            alt_text: payload.alt_description.unwrap_or_default(),
            color: payload.color,
            likes: payload.likes,
        })
    }
}

/// Raw shape of one element of the endpoint's `results` array.
#[derive(Debug, Deserialize)]
struct CandidatePayload {
    id: String,
    urls: CandidateUrls,
    width: u32,
    height: u32,
    #[serde(default)]
    alt_description: Option<String>,
    color: String,
    likes: u64,
}

#[derive(Debug, Deserialize)]
struct CandidateUrls {
    regular: String,
    full: String,
    raw: String,
}
