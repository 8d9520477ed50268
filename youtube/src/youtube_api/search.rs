//! YouTube Search API types.

use crate::youtube_api::types::PageInfo;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListResponse {
    /// The value will be `youtube#searchListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A search result points at a video, channel, or playlist matching the query.
///
/// Searches issued by this crate are restricted to videos, but the resource type is still
/// checked since the API does not promise it.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<SearchResultSnippet>,
}

impl SearchResult {
    /// The ID of the matched video, if this result is a video.
    pub fn video_id(&self) -> Option<&str> {
        if self.id.kind == "youtube#video" {
            self.id.video_id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultId {
    /// The type of the matched resource, e.g. `youtube#video`.
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// Basic details of a search result.
///
/// Only the video resource is authoritative; this is kept for logging.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Option<Timestamp>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    pub title: Option<String>,
}
