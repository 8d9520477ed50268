//! YouTube Videos API types and conversion into analytics records.

use crate::youtube_api::categories::category_name;
use crate::youtube_api::types::PageInfo;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use youtube_analytics::{VideoRecord, VideoStats, parse_count};

/// Response structure for the `videos.list` API call.
///
/// Contains a list of [`Video`] resources that match the request criteria,
/// along with pagination information in [`PageInfo`].
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#videoListResponse`.
    pub kind: String,
    /// A list of videos that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Video>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A `video` resource represents a YouTube video.
///
/// Requested with the `snippet`, `contentDetails`, and `statistics` parts. The latter two may
/// be missing for videos that are private, still processing, or region-restricted.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
}

/// Basic details about a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoSnippet {
    /// The date and time that the video was published.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
    /// Keyword tags. Only visible for some videos.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

/// Information about the video content.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration, e.g. `PT15M33S`.
    pub duration: Option<String>,
    /// Whether captions are available, as the string `"true"` or `"false"`.
    pub caption: Option<String>,
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    ///
    /// Absent when the uploader has hidden likes.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of comments for the video.
    ///
    /// Absent when comments are disabled.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

impl Video {
    /// Flatten the API resource into the record the analytics engine works on.
    ///
    /// Missing or malformed counts become zero.
    pub fn into_record(self) -> VideoRecord {
        let stats = self
            .statistics
            .map(|s| {
                VideoStats::new(
                    parse_count(s.view_count.as_deref()),
                    parse_count(s.like_count.as_deref()),
                    parse_count(s.comment_count.as_deref()),
                )
            })
            .unwrap_or_default();

        let (duration_code, has_captions) = match self.content_details {
            Some(details) => (details.duration, details.caption.as_deref() == Some("true")),
            None => (None, false),
        };

        VideoRecord {
            video_id: self.id,
            category: category_name(self.snippet.category_id.as_deref()).to_string(),
            title: self.snippet.title,
            description: self.snippet.description,
            channel_id: self.snippet.channel_id,
            channel_title: self.snippet.channel_title,
            duration_code,
            published_at: self.snippet.published_at,
            stats,
            tags: self.snippet.tags,
            has_captions,
        }
    }
}
