//! YouTube Channels API types and functionality.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use youtube_analytics::parse_count;

/// Response structure for the `channels.list` API call.
///
/// Contains a list of [`Channel`] resources that match the request criteria,
/// along with pagination information in [`PageInfo`].
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#channelListResponse`.
    pub kind: String,
    /// A list of channels that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A `channel` resource contains information about a YouTube channel.
///
/// Only the `statistics` part is requested.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    pub statistics: Option<ChannelStatistics>,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelStatistics {
    /// The number of subscribers, rounded down to three significant figures by YouTube.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    /// Whether the channel's subscriber count is publicly visible.
    #[serde(rename = "hiddenSubscriberCount", default)]
    pub hidden_subscriber_count: bool,
}

impl Channel {
    /// The public subscriber count, or `None` if the channel hides it.
    pub fn subscriber_count(&self) -> Option<u64> {
        let statistics = self.statistics.as_ref()?;
        if statistics.hidden_subscriber_count {
            return None;
        }
        statistics
            .subscriber_count
            .as_deref()
            .map(|count| parse_count(Some(count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hidden_counts_are_none() {
        let response: ChannelListResponse = serde_json::from_value(serde_json::json!({
            "kind": "youtube#channelListResponse",
            "pageInfo": { "totalResults": 3, "resultsPerPage": 3 },
            "items": [
                { "id": "UC1", "statistics": { "subscriberCount": "12300", "hiddenSubscriberCount": false } },
                { "id": "UC2", "statistics": { "hiddenSubscriberCount": true } },
                { "id": "UC3" }
            ]
        }))
        .unwrap();

        let counts: Vec<_> = response.items.iter().map(Channel::subscriber_count).collect();
        assert_eq!(counts, vec![Some(12300), None, None]);
    }
}
