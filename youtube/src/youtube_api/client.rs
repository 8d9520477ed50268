//! API-key authenticated client for the public YouTube Data API v3 endpoints.

use crate::youtube_api::{
    channels::ChannelListResponse,
    search::{SearchListResponse, SearchResult},
    types::{Page, PagedStream},
    videos::{Video, VideoListResponse},
};
use crate::{Dataset, DatasetEntry};
use eyre::Context;
use http::Method;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt};
use tracing::instrument;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The most IDs or results the API accepts in a single list request.
const MAX_PAGE_SIZE: usize = 50;

/// Header the API key is sent in, keeping it out of request URLs (and so out of errors).
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Client for the read-only parts of the YouTube Data API v3 that only need an API key.
///
/// Cloning is cheap; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: Arc<str>,
    client: reqwest::Client,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a new client using the given API key and a shared HTTP client.
    pub fn new(api_key: impl Into<Arc<str>>, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
        }
    }

    /// Makes a keyed GET request to the YouTube API and decodes the JSON response.
    ///
    /// Non-success statuses (including quota exhaustion) are returned as errors carrying the
    /// status and response body. Requests are not retried.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get_json<T>(&self, endpoint: &str, query_params: &[(&str, &str)]) -> eyre::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{API_BASE}/{endpoint}");
        let response = self
            .client
            .request(Method::GET, &url)
            .query(query_params)
            .header(API_KEY_HEADER, &*self.api_key)
            .send()
            .await
            .with_context(|| format!("send request to YouTube API: {endpoint}"))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request failed with status {}: {}",
                endpoint,
                status_code,
                error_text
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("parse YouTube {endpoint} API response as JSON"))
    }

    /// Returns a paginated stream of videos matching `query`, most relevant first.
    ///
    /// Uses the `search.list` API restricted to `type=video`. The stream keeps requesting pages
    /// for as long as it is polled, so callers should bound it (e.g. with `take`). Each page
    /// costs 100 quota units.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    pub fn search_videos<'a>(
        &'a self,
        query: &'a str,
    ) -> impl Stream<Item = eyre::Result<SearchResult>> + use<'a> {
        PagedStream::new(move |page_token| async move {
            let response = self.search_internal(query, page_token).await?;
            Ok::<_, eyre::Report>(Page {
                items: response.items,
                next_page_token: response.next_page_token,
            })
        })
    }

    #[instrument(skip(self))]
    async fn search_internal(
        &self,
        query: &str,
        page_token: Option<String>,
    ) -> eyre::Result<SearchListResponse> {
        let max_results = MAX_PAGE_SIZE.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let response: SearchListResponse = self.get_json("search", &query_params).await?;

        tracing::debug!(
            query,
            total_results = response.page_info.total_results,
            returned_items = response.items.len(),
            has_next_page = response.next_page_token.is_some(),
            "fetched search page"
        );

        Ok(response)
    }

    /// Gets snippet, content details, and statistics for the given videos.
    ///
    /// IDs are requested in batches of 50 using the `videos.list` API. Videos that no longer
    /// exist are silently absent from the result, which otherwise follows the order of `ids`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn list_videos(&self, ids: &[String]) -> eyre::Result<Vec<Video>> {
        let mut videos = Vec::with_capacity(ids.len());
        for batch in ids.chunks(MAX_PAGE_SIZE) {
            let joined = batch.join(",");
            let query_params = [
                ("part", "snippet,contentDetails,statistics"),
                ("id", joined.as_str()),
            ];
            let response: VideoListResponse = self
                .get_json("videos", &query_params)
                .await
                .context("fetch video details")?;

            tracing::debug!(
                requested = batch.len(),
                returned_items = response.items.len(),
                "fetched video details"
            );
            videos.extend(response.items);
        }

        sort_by_requested_order(&mut videos, ids);
        Ok(videos)
    }

    /// Gets the public subscriber counts of the given channels.
    ///
    /// Channels that hide their subscriber count, or that could not be found, are absent from
    /// the returned map.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn channel_subscribers(&self, ids: &[String]) -> eyre::Result<HashMap<String, u64>> {
        let mut subscribers = HashMap::with_capacity(ids.len());
        for batch in ids.chunks(MAX_PAGE_SIZE) {
            let joined = batch.join(",");
            let query_params = [("part", "statistics"), ("id", joined.as_str())];
            let response: ChannelListResponse = self
                .get_json("channels", &query_params)
                .await
                .context("fetch channel statistics")?;

            tracing::debug!(
                requested = batch.len(),
                returned_items = response.items.len(),
                "fetched channel statistics"
            );

            for channel in response.items {
                if let Some(count) = channel.subscriber_count() {
                    subscribers.insert(channel.id, count);
                }
            }
        }
        Ok(subscribers)
    }

    /// Collects up to `max_results` videos for `query` together with their channels' subscriber
    /// counts.
    ///
    /// Costs 100 quota units per 50 search results, plus one unit per 50 videos and per 50
    /// distinct channels.
    #[instrument(skip(self))]
    pub async fn fetch_dataset(&self, query: &str, max_results: usize) -> eyre::Result<Dataset> {
        let video_ids = collect_video_ids(self.search_videos(query), max_results).await?;

        let videos = self.list_videos(&video_ids).await?;
        if videos.len() < video_ids.len() {
            tracing::warn!(
                requested = video_ids.len(),
                returned = videos.len(),
                "some search results had no video details"
            );
        }

        let subscribers = self.channel_subscribers(&unique_channel_ids(&videos)).await?;

        Ok(Dataset {
            query: query.to_string(),
            entries: into_entries(videos, &subscribers),
        })
    }
}

/// Pull distinct video IDs out of search results until `max_results` have been found.
///
/// Duplicates and non-video results are skipped without counting toward the limit, and the
/// stream is not polled any further once the limit is reached.
async fn collect_video_ids<S>(results: S, max_results: usize) -> eyre::Result<Vec<String>>
where
    S: Stream<Item = eyre::Result<SearchResult>>,
{
    let mut video_ids = Vec::with_capacity(max_results);
    let mut seen = HashSet::new();

    let mut results = std::pin::pin!(results);
    while video_ids.len() < max_results {
        let Some(result) = results.next().await else {
            break;
        };
        let result = result.context("search for videos")?;
        match result.video_id() {
            Some(id) if seen.insert(id.to_string()) => video_ids.push(id.to_string()),
            Some(id) => tracing::trace!(video = id, "skipping duplicate search result"),
            None => tracing::warn!(kind = %result.id.kind, "skipping non-video search result"),
        }
    }

    Ok(video_ids)
}

/// Put `videos` in the order their IDs appear in `ids`; unknown IDs go last.
fn sort_by_requested_order(videos: &mut [Video], ids: &[String]) {
    let position: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    videos.sort_by_key(|video| {
        position
            .get(video.id.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
}

/// Each uploading channel once, sorted.
fn unique_channel_ids(videos: &[Video]) -> Vec<String> {
    let mut channel_ids: Vec<String> = videos
        .iter()
        .map(|video| video.snippet.channel_id.clone())
        .collect();
    channel_ids.sort();
    channel_ids.dedup();
    channel_ids
}

fn into_entries(videos: Vec<Video>, subscribers: &HashMap<String, u64>) -> Vec<DatasetEntry> {
    videos
        .into_iter()
        .map(|video| {
            let subscriber_count = subscribers.get(&video.snippet.channel_id).copied();
            DatasetEntry {
                record: video.into_record(),
                subscriber_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn video(id: &str, channel_id: &str) -> Video {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "snippet": {
                "publishedAt": "2024-03-04T09:00:00Z",
                "channelId": channel_id,
                "title": format!("Video {id}"),
            },
        }))
        .unwrap()
    }

    fn search_result(kind: &str, id: &str) -> eyre::Result<SearchResult> {
        Ok(serde_json::from_value(serde_json::json!({
            "id": { "kind": kind, "videoId": id },
        }))?)
    }

    fn ids(videos: &[Video]) -> Vec<&str> {
        videos.iter().map(|video| video.id.as_str()).collect()
    }

    #[tokio::test]
    async fn duplicates_and_non_videos_do_not_use_up_the_limit() {
        let results = tokio_stream::iter(vec![
            search_result("youtube#video", "a"),
            search_result("youtube#channel", "UC1"),
            search_result("youtube#video", "a"),
            search_result("youtube#video", "b"),
            search_result("youtube#video", "c"),
            Err(eyre::eyre!("should not be polled")),
        ]);
        let video_ids = collect_video_ids(results, 3).await.unwrap();
        assert_eq!(video_ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn short_result_sets_end_early() {
        let results = tokio_stream::iter(vec![search_result("youtube#video", "a")]);
        let video_ids = collect_video_ids(results, 25).await.unwrap();
        assert_eq!(video_ids, vec!["a"]);
    }

    #[tokio::test]
    async fn search_errors_propagate() {
        let results = tokio_stream::iter(vec![
            search_result("youtube#video", "a"),
            Err(eyre::eyre!("quota exceeded")),
        ]);
        let err = collect_video_ids(results, 5).await.unwrap_err();
        assert_eq!(format!("{err:#}"), "search for videos: quota exceeded");
    }

    #[test]
    fn videos_follow_search_order() {
        let mut videos = vec![
            video("c", "UC1"),
            video("x", "UC1"),
            video("a", "UC2"),
            video("b", "UC1"),
        ];
        let requested = ["a", "b", "c"].map(String::from);
        sort_by_requested_order(&mut videos, &requested);
        assert_eq!(ids(&videos), vec!["a", "b", "c", "x"]);
    }

    #[test]
    fn channels_are_looked_up_once() {
        let videos = vec![video("a", "UC2"), video("b", "UC1"), video("c", "UC2")];
        assert_eq!(unique_channel_ids(&videos), vec!["UC1", "UC2"]);
    }

    #[test]
    fn entries_pick_up_subscriber_counts() {
        let videos = vec![video("a", "UC1"), video("b", "UC2")];
        let subscribers = HashMap::from([("UC1".to_string(), 1200)]);
        let entries = into_entries(videos, &subscribers);

        assert_eq!(entries[0].record.video_id, "a");
        assert_eq!(entries[0].subscriber_count, Some(1200));
        assert_eq!(entries[1].record.video_id, "b");
        assert_eq!(entries[1].subscriber_count, None);
    }

    #[tokio::test]
    async fn failed_requests_do_not_reveal_the_api_key() {
        let key = "SECRET-KEY-123";
        let http = reqwest::Client::builder()
            .proxy(reqwest::Proxy::all("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap();
        let client = YouTubeClient::new(key, http);

        let err = client.fetch_dataset("rust", 5).await.unwrap_err();
        let rendered = format!("{err:?}");
        assert!(!rendered.contains(key), "{rendered}");
        assert!(!format!("{client:?}").contains(key));
    }
}
