//! Pagination shared by the YouTube API list endpoints.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

/// One page of a list response, reduced to what pagination needs.
#[derive(Debug)]
pub struct Page<T> {
    pub items: VecDeque<T>,
    pub next_page_token: Option<String>,
}

type PendingPage<'a, F, T> = Pin<Box<dyn Future<Output = eyre::Result<(F, Page<T>)>> + 'a + Send>>;

/// Yields the items of a paginated list endpoint one at a time.
///
/// The next page is requested only once the current one has been drained, so a consumer that
/// stops early (for example via `StreamExt::take`) never pays for pages it does not read.
/// A failed page request is yielded as an error and ends the stream. So does a page with no
/// items, even if it carries a `nextPageToken`, since consumers bounded by item count would
/// otherwise keep requesting empty pages forever.
pub struct PagedStream<'a, T, F> {
    buffered: VecDeque<T>,
    pending: Option<PendingPage<'a, F, T>>,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    /// `fetch_page` is called with `None` for the first page and with the previous page's
    /// `nextPageToken` after that.
    pub fn new<Fut>(fetch_page: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<Page<T>>> + Send + 'a,
    {
        Self {
            buffered: VecDeque::new(),
            pending: Some(Self::request(fetch_page, None)),
        }
    }

    fn request<Fut>(fetch_page: F, token: Option<String>) -> PendingPage<'a, F, T>
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<Page<T>>> + Send + 'a,
    {
        Box::pin(async move {
            let page = fetch_page(token).await?;
            Ok((fetch_page, page))
        })
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = eyre::Result<Page<T>>> + Send + 'a,
{
    type Item = eyre::Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            let Some(pending) = self.pending.as_mut() else {
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetch_page, page))) => {
                    if page.items.is_empty() {
                        self.pending = None;
                        continue;
                    }
                    self.buffered.extend(page.items);
                    self.pending = page
                        .next_page_token
                        .map(|token| Self::request(fetch_page, Some(token)));
                }
                Poll::Ready(Err(e)) => {
                    self.pending = None;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    ///
    /// For searches this is an approximation and may be far larger than what can be paged
    /// through.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}
