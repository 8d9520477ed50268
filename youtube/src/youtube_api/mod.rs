//! YouTube Data API v3 client library.
//!
//! Only the public, API-key authenticated endpoints needed to analyze a search are covered:
//!
//! 1. [`search::SearchResult`]s from `search.list` identify the videos matching a query.
//!    Search results only carry a shallow snippet, and cost 100 quota units per page.
//! 2. [`videos::Video`]s from `videos.list` carry the duration, category, tags, and
//!    statistics the analytics need.
//! 3. [`channels::Channel`]s from `channels.list` carry subscriber counts.
//!
//! [`YouTubeClient::fetch_dataset`] runs all three steps and returns records ready for the
//! analytics engine.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_insights::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new("my-api-key", reqwest::Client::new());
//! let dataset = client.fetch_dataset("rust tutorial", 25).await?;
//! for entry in &dataset.entries {
//!     println!("{} ({} views)", entry.record.title, entry.record.stats.view_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod channels;
pub mod client;
pub mod search;
pub mod types;
pub mod videos;

pub use client::YouTubeClient;
pub use types::{Page, PageInfo, PagedStream};

pub use categories::category_name;
pub use channels::{Channel, ChannelStatistics};
pub use search::{SearchResult, SearchResultId};
pub use videos::{Video, VideoContentDetails, VideoSnippet, VideoStatistics};
