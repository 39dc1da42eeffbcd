//! Minimal YouTube Data API v3 client
//!
//! Two endpoints are used: `search.list` to page through a channel's video
//! ids and `videos.list` to fetch snippets in batches. Requests are issued
//! one after another; there is no retry.

use serde::de::DeserializeOwned;

use super::error::{Error, Result};
use super::models::{
    ApiErrorResponse, SearchListResponse, VideoDescription, VideoListResponse,
};
use crate::constants::{YOUTUBE_API_BASE_URL, YOUTUBE_MAX_RESULTS};

/// YouTube Data API client authenticated with an API key
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client against the public API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, YOUTUBE_API_BASE_URL)
    }

    /// Create a client against another base URL (tests, proxies)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Every video of a channel with its title and description
    pub async fn fetch_channel_descriptions(
        &self,
        channel_id: &str,
    ) -> Result<Vec<VideoDescription>> {
        let video_ids = self.list_channel_video_ids(channel_id).await?;
        tracing::info!("Found {} videos for channel {}", video_ids.len(), channel_id);
        self.fetch_videos(&video_ids).await
    }

    /// Page through `search.list` until no continuation token is returned
    pub async fn list_channel_video_ids(&self, channel_id: &str) -> Result<Vec<String>> {
        let max_results = YOUTUBE_MAX_RESULTS.to_string();
        let mut video_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("part", "id"),
                ("channelId", channel_id),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: SearchListResponse = self.get_json("search", &query).await?;
            video_ids.extend(page.video_ids().map(str::to_string));

            tracing::debug!(
                "Fetched search page, {} video ids so far",
                video_ids.len()
            );

            match page.continuation() {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(video_ids)
    }

    /// Fetch snippets for the given ids, at most 50 ids per request
    ///
    /// Videos come back in response order; ids the API does not know
    /// (deleted or private videos) are simply absent.
    pub async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<VideoDescription>> {
        let mut videos = Vec::with_capacity(video_ids.len());

        for batch in video_ids.chunks(YOUTUBE_MAX_RESULTS) {
            let ids = batch.join(",");
            let response: VideoListResponse = self
                .get_json("videos", &[("part", "snippet"), ("id", ids.as_str())])
                .await?;
            videos.extend(response.items.into_iter().map(VideoDescription::from));
        }

        Ok(videos)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::error!("YouTube {} request failed ({}): {}", endpoint, status, message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Pull `error.message` out of a Google API error body
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|e| e.error.message)
}
