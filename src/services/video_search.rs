use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    config::Config,
    constants::VIDEO_RESULT_CAP,
    errors::{AppError, AppResult},
};

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Watch URL of the most relevant video for `query`, if any.
    async fn best_video_url(&self, query: &str) -> AppResult<Option<String>>;
}

pub struct YouTubeVideoSearch {
    client: Client,
    api_key: Option<SecretString>,
    api_base: String,
}

impl YouTubeVideoSearch {
    pub fn new(api_key: Option<SecretString>, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.youtube_api_key.clone(), &config.youtube_api_base)
    }
}

#[async_trait]
impl VideoSearch for YouTubeVideoSearch {
    async fn best_video_url(&self, query: &str) -> AppResult<Option<String>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Configuration("YOUTUBE_API_KEY is not set".to_string()))?;

        let url = format!("{}/search", self.api_base);
        let max_results = VIDEO_RESULT_CAP.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("type", "video"),
                ("order", "relevance"),
                ("key", api_key.expose_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Video search for '{}' failed with {}: {}", query, status, body);
            return Err(AppError::ExternalService(format!(
                "video search returned {}",
                status
            )));
        }

        let body: SearchResponse = response.json().await?;
        Ok(first_watch_url(body))
    }
}

fn first_watch_url(response: SearchResponse) -> Option<String> {
    response
        .items
        .into_iter()
        .find_map(|item| item.id.video_id)
        .map(|video_id| format!("{}{}", WATCH_URL_BASE, video_id))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}
