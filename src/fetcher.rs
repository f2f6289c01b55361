use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Instant;
use url::Url;

use crate::config::FetchConfig;
use crate::utils::error::{AppError, Result};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "pl,en;q=0.9";

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: String, // After redirects
    pub status: u16,
    pub body: String,
    pub response_time_ms: u64,
}

/// Retrieves raw page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Single GET with a browser-like identity. No retries and no caching; the
/// client's default redirect policy applies.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let start_time = Instant::now();
        let fetch_error = |source: reqwest::Error| AppError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(fetch_error)?;

        Ok(FetchedPage {
            final_url,
            status,
            body,
            response_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
