use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::types::CatalogConfig;
use crate::domain::listing::Listing;
use crate::error::{ExplorerError, Result};
use crate::ports::listing_source::ListingSource;

/// Remote catalog: `GET <url>` returning a JSON array of listings.
pub struct HttpSource {
    http: Client,
    url: Url,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl HttpSource {
    pub fn new(url: &str, config: &CatalogConfig) -> Result<Self> {
        let url = Url::parse(url)?;
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url,
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_secs(1),
        })
    }

    /// Overrides the linear backoff step between attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

#[async_trait]
impl ListingSource for HttpSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * attempt;
                debug!(attempt, ?delay, "Retrying catalog fetch");
                tokio::time::sleep(delay).await;
            }

            debug!(url = %self.url, "Fetching listing catalog");
            match self.http.get(self.url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await?;
                        return Ok(serde_json::from_str(&body)?);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(ExplorerError::SourceUnavailable {
                            reason: format!("catalog not found (404): {}", self.url),
                        });
                    }
                    warn!(%status, attempt, "Catalog endpoint returned an error status");
                    last_error = Some(ExplorerError::SourceUnavailable {
                        reason: format!("HTTP {status} for {}", self.url),
                    });
                }
                Err(e) => {
                    warn!(error = %e, attempt, "Catalog request failed");
                    last_error = Some(ExplorerError::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ExplorerError::SourceUnavailable {
            reason: "all retries exhausted".into(),
        }))
    }

    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }
}
