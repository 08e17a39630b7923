use std::path::PathBuf;
use std::time::Duration;

use movies_core::{parse_movies, MovieRecord};
use reqwest::Client;

use crate::config::Config;
use crate::error::AppError;

/// Where the movie CSV comes from.
#[derive(Clone, Debug)]
pub enum DatasetSource {
    Remote(String),
    File(PathBuf),
}

pub struct DatasetClient {
    client: Client,
    source: DatasetSource,
}

impl DatasetClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let source = match &config.dataset_path {
            Some(path) => DatasetSource::File(path.clone()),
            None => DatasetSource::Remote(config.dataset_url.clone()),
        };
        Self::with_source(source, Duration::from_secs(config.http_timeout_secs))
    }

    pub fn with_source(source: DatasetSource, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent("OrderOfMovies/1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Fetch(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, source })
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Fetch the raw CSV text.
    pub async fn fetch_text(&self) -> Result<String, AppError> {
        match &self.source {
            DatasetSource::Remote(url) => {
                tracing::info!("Fetching movie dataset: {}", url);

                let resp = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| AppError::Fetch(format!("Request error: {e}")))?;

                if !resp.status().is_success() {
                    return Err(AppError::Fetch(format!("HTTP {}", resp.status())));
                }

                resp.text()
                    .await
                    .map_err(|e| AppError::Fetch(format!("Body read error: {e}")))
            }
            DatasetSource::File(path) => {
                tracing::info!("Reading movie dataset from {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AppError::Fetch(format!("{}: {e}", path.display())))
            }
        }
    }

    /// Fetch and parse every usable movie in the dataset.
    pub async fn fetch_movies(&self) -> Result<Vec<MovieRecord>, AppError> {
        let text = self.fetch_text().await?;
        let parsed = parse_movies(&text)?;

        if parsed.skipped_invalid_dates > 0 {
            tracing::warn!(
                "Skipped {} movies with invalid release dates",
                parsed.skipped_invalid_dates
            );
        }
        tracing::info!(
            movies = parsed.movies.len(),
            incomplete = parsed.skipped_incomplete,
            "Movie dataset loaded"
        );

        Ok(parsed.movies)
    }
}
