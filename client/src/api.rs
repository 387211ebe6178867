use std::time::Duration;

use reqwest::multipart::{Form, Part};
use shared::{Classifier, Endpoint, HealthStatus, Image, PredictionFailed, PredictionResult};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client for the inference service. Cheap to clone; clones share the
/// connection pool.
#[derive(Clone, Debug)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PredictionClient {
    /// `timeout` of `None` means requests may wait forever.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.root(), endpoint.path())
    }

    fn root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Probes `GET /` on the inference service.
    pub async fn health(&self) -> Result<HealthStatus, PredictionFailed> {
        let url = format!("{}/", self.root());
        let response = self.http.get(&url).send().await.map_err(|e| {
            log::warn!("Network error checking {}: {}", url, e);
            PredictionFailed
        })?;

        if !response.status().is_success() {
            log::warn!("Health check returned {}", response.status());
            return Err(PredictionFailed);
        }

        response.json::<HealthStatus>().await.map_err(|e| {
            log::warn!("Failed to parse health response: {}", e);
            PredictionFailed
        })
    }
}

impl Classifier for PredictionClient {
    async fn classify(
        &self,
        image: &Image,
        endpoint: Endpoint,
    ) -> Result<PredictionResult, PredictionFailed> {
        if image.is_empty() {
            log::warn!("Refusing to send empty image {}", image.name());
            return Err(PredictionFailed);
        }

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.name().to_string())
            .mime_str(image.mime_type())
            .map_err(|e| {
                log::warn!("Invalid content type {:?}: {}", image.mime_type(), e);
                PredictionFailed
            })?;
        let form = Form::new().part("file", part);

        let url = self.endpoint_url(endpoint);
        log::debug!("POST {} ({}, {} bytes)", url, image.name(), image.size());

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Network error for {} on {}: {}", image.name(), endpoint, e);
                PredictionFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!(
                "Server error for {} on {}: {} - {}",
                image.name(),
                endpoint,
                status,
                body
            );
            return Err(PredictionFailed);
        }

        response.json::<PredictionResult>().await.map_err(|e| {
            log::warn!("Failed to parse {} response for {}: {}", endpoint, image.name(), e);
            PredictionFailed
        })
    }
}
