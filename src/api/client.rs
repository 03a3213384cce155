use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use reqwest::{Response, StatusCode, multipart};
use tracing::{debug, warn};

/// The four operations of the clinic prediction service.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse>;

    async fn register(&self, username: &str, password: &str) -> Result<()>;

    /// Fails with [`Error::SessionExpired`] when the server answers 401.
    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>>;

    async fn predict(&self, token: &str, image: ImageFile) -> Result<PredictionResult>;
}

pub struct HttpApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: ApiConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pulls the `detail` field out of an error body, or falls back to the status reason.
async fn error_detail(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => match body.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        },
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        debug!("Logging in as {}", username);

        let response = self
            .client
            .post(self.url("/token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            warn!("Login rejected with {}: {}", status, detail);
            return Err(Error::Auth { status, detail });
        }

        Ok(response.json().await?)
    }

    async fn register(&self, username: &str, password: &str) -> Result<()> {
        debug!("Registering {}", username);

        let response = self
            .client
            .post(self.url("/register"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            warn!("Registration rejected with {}: {}", status, detail);
            return Err(Error::Registration { status, detail });
        }

        Ok(())
    }

    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.url("/history"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("History request rejected the session token");
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            warn!("History request failed with {}", status);
            return Err(Error::HistoryLoad { status });
        }

        let entries: Vec<HistoryEntry> = response.json().await?;
        debug!("Fetched {} history entries", entries.len());
        Ok(entries)
    }

    async fn predict(&self, token: &str, image: ImageFile) -> Result<PredictionResult> {
        debug!(
            "Submitting {} ({}, {} bytes) for prediction",
            image.name,
            image.content_type,
            image.bytes.len()
        );

        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.name)
            .mime_str(&image.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/predict"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            warn!("Prediction failed with {}: {}", status, detail);
            return Err(Error::Prediction { status, detail });
        }

        let result: PredictionResult = response.json().await?;
        debug!("Prediction returned {} detections", result.detections.len());
        Ok(result)
    }
}
