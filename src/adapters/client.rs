use crate::core::{CreatedOrder, Criteria, NewOrder, Record, Result, Statistics};
use crate::domain::model::ErrorBody;
use crate::utils::error::SheetError;
use crate::utils::validation::validate_url;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Typed client for a running order-sheet server.
#[derive(Debug, Clone)]
pub struct OrderClient {
    base_url: Url,
    client: Client,
}

impl OrderClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = validate_url("base_url", base_url)?;
        // 確保 join 時保留既有路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SheetError::ConfigError {
                message: format!("Invalid endpoint '{}': {}", path, e),
            })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("Response status: {} ({} bytes)", status, body.len());

        if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(&body) {
            return Err(match status {
                StatusCode::BAD_REQUEST => SheetError::validation(error),
                _ => SheetError::host(error),
            });
        }

        if !status.is_success() {
            return Err(SheetError::host(format!("Server responded with {}", status)));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn list(&self) -> Result<Vec<Record>> {
        self.list_filtered(&Criteria::default()).await
    }

    pub async fn list_filtered(&self, criteria: &Criteria) -> Result<Vec<Record>> {
        let url = self.endpoint("")?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(criteria).send().await?;
        Self::decode(response).await
    }

    pub async fn create(&self, order: &NewOrder) -> Result<CreatedOrder> {
        let url = self.endpoint("")?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(order).send().await?;
        Self::decode(response).await
    }

    pub async fn statistics(&self, criteria: &Criteria) -> Result<Statistics> {
        let url = self.endpoint("stats")?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(criteria).send().await?;
        Self::decode(response).await
    }

    /// Sends a bare `OPTIONS /` and returns the status.
    pub async fn preflight(&self) -> Result<StatusCode> {
        let url = self.endpoint("")?;
        let response = self.client.request(Method::OPTIONS, url).send().await?;
        Ok(response.status())
    }
}
