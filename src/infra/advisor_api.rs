//! Typed client for the crop advisory API.
//!
//! - `GET /api/crops`, `GET /api/recommend`, `GET /api/diagnose`.
//! - Keeps the raw JSON next to the decoded body for the diagnostic echo.
//! - No caching: every call goes to the backend.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::transport::{Transport, TransportError};
use crate::domain::{
    CropsRequest, CropsResponse, DiagnoseRequest, Diagnosis, QueryParams, RecommendRequest,
    RecommendationResponse,
};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

const CROPS_PATH: &str = "api/crops";
const RECOMMEND_PATH: &str = "api/recommend";
const DIAGNOSE_PATH: &str = "api/diagnose";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server responded with HTTP {status} and no JSON body")]
    Status { status: u16 },
    #[error("invalid JSON in response: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A decoded response together with the JSON it came from.
#[derive(Clone, Debug)]
pub struct Fetched<T> {
    pub raw: Value,
    pub body: T,
}

impl<T> Fetched<T> {
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

#[derive(Clone)]
pub struct AdvisorClient<T> {
    transport: T,
    base_url: Url,
}

impl<T: Transport> AdvisorClient<T> {
    pub fn new(transport: T, base: &str) -> Result<Self, ApiError> {
        let base = base.trim();
        // Endpoint paths are joined relative to the base, so keep its last segment.
        let base_url = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn endpoint(&self, path: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path)?;
        let query = params.to_query();
        url.set_query((!query.is_empty()).then_some(query.as_str()));
        Ok(url)
    }

    pub async fn crops(&self, request: &CropsRequest) -> Result<Fetched<CropsResponse>, ApiError> {
        self.fetch(CROPS_PATH, &request.params()).await
    }

    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<Fetched<RecommendationResponse>, ApiError> {
        self.fetch(RECOMMEND_PATH, &request.params()).await
    }

    pub async fn diagnose(
        &self,
        request: &DiagnoseRequest,
    ) -> Result<Fetched<Diagnosis>, ApiError> {
        self.fetch(DIAGNOSE_PATH, &request.params()).await
    }

    async fn fetch<R>(&self, path: &str, params: &QueryParams) -> Result<Fetched<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(path, params)?;
        info!(%url, "requesting advisory endpoint");

        let response = self.transport.get(url).await?;
        let raw: Value = match serde_json::from_str(&response.body) {
            Ok(raw) => raw,
            Err(_) if !response.is_success() => {
                return Err(ApiError::Status {
                    status: response.status,
                })
            }
            Err(err) => return Err(ApiError::InvalidJson(err)),
        };
        if !response.is_success() {
            warn!(
                status = response.status,
                path, "advisory endpoint answered with an error status; rendering its JSON body"
            );
        }

        let body = serde_json::from_value(raw.clone()).map_err(ApiError::Decode)?;
        Ok(Fetched { raw, body })
    }
}
