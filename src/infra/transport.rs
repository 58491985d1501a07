//! HTTP GET seam between the advisory client and the network.

use reqwest::{Client, Url};
use thiserror::Error;

use crate::util::version::user_agent;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

/// Status code and body of a completed GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues plain GET requests. Implemented over reqwest for the app and by
/// scripted doubles in tests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
