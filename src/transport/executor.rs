use super::envelope::{self, ApiResponse};
use crate::{Error, Result, config::ApiConfig};
use reqwest::{
    Client, Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::{Duration, Instant};
use tracing::debug;

/// Issues single HTTP calls against the assistant service.
///
/// Holds only read-only configuration, so one instance is safely shared by
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::config(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("Invalid value for header '{}': {}", name, e)))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    /// Overrides the per-request timeout taken from configuration.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        self.execute::<(), T>(Method::GET, path, None, self.timeout)
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, body, self.timeout).await
    }

    /// Runs one request and decodes the response envelope.
    ///
    /// `timeout` bounds the whole exchange, connect through body read.
    /// Transport failures and non-2xx statuses short-circuit before decoding.
    pub async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        timeout: Duration,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(envelope::encode).transpose()?;
        let bytes = self.send(method, path, body, timeout).await?;
        envelope::decode(&bytes)
    }

    /// Sends a request and returns the body of a 2xx response.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let started = Instant::now();
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        let (status, bytes) = match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => return Err(map_transport_error(e, timeout)),
            Err(_) => {
                debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "Request timed out");
                return Err(Error::Timeout(timeout));
            }
        };

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        if !status.is_success() {
            return Err(protocol_error(status, &bytes));
        }

        Ok(bytes.to_vec())
    }
}

fn protocol_error(status: StatusCode, body: &[u8]) -> Error {
    Error::Protocol {
        status: status.as_u16(),
        message: envelope::error_message(body),
    }
}

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout(timeout)
    } else if err.is_builder() {
        Error::config(format!("Invalid request: {}", err))
    } else {
        Error::network(err.to_string())
    }
}
