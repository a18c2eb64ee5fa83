use std::{sync::Arc, time::Duration};

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use super::{
    cancel::CancelSignal,
    config::ApiConfig,
    error::{ApiError, ApiErrorKind},
    transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError},
};

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Per-call knobs.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub signal: Option<CancelSignal>,
    /// Return error responses as raw `HTTP_ERROR`s instead of classifying them.
    pub skip_error_handler: bool,
    /// Correlation id sent as `X-Request-ID`; a UUID v4 is generated when unset.
    pub request_id: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signal(mut self, signal: CancelSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_skip_error_handler(mut self, skip: bool) -> Self {
        self.skip_error_handler = skip;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// JSON REST client: builds requests, classifies failures and retries
/// transient ones.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Get, path, params, None, options).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        self.request(Method::Post, path, &[], Some(body), options).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        self.request(Method::Put, path, &[], Some(body), options).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        self.request(Method::Patch, path, &[], Some(body), options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::Delete, path, &[], None, options).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let request_id = options
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let request = HttpRequest {
            method,
            url: self.config.url(path),
            query: params
                .iter()
                .map(|(key, value)| ((*key).to_string(), value.clone()))
                .collect(),
            headers: vec![
                ("X-Request-ID", request_id.clone()),
                ("Content-Type", "application/json".to_string()),
                ("Accept", "application/json".to_string()),
            ],
            body,
        };

        let mut attempt = 0;
        loop {
            tracing::debug!(%method, url = %request.url, %request_id, attempt, "api request");
            let error = match self.send_once(&request, &options).await {
                Ok(response) => {
                    tracing::debug!(%request_id, status = response.status, "api response");
                    return decode(&response.body);
                }
                Err(failure) => failure,
            };

            if attempt >= self.config.max_retries || !error.retryable {
                tracing::debug!(%request_id, error = %error.error, "api request failed");
                return Err(error.error);
            }
            let delay = retry_delay(self.config.retry_delay, attempt);
            tracing::warn!(
                %request_id,
                attempt = attempt + 1,
                max_retries = self.config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error.error,
                "api request failed, retrying"
            );
            if !sleep_unless_cancelled(delay, options.signal.as_ref()).await {
                return Err(ApiError::cancelled());
            }
            attempt += 1;
        }
    }

    async fn send_once(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
    ) -> Result<HttpResponse, Failure> {
        let sent = match &options.signal {
            Some(signal) if signal.is_cancelled() => return Err(Failure::fatal(ApiError::cancelled())),
            Some(signal) => {
                tokio::select! {
                    result = self.transport.send(request.clone()) => result,
                    _ = signal.cancelled() => return Err(Failure::fatal(ApiError::cancelled())),
                }
            }
            None => self.transport.send(request.clone()).await,
        };

        match sent {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => {
                let retryable = ApiErrorKind::from_status(response.status).is_retryable();
                let error = if options.skip_error_handler {
                    ApiError::raw_response(response.status, &response.body)
                } else {
                    ApiError::from_response(response.status, &response.body)
                };
                Err(Failure { error, retryable })
            }
            Err(TransportError::Build(message)) => Err(Failure::fatal(ApiError::request(message))),
            Err(err) => {
                let error = if options.skip_error_handler {
                    ApiError::request(err.to_string())
                } else {
                    ApiError::network()
                };
                Err(Failure {
                    error,
                    retryable: true,
                })
            }
        }
    }
}

struct Failure {
    error: ApiError,
    retryable: bool,
}

impl Failure {
    fn fatal(error: ApiError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::request(format!("request body could not be encoded: {err}")))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text)
        .map_err(|err| ApiError::request(format!("response body could not be decoded: {err}")))
}

/// Doubles per attempt, capped at thirty seconds.
fn retry_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(MAX_RETRY_DELAY)
}

/// Returns false when the signal fired before the delay elapsed.
async fn sleep_unless_cancelled(delay: Duration, signal: Option<&CancelSignal>) -> bool {
    match signal {
        Some(signal) => tokio::select! {
            _ = tokio::time::sleep(delay) => true,
            _ = signal.cancelled() => false,
        },
        None => {
            tokio::time::sleep(delay).await;
            true
        }
    }
}
