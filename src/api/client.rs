//! Issue API client implementation.
//!
//! This module provides the client for the issue collection endpoint. It
//! exposes the two fetch functions the views are bound to: the collection
//! fetch used by the table and form views, and the single-record fetch used
//! by the descriptions view. It handles request building, error mapping and
//! retry logic.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{Issue, IssueEnvelope, IssueQuery};
use crate::config::Settings;

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// Client for the issue collection endpoint.
///
/// Cheap to clone: the underlying HTTP connection pool is shared.
#[derive(Debug, Clone)]
pub struct IssuesClient {
    /// The HTTP client.
    client: Client,
    /// The collection endpoint URL.
    endpoint: String,
    /// Base delay for exponential backoff.
    retry_delay: Duration,
}

impl IssuesClient {
    /// Create a new client from the application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_timeout(
            &settings.endpoint,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Create a new client for `endpoint` with an explicit request timeout.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("issuedeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            endpoint,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    /// Override the base retry delay.
    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one page of issues.
    ///
    /// Calls `GET {endpoint}?current=..&pageSize=..&state=..` and returns the
    /// whole envelope including pagination metadata.
    #[instrument(skip(self), fields(state = %query.state, page = query.current))]
    pub async fn fetch_issues(&self, query: &IssueQuery) -> Result<IssueEnvelope> {
        let url = self.url_for(query);
        let envelope: IssueEnvelope = self.get(&url).await?;

        if envelope.success == Some(false) {
            warn!("Server flagged the issue request as unsuccessful");
            return Err(ApiError::Unsuccessful);
        }

        debug!(
            "Fetched {} issues (total: {})",
            envelope.data.len(),
            envelope.total()
        );
        Ok(envelope)
    }

    /// Fetch a single issue.
    ///
    /// Uses the same endpoint as [`fetch_issues`](Self::fetch_issues) and
    /// keeps only the first record of the returned page. An empty page
    /// yields `None`.
    #[instrument(skip(self), fields(state = %query.state))]
    pub async fn fetch_first(&self, query: &IssueQuery) -> Result<Option<Issue>> {
        let issue = self.fetch_issues(query).await?.into_first();
        debug!(found = issue.is_some(), "Fetched single record");
        Ok(issue)
    }

    /// Build the request URL for a query.
    fn url_for(&self, query: &IssueQuery) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.endpoint, separator, query.to_query_string())
    }

    /// Perform a GET request with retry logic for transient failures.
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut attempts = 0;
        let mut last_error: Option<ApiError> = None;

        while attempts < MAX_RETRIES {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.execute_get::<T>(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if Self::is_retryable(&e) && attempts < MAX_RETRIES {
                        let delay = self.retry_delay_for(attempts);
                        warn!(
                            "Request failed (attempt {}), retrying in {:?}: {}",
                            attempts, delay, e
                        );
                        tokio::time::sleep(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ApiError::ServerError("Max retries exceeded".to_string())))
    }

    /// Execute a single GET request.
    async fn execute_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Check the HTTP status and parse the JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().path().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            Err(Self::error_from_response(status, &url, &body))
        }
    }

    /// Create an error from a failed response, preferring the server's message.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("errorMessage")
                    .or_else(|| json.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .filter(|m| !m.is_empty());

        ApiError::from_status(status, message.as_deref().unwrap_or(url))
    }

    /// Check if an error is worth retrying.
    fn is_retryable(error: &ApiError) -> bool {
        matches!(
            error,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::Network(_)
        )
    }

    /// Exponential backoff delay for the given attempt (1-based).
    fn retry_delay_for(&self, attempt: u32) -> Duration {
        self.retry_delay * 2u32.pow(attempt - 1)
    }
}

/// Validate the endpoint and strip trailing slashes.
fn normalize_endpoint(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ApiError::InvalidUrl(url.to_string()));
    }

    if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("Endpoint does not use HTTPS: {}", url);
    }

    Ok(url.to_string())
}
