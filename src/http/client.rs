//! Authenticated HTTP transport
//!
//! Handles, for a single logical call:
//! - Bearer authentication from the merged options
//! - Per-attempt timeout
//! - Automatic retries with configurable backoff
//! - Error classification (API error vs transport failure)

use super::api_error::ApiError;
use super::query::QueryParams;
use crate::config::{ClientOptions, RequestOptions};
use crate::error::{is_retryable_status, is_retryable_transport, Error, Result};
use reqwest::header::{RETRY_AFTER, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport shared by every resource of a client
pub struct HttpClient {
    client: Client,
    options: ClientOptions,
}

impl HttpClient {
    /// Create a transport from client options
    pub fn new(options: ClientOptions) -> Result<Self> {
        let client = match &options.http_client {
            Some(client) => client.clone(),
            None => Client::builder().build()?,
        };

        Ok(Self { client, options })
    }

    /// Client-level options
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Release the connection pool held by this transport
    ///
    /// The pool is freed when `self` is dropped at the end of this call,
    /// unless other clones of the reqwest handle are still alive.
    pub fn close(self) {
        debug!("Closing HTTP client for {}", self.options.base_url);
    }

    /// Make a GET request and decode the JSON response
    ///
    /// An empty success body (such as 204) yields `R::default()`.
    pub async fn get<R: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<R> {
        self.get_with_options(path, query, &RequestOptions::default())
            .await
    }

    /// Make a GET request with per-call overrides
    pub async fn get_with_options<R: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &QueryParams,
        options: &RequestOptions,
    ) -> Result<R> {
        let response = self
            .execute(Method::GET, path, Some(query), None, options)
            .await?;
        decode_json(response).await
    }

    /// Make a POST request with a JSON body and decode the JSON response
    ///
    /// An empty success body (such as 204) yields `R::default()`.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Default,
    {
        self.post_with_options(path, body, &RequestOptions::default())
            .await
    }

    /// Make a POST request with per-call overrides
    pub async fn post_with_options<B, R>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Default,
    {
        let body = serde_json::to_value(body)?;
        let response = self
            .execute(Method::POST, path, None, Some(&body), options)
            .await?;
        decode_json(response).await
    }

    /// Make a DELETE request with a JSON body, discarding the response
    pub async fn delete<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.delete_with_options(path, body, &RequestOptions::default())
            .await
    }

    /// Make a DELETE request with per-call overrides
    pub async fn delete_with_options<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::DELETE, path, None, Some(&body), options)
            .await?;
        Ok(())
    }

    /// Make a generic request
    ///
    /// Returns the response only for 2xx statuses. Retryable statuses and
    /// transient network errors are retried for idempotent methods; after
    /// that a non-2xx status becomes [`Error::Api`] and a network failure
    /// is returned as [`Error::Http`].
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
        overrides: &RequestOptions,
    ) -> Result<Response> {
        let options = self.options.merge(overrides);
        let token = options.token().ok_or(Error::MissingApiToken)?;
        let url = build_url(&options.base_url, path)?;

        // A per-call client handle is used for this call only
        let client = overrides.http_client.as_ref().unwrap_or(&self.client);

        let max_retries = if method.is_idempotent() {
            options.retry
        } else {
            0
        };
        let mut attempt = 0;

        loop {
            let mut req = client
                .request(method.clone(), url.clone())
                .bearer_auth(token)
                .header(USER_AGENT, options.user_agent.as_str())
                .timeout(options.timeout);

            if let Some(query) = query.filter(|q| !q.is_empty()) {
                req = req.query(&query.pairs());
            }

            if let Some(body) = body {
                req = req.json(body);
            }

            debug!("{} {} (attempt {}/{})", method, url, attempt + 1, max_retries + 1);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        debug!("Request succeeded: {} {} -> {}", method, url, status);
                        return Ok(response);
                    }

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = retry_after(&response)
                            .map_or_else(|| options.calculate_backoff(attempt), |d| {
                                d.min(options.max_backoff)
                            });
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(ApiError::from_response(&method, &url, response).await.into());
                }
                Err(e) => {
                    if is_retryable_transport(&e) && attempt < max_retries {
                        let delay = options.calculate_backoff(attempt);
                        warn!(
                            "Request error ({}), attempt {}/{}, retrying in {:?}",
                            e,
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Append `path` to the base URL, keeping the base path prefix
pub(crate) fn build_url(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

/// Decode a JSON body; an empty body yields the default value
async fn decode_json<R: DeserializeOwned + Default>(response: Response) -> Result<R> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(R::default());
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract retry-after header value in seconds
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
}
