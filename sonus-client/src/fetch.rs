//! Resilient fetcher for the device REST API.
//!
//! Every call sleeps a random jitter first so concurrent scrapes do not hit
//! the device in lockstep. A "204 No Content" answer means the device has not
//! produced the data yet and is retried with a random backoff; every other
//! non-success status fails immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::error::{FetchError, Result};
use crate::payload::{describe_error, status_line};

/// Retry and jitter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Upper bound of the random delay before the first attempt.
    pub jitter: Duration,
    /// Upper bound of the random delay between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            jitter: Duration::from_millis(500),
            backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// No delays at all; handy against local devices.
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            jitter: Duration::ZERO,
            backoff: Duration::ZERO,
        }
    }
}

/// Basic-auth credentials for the device API.
#[derive(Clone, Default)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transport settings shared by every session.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// `https` in production, `http` against test doubles.
    pub scheme: String,
    /// Devices ship self-signed certificates.
    pub accept_invalid_certs: bool,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            accept_invalid_certs: true,
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Replace each `{}` in `template` with the next argument.
///
/// Missing arguments expand to nothing; surplus arguments are ignored.
pub fn expand_path(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        if let Some(arg) = args.next() {
            out.push_str(arg);
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Uniform random delay in `[0, max)` at millisecond resolution.
fn jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..max_ms))
}

/// Fetches and decodes records from one device.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    retry: RetryPolicy,
    deadline: Option<Instant>,
}

impl Fetcher {
    /// Create a fetcher for `target` (`host` or `host:port`).
    pub fn new(target: &str, credentials: Credentials, options: &ClientOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .connect_timeout(options.connect_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(FetchError::Setup)?;

        Ok(Self {
            client,
            base_url: format!("{}://{}/api", options.scheme, target),
            credentials,
            retry: options.retry,
            deadline: None,
        })
    }

    /// Bound every call and every sleep by `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Absolute URL for a path template.
    pub fn url(&self, template: &str, args: &[&str]) -> String {
        format!("{}{}", self.base_url, expand_path(template, args))
    }

    /// GET the expanded path and decode the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, template: &str, args: &[&str]) -> Result<T> {
        let url = self.url(template, args);
        let body = self.call(&url).await?;

        quick_xml::de::from_reader(body.as_slice()).map_err(|source| {
            warn!(url = %url, error = %source, "Failed to decode device response");
            FetchError::Malformed { url, source }
        })
    }

    async fn call(&self, url: &str) -> Result<Vec<u8>> {
        self.sleep(url, jitter(self.retry.jitter)).await?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(url = %url, attempt, "Calling device");

            let response = self.send(url).await?;
            let status = response.status();

            if status == StatusCode::OK {
                return self.read_body(url, response).await;
            }

            if status == StatusCode::NO_CONTENT {
                if attempt >= self.retry.attempts {
                    warn!(url = %url, attempts = attempt, "Device still not ready, giving up");
                    return Err(FetchError::NotReady {
                        url: url.to_string(),
                        attempts: attempt,
                    });
                }
                let pause = jitter(self.retry.backoff);
                warn!(
                    url = %url,
                    attempt,
                    delay_ms = pause.as_millis() as u64,
                    "Device not ready, retrying"
                );
                self.sleep(url, pause).await?;
                continue;
            }

            if status.is_redirection() {
                warn!(url = %url, status = %status, "Redirect received from device");
                return Err(FetchError::Redirect {
                    url: url.to_string(),
                    status: status_line(status),
                });
            }

            if status.is_client_error() || status.is_server_error() {
                let body = match self.read_body(url, response).await {
                    Ok(body) => body,
                    Err(err @ FetchError::DeadlineExceeded { .. }) => return Err(err),
                    Err(_) => Vec::new(),
                };
                let message = describe_error(status, &body);
                if status.is_client_error() {
                    warn!(url = %url, status = status.as_u16(), message = %message, "Device rejected request");
                    return Err(FetchError::ClientError {
                        url: url.to_string(),
                        status: status.as_u16(),
                        message,
                    });
                }
                error!(url = %url, status = status.as_u16(), message = %message, "Device reported an internal error");
                return Err(FetchError::ServerError {
                    url: url.to_string(),
                    status: status.as_u16(),
                    message,
                });
            }

            warn!(url = %url, status = %status, "Unexpected status from device");
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: status_line(status),
            });
        }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        let request = self
            .client
            .get(url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .send();

        self.bounded(url, request).await?.map_err(|source| {
            warn!(url = %url, error = %source, "Request to device failed");
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        })
    }

    async fn read_body(&self, url: &str, response: reqwest::Response) -> Result<Vec<u8>> {
        let body = self
            .bounded(url, response.bytes())
            .await?
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(body.to_vec())
    }

    async fn sleep(&self, url: &str, pause: Duration) -> Result<()> {
        if pause.is_zero() {
            return Ok(());
        }
        self.bounded(url, tokio::time::sleep(pause)).await
    }

    async fn bounded<F: Future>(&self, url: &str, fut: F) -> Result<F::Output> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut).await.map_err(|_| {
                FetchError::DeadlineExceeded {
                    url: url.to_string(),
                }
            }),
            None => Ok(fut.await),
        }
    }
}
