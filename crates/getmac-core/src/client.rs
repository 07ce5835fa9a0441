//! Transport client for the GetMac API.
//!
//! [`HttpClient`] holds connection configuration and performs one HTTP
//! exchange per call. It does not interpret status codes: any response that
//! arrives is handed back unread, and each resource service decides what
//! counts as success.

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{ClientOption, DEFAULT_BASE_URL};
use crate::error::{Error, Result};

const USER_AGENT_VALUE: &str = concat!("getmac-core/", env!("CARGO_PKG_VERSION"));

/// Per-call execution context.
///
/// Carries the deadline for a single request. Dropping the future returned by
/// [`HttpClient::execute`] cancels the request outright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    timeout: Option<Duration>,
}

impl RequestContext {
    /// Context with no deadline of its own.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// Set the deadline for the request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Deadline for the request, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    token: SecretString,
    http: Option<reqwest::Client>,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Builder seeded with the defaults: production API root, empty token,
    /// default transport and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: SecretString::from(String::new()),
            http: None,
            timeout: None,
        }
    }

    /// Apply a single option.
    #[must_use]
    pub fn apply(mut self, option: ClientOption) -> Self {
        match option {
            ClientOption::BaseUrl(url) => self.base_url = url,
            ClientOption::Token(token) => self.token = token,
            ClientOption::HttpClient(http) => self.http = Some(http),
            ClientOption::Timeout(timeout) => self.timeout = Some(timeout),
        }
        self
    }

    /// Apply options in order.
    #[must_use]
    pub fn with_options(self, options: impl IntoIterator<Item = ClientOption>) -> Self {
        options.into_iter().fold(self, Self::apply)
    }

    /// Override the API root.
    #[must_use]
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        self.apply(ClientOption::BaseUrl(base_url.into()))
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.apply(ClientOption::Token(SecretString::from(token.into())))
    }

    /// Use a caller-supplied HTTP transport.
    #[must_use]
    pub fn with_http_client(self, http: reqwest::Client) -> Self {
        self.apply(ClientOption::HttpClient(http))
    }

    /// Apply a deadline to every request.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.apply(ClientOption::Timeout(timeout))
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if no transport was supplied and the
    /// default one cannot be initialised.
    pub fn build(self) -> Result<HttpClient> {
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder().build()?,
        };

        Ok(HttpClient {
            base_url: self.base_url,
            token: self.token,
            http,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport client shared by every resource service.
#[derive(Debug)]
pub struct HttpClient {
    base_url: String,
    token: SecretString,
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Construct a client from an ordered list of options.
    ///
    /// # Errors
    ///
    /// See [`HttpClientBuilder::build`].
    pub fn new(options: impl IntoIterator<Item = ClientOption>) -> Result<Self> {
        HttpClientBuilder::new().with_options(options).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Return the API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return the client-wide timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Build the request `execute` would send, without sending it.
    ///
    /// The URL is the base URL followed by `path`, verbatim. The
    /// `Authorization` header is always `Bearer <token>`, and the
    /// `Content-Type` header is always `application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if `body` cannot be serialized and
    /// [`Error::Transport`] if the URL or headers are malformed.
    pub fn build_request<B>(
        &self,
        context: &RequestContext,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request>
    where
        B: Serialize + ?Sized,
    {
        let payload = body.map(|value| serde_json::to_vec(value)).transpose()?;

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
                .map_err(|e| Error::Transport(format!("invalid authorization header: {e}")))?;
        authorization.set_sensitive(true);

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE);

        if let Some(payload) = payload {
            request = request.body(payload);
        }
        if let Some(timeout) = context.timeout().or(self.timeout) {
            request = request.timeout(timeout);
        }

        Ok(request.build()?)
    }

    /// Perform one HTTP exchange.
    ///
    /// Returns the response unread for every status code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] before any I/O if the body cannot be
    /// serialized, and [`Error::Transport`] if the request cannot be built or
    /// the exchange fails (connection, DNS, deadline).
    pub async fn execute<B>(
        &self,
        context: &RequestContext,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(context, method, path, body)?;
        debug!(method = %request.method(), path, "sending GetMac request");

        let response = self.http.execute(request).await?;
        trace!(status = %response.status(), path, "received GetMac response");

        Ok(response)
    }
}
