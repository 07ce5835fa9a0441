//! Top-level GetMac client.

use std::sync::Arc;
use std::time::Duration;

use getmac_core::client::{HttpClient, HttpClientBuilder};
use getmac_core::config::{ClientOption, ClientSettings};

use crate::virtual_machines::VirtualMachinesService;
use crate::Result;

/// Builder for [`GetmacClient`].
#[derive(Debug, Default)]
pub struct GetmacClientBuilder {
    inner: HttpClientBuilder,
}

impl GetmacClientBuilder {
    /// Builder seeded with the production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: HttpClientBuilder::new(),
        }
    }

    /// Apply a single construction option.
    #[must_use]
    pub fn apply(mut self, option: ClientOption) -> Self {
        self.inner = self.inner.apply(option);
        self
    }

    /// Apply construction options in order.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = ClientOption>) -> Self {
        self.inner = self.inner.with_options(options);
        self
    }

    /// Override the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.inner = self.inner.with_base_url(base_url);
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_token(token);
        self
    }

    /// Use a caller-supplied `reqwest` client as transport.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.inner = self.inner.with_http_client(http);
        self
    }

    /// Apply a deadline to every request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be initialised.
    pub fn build(self) -> Result<GetmacClient> {
        let inner = self.inner.build()?;
        Ok(GetmacClient {
            inner: Arc::new(inner),
        })
    }
}

/// Asynchronous GetMac client.
///
/// Cheap to clone; clones share one transport and configuration.
#[derive(Debug, Clone)]
pub struct GetmacClient {
    inner: Arc<HttpClient>,
}

impl GetmacClient {
    /// Construct a client from an ordered list of options.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be initialised.
    pub fn new(options: impl IntoIterator<Item = ClientOption>) -> Result<Self> {
        GetmacClientBuilder::new().with_options(options).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> GetmacClientBuilder {
        GetmacClientBuilder::new()
    }

    /// Construct a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`getmac_core::Error::ConfigError`] if the settings are invalid.
    pub fn from_settings(settings: ClientSettings) -> Result<Self> {
        Self::new(settings.into_options()?)
    }

    /// Return the API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// Return the underlying transport client.
    #[must_use]
    pub fn transport(&self) -> &HttpClient {
        &self.inner
    }

    /// Virtual-machine operations.
    #[must_use]
    pub fn virtual_machines(&self) -> VirtualMachinesService<'_> {
        VirtualMachinesService::new(&self.inner)
    }
}
