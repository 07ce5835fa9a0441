//! # getmac-core
//!
//! Core types and the transport client for the GetMac cloud API.
//!
//! This crate owns connection configuration and the single request primitive
//! that every resource service builds on. Interpreting status codes and
//! decoding payloads is left to the services.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy shared by the transport and the services
//! - [`config`] - Construction options and loadable client settings
//! - [`client`] - The transport client and its request primitive
//! - [`response`] - Fully-read raw responses kept for diagnostics
//! - [`ids`] - Strongly-typed identifier wrappers
//! - [`query`] - Query-string assembly

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod query;
pub mod response;

pub use client::{HttpClient, HttpClientBuilder, RequestContext};
pub use config::{ClientOption, ClientSettings, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use ids::{InstanceId, ProjectId};
pub use response::RawResponse;
