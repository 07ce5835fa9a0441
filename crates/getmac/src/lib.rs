//! Typed client for the GetMac virtual-machine API.
//!
//! Build a [`GetmacClient`], ask it for [`GetmacClient::virtual_machines`],
//! and call operations scoped to a project:
//!
//! ```no_run
//! use getmac::{CreateVirtualMachineRequest, GetmacClient, ProjectId};
//!
//! # async fn run() -> getmac::Result<()> {
//! let client = GetmacClient::builder().with_token("my-token").build()?;
//! let project = ProjectId::from("proj-1");
//!
//! let request = CreateVirtualMachineRequest::new("web-1", "ubuntu-24.04", "eu-west", "m1.small");
//! let vm = client.virtual_machines().create(&project, &request).await?;
//! client.virtual_machines().start(&project, &vm.id).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod virtual_machines;

pub use client::{GetmacClient, GetmacClientBuilder};
pub use getmac_core::{ClientOption, ClientSettings, Error, InstanceId, ProjectId, RawResponse};
pub use models::{CreateVirtualMachineRequest, ListVirtualMachinesResponse, VirtualMachine};
pub use virtual_machines::VirtualMachinesService;

/// Convenient result alias that reuses the shared GetMac error type.
pub type Result<T> = getmac_core::Result<T>;
