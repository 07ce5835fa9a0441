//! Virtual-machine resource service.
//!
//! Each operation is one HTTP exchange scoped to a project. The body is read
//! in full before anything is interpreted, a status other than `200 OK` is
//! reported as [`Error::UnexpectedStatus`] without decoding, and decode
//! failures keep the raw response for diagnostics.

use std::time::Duration;

use getmac_core::client::{HttpClient, RequestContext};
use getmac_core::ids::{InstanceId, ProjectId};
use getmac_core::query::QueryParams;
use getmac_core::response::RawResponse;
use getmac_core::Error;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::models::{CreateVirtualMachineRequest, ListVirtualMachinesResponse, VirtualMachine};
use crate::Result;

/// Operations on the `/instances` collection.
#[derive(Debug, Clone, Copy)]
pub struct VirtualMachinesService<'a> {
    client: &'a HttpClient,
    context: RequestContext,
}

impl<'a> VirtualMachinesService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            context: RequestContext::new(),
        }
    }

    /// Apply a deadline to every request made through this service value.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.context = self.context.with_timeout(timeout);
        self
    }

    /// Create a virtual machine.
    ///
    /// # Errors
    ///
    /// Transport failures, any status other than 200, or an undecodable body.
    pub async fn create(
        &self,
        project_id: &ProjectId,
        request: &CreateVirtualMachineRequest,
    ) -> Result<VirtualMachine> {
        let path = collection_path(project_id);
        self.send_json(Method::POST, &path, Some(request)).await
    }

    /// Fetch a virtual machine by id.
    ///
    /// # Errors
    ///
    /// Transport failures, any status other than 200, or an undecodable body.
    pub async fn get(&self, project_id: &ProjectId, id: &InstanceId) -> Result<VirtualMachine> {
        let path = instance_path(project_id, id, None);
        self.send_json::<(), _>(Method::GET, &path, None).await
    }

    /// Fetch the first virtual machine whose name equals `name` exactly.
    ///
    /// Performs a single list call and scans it in server order.
    ///
    /// # Errors
    ///
    /// Anything [`list`](Self::list) returns, or [`Error::NotFound`] carrying
    /// the list response when no name matches.
    pub async fn get_by_name(&self, project_id: &ProjectId, name: &str) -> Result<VirtualMachine> {
        let (raw, page) = self.fetch_page(project_id).await?;
        debug!(
            project = %project_id,
            count = page.virtual_machines.len(),
            name,
            "scanning virtual machines by name"
        );

        page.find_by_name(name).cloned().ok_or_else(|| Error::NotFound {
            name: name.to_string(),
            response: Box::new(raw),
        })
    }

    /// List the virtual machines of a project in server order.
    ///
    /// # Errors
    ///
    /// Transport failures, any status other than 200, or an undecodable body.
    pub async fn list(&self, project_id: &ProjectId) -> Result<Vec<VirtualMachine>> {
        Ok(self.list_page(project_id).await?.virtual_machines)
    }

    /// List the virtual machines of a project along with the reported total.
    ///
    /// # Errors
    ///
    /// Transport failures, any status other than 200, or an undecodable body.
    pub async fn list_page(&self, project_id: &ProjectId) -> Result<ListVirtualMachinesResponse> {
        let (_, page) = self.fetch_page(project_id).await?;
        Ok(page)
    }

    /// Delete a virtual machine.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn delete(&self, project_id: &ProjectId, id: &InstanceId) -> Result<()> {
        let path = instance_path(project_id, id, None);
        self.send::<()>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Start a virtual machine.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn start(&self, project_id: &ProjectId, id: &InstanceId) -> Result<()> {
        let path = instance_path(project_id, id, Some("start"));
        self.send::<()>(Method::POST, &path, None).await?;
        Ok(())
    }

    /// Stop a virtual machine.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn stop(&self, project_id: &ProjectId, id: &InstanceId) -> Result<()> {
        let path = instance_path(project_id, id, Some("stop"));
        self.send::<()>(Method::POST, &path, None).await?;
        Ok(())
    }

    async fn fetch_page(
        &self,
        project_id: &ProjectId,
    ) -> Result<(RawResponse, ListVirtualMachinesResponse)> {
        let path = collection_path(project_id);
        let raw = self.send::<()>(Method::GET, &path, None).await?;
        let page = raw.json()?;
        Ok((raw, page))
    }

    async fn send_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send(method, path, body).await?.json()
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<RawResponse>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self
            .client
            .execute(&self.context, method, path, body)
            .await?;
        RawResponse::read(response).await?.expect_status(StatusCode::OK)
    }
}

fn scoped(path: &str, project_id: &ProjectId) -> String {
    let mut params = QueryParams::new();
    params.push("project_id", project_id);
    params.append_to(path)
}

fn collection_path(project_id: &ProjectId) -> String {
    scoped("/instances", project_id)
}

fn instance_path(project_id: &ProjectId, id: &InstanceId, action: Option<&str>) -> String {
    match action {
        Some(action) => scoped(&format!("/instances/{id}/{action}"), project_id),
        None => scoped(&format!("/instances/{id}"), project_id),
    }
}
