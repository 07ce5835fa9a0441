//! Virtual-machine models as exchanged with the GetMac API.

use chrono::{DateTime, Utc};
use getmac_core::ids::InstanceId;
use serde::{Deserialize, Deserializer, Serialize};

/// Status reported for a running machine.
pub const STATUS_RUNNING: &str = "running";
/// Status reported for a stopped machine.
pub const STATUS_STOPPED: &str = "stopped";

/// A virtual machine as returned by the API.
///
/// Values are snapshots taken at call time; the client never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VirtualMachine {
    /// Instance identifier.
    pub id: InstanceId,
    /// Human-assigned name.
    pub name: String,
    /// Image reference the machine was created from.
    pub image: String,
    /// Region hosting the machine.
    pub region: String,
    /// Instance type.
    #[serde(rename = "type")]
    pub instance_type: String,
    /// Provider-defined lifecycle status.
    pub status: String,
    /// Human-readable explanation of the status. Empty when absent or null.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status_reason: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl VirtualMachine {
    /// True when the provider reports the machine as running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == STATUS_RUNNING
    }

    /// True when the provider reports the machine as stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.status == STATUS_STOPPED
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for creating a virtual machine.
///
/// Fields are forwarded verbatim; the server performs all validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateVirtualMachineRequest {
    /// Name for the new machine.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Target region.
    pub region: String,
    /// Instance type.
    #[serde(rename = "type")]
    pub instance_type: String,
}

impl CreateVirtualMachineRequest {
    /// Assemble a create request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        region: impl Into<String>,
        instance_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            region: region.into(),
            instance_type: instance_type.into(),
        }
    }
}

/// Envelope returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListVirtualMachinesResponse {
    /// Total number of machines in the project. Zero when absent.
    #[serde(default)]
    pub total: u64,
    /// Machines in server order.
    #[serde(rename = "instances")]
    pub virtual_machines: Vec<VirtualMachine>,
}

impl ListVirtualMachinesResponse {
    /// First machine whose name equals `name` exactly, in list order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&VirtualMachine> {
        self.virtual_machines.iter().find(|vm| vm.name == name)
    }
}
