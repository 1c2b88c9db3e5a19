//! Integration document and lifecycle state.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

use super::Properties;
use super::flow::Flow;

/// The top-level saved document describing one or more flows.
///
/// Owned exclusively by the caller; every edit returns a new value and
/// never retains a reference, so holding onto an old document is a
/// valid way to keep edit history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Integration {
    /// Backend-assigned document ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the integration.
    #[serde(default)]
    pub name: String,
    /// Description of the integration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Flows making up the integration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flows: Vec<Flow>,
    /// Tags, deduplicated while preserving order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Backend revision counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Arbitrary properties not modeled in depth.
    #[serde(flatten)]
    pub properties: Properties,
}

impl Integration {
    /// Creates a new empty integration.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lifecycle state of a deployed integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IntegrationState {
    /// A lifecycle operation is in flight.
    Pending,
    /// Running on the execution backend.
    Published,
    /// Not currently running.
    Unpublished,
    /// The last lifecycle operation failed.
    Error,
}

impl IntegrationState {
    /// Returns whether an integration in this state can be published.
    pub const fn can_publish(&self) -> bool {
        !matches!(self, IntegrationState::Pending)
    }

    /// Returns whether an integration in this state can be activated.
    pub const fn can_activate(&self) -> bool {
        !matches!(self, IntegrationState::Pending | IntegrationState::Published)
    }

    /// Returns whether an integration in this state can be edited.
    pub const fn can_edit(&self) -> bool {
        !matches!(self, IntegrationState::Pending)
    }

    /// Returns whether an integration in this state can be deactivated.
    pub const fn can_deactivate(&self) -> bool {
        !matches!(self, IntegrationState::Unpublished)
    }
}

/// Summary of a deployed integration as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationOverview {
    /// Backend-assigned document ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the integration.
    #[serde(default)]
    pub name: String,
    /// Current lifecycle state.
    pub current_state: IntegrationState,
    /// State a pending operation is moving toward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_state: Option<IntegrationState>,
    /// Revision currently deployed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_version: Option<u32>,
}

impl IntegrationOverview {
    /// Returns whether the integration can be published.
    pub const fn can_publish(&self) -> bool {
        self.current_state.can_publish()
    }

    /// Returns whether the integration can be activated.
    pub const fn can_activate(&self) -> bool {
        self.current_state.can_activate()
    }

    /// Returns whether the integration can be edited.
    pub const fn can_edit(&self) -> bool {
        self.current_state.can_edit()
    }

    /// Returns whether the integration can be deactivated.
    pub const fn can_deactivate(&self) -> bool {
        self.current_state.can_deactivate()
    }
}
