//! Flow validation.
//!
//! Validation reports issues with a flow's boundary slots without
//! modifying the document. Repairs such as minting missing IDs live
//! in [`crate::editor`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

use crate::document::{FlowId, Integration, Step};
use crate::error::{ModelError, ModelResult};

/// Issue classes a flow can exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FlowErrorKind {
    /// The start slot holds no usable connection.
    NoStartConnection,
    /// The end slot holds no usable connection.
    NoFinishConnection,
    /// The flow has no name. Currently unused by
    /// [`Integration::validate_flow`], kept so stored findings keep
    /// deserializing.
    NoName,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowError {
    /// Issue class.
    pub kind: FlowErrorKind,
    /// Optional human-readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FlowError {
    /// Creates a new finding of the given kind.
    pub fn new(kind: FlowErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Attaches a human-readable message to the finding.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Integration {
    /// Inspects the flow and returns the issues found with it.
    ///
    /// Only an empty flow ID is an error. An unknown flow ID is
    /// reported through findings like any other flow with empty
    /// boundary slots.
    pub fn validate_flow(&self, flow_id: &FlowId) -> ModelResult<Vec<FlowError>> {
        if flow_id.is_empty() {
            return Err(ModelError::EmptyFlowId);
        }
        let mut errors = Vec::new();
        if lacks_connection(self.start_step(flow_id)) {
            errors.push(FlowError::new(FlowErrorKind::NoStartConnection));
        }
        if lacks_connection(self.last_step(flow_id)) {
            errors.push(FlowError::new(FlowErrorKind::NoFinishConnection));
        }
        Ok(errors)
    }
}

/// A boundary slot is unusable when it is empty, its step has no
/// kind, or it holds an endpoint without a connection. Non-endpoint
/// steps with a kind need no connection.
fn lacks_connection(step: Option<&Step>) -> bool {
    let Some(step) = step else {
        return true;
    };
    if step.kind.is_none() {
        return true;
    }
    step.is_endpoint() && step.connection.is_none()
}
