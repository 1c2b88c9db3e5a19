//! Integration document types.
//!
//! The document is a plain value tree: an [`Integration`] holds
//! [`Flow`]s, each flow an ordered list of [`Step`]s. All types are
//! JSON-friendly and edited copy-on-write through owned `with_*`
//! methods.

mod action;
mod connection;
mod flow;
mod id;
mod integration;
mod shape;
mod step;

pub use action::{
    Action, ActionDescriptor, ActionDescriptorStep, ActionType, ConfigurationProperty,
};
pub use connection::{Connection, Extension};
pub use flow::{Flow, steps_last_position};
pub use id::{FlowId, StepId};
pub use integration::{Integration, IntegrationOverview, IntegrationState};
pub use shape::{DataShape, DataShapeBuilder, DataShapeKind, ShapeDirection};
pub use step::{Step, StepKind};

/// Ordered map of arbitrary JSON-valued properties.
///
/// Key order is preserved across edit and serialization cycles.
pub type Properties = indexmap::IndexMap<String, serde_json::Value>;
