//! Step types and step-level editing operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Properties;
use super::action::{Action, ActionDescriptor, ActionType};
use super::connection::{Connection, Extension};
use super::id::StepId;
use super::shape::{DataShape, ShapeDirection};
use crate::save::stringify_values;

/// Discriminator for the role of a step within a flow.
///
/// Open over its wire form: unrecognized tags are preserved in
/// [`StepKind::Other`] and round-trip unchanged. Comparison of tags is
/// exact; an endpoint step is `"endpoint"`, never `"Endpoint"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepKind {
    /// Connection-backed step; flows must start and end with one.
    Endpoint,
    /// Step combining multiple inbound messages into one.
    Aggregate,
    /// Step invoking an extension.
    Extension,
    /// Generic step identified by a custom tag.
    Other(String),
}

impl StepKind {
    /// Returns the wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            StepKind::Endpoint => "endpoint",
            StepKind::Aggregate => "aggregate",
            StepKind::Extension => "extension",
            StepKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for StepKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "endpoint" => StepKind::Endpoint,
            "aggregate" => StepKind::Aggregate,
            "extension" => StepKind::Extension,
            _ => StepKind::Other(value),
        }
    }
}

impl From<&str> for StepKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<StepKind> for String {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Other(tag) => tag,
            kind => kind.as_str().to_owned(),
        }
    }
}

/// A single unit in a flow.
///
/// A step without a kind is incomplete; save preparation strips it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    /// Step ID, assigned on creation or during save preparation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StepId>,
    /// Display name of the step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role discriminator; unset while the step is being assembled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<StepKind>,
    /// Connection, present on endpoint steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,
    /// Extension, present on extension steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
    /// Action the step performs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Configured property values, stringified for the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_properties: Option<Properties>,
    /// Arbitrary step metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Properties>,
}

impl Step {
    /// Returns whether this is an endpoint step.
    pub const fn is_endpoint(&self) -> bool {
        matches!(self.kind, Some(StepKind::Endpoint))
    }

    /// Returns whether this is an aggregate step.
    pub const fn is_aggregate(&self) -> bool {
        matches!(self.kind, Some(StepKind::Aggregate))
    }

    /// Returns the action's shape for the given direction.
    pub fn data_shape(&self, direction: ShapeDirection) -> Option<&DataShape> {
        self.action
            .as_ref()?
            .descriptor
            .as_ref()?
            .data_shape(direction)
    }

    /// Returns whether the step carries a present shape for the
    /// given direction.
    pub fn has_data_shape(&self, direction: ShapeDirection) -> bool {
        self.data_shape(direction).is_some_and(DataShape::is_present)
    }

    /// Merges the given entries over the step's metadata, new values
    /// winning on key collision.
    pub fn with_metadata(mut self, entries: Properties) -> Self {
        let mut merged = self.metadata.take().unwrap_or_default();
        merged.extend(entries);
        self.metadata = Some(merged);
        self
    }

    /// Writes the shape into the action descriptor at the given
    /// direction, creating a blank action and descriptor as needed.
    pub fn with_data_shape(mut self, shape: DataShape, direction: ShapeDirection) -> Self {
        let mut action = self.action.take().unwrap_or_default();
        let mut descriptor = action.descriptor.take().unwrap_or_default();
        match direction {
            ShapeDirection::Input => descriptor.input_data_shape = Some(shape),
            ShapeDirection::Output => descriptor.output_data_shape = Some(shape),
        }
        action.descriptor = Some(descriptor);
        self.action = Some(action);
        self
    }

    /// Replaces the configured properties with a stringified copy.
    ///
    /// The execution backend accepts only scalar configuration values,
    /// so everything except strings and numbers is stored as JSON text.
    pub fn with_configured_properties(mut self, properties: Properties) -> Self {
        self.configured_properties = Some(stringify_values(properties));
        self
    }

    /// Replaces the step's action and kind.
    ///
    /// Left unchanged when the step already carries an action with the
    /// same ID, so downstream recomputation is not triggered twice.
    pub fn with_action(mut self, action: Action, kind: StepKind) -> Self {
        if let Some(existing) = &self.action {
            if existing.id == action.id {
                return self;
            }
        }
        self.kind = Some(kind);
        self.action = Some(action);
        self
    }

    /// Attaches a new descriptor, layering configuration defaults under
    /// existing values and keeping shapes the user already settled on.
    ///
    /// A step without an action gets a generic one carrying only the
    /// descriptor. Otherwise the configured properties become the
    /// descriptor's declared defaults overlaid with the existing
    /// values, and for each direction the prior shape survives if it
    /// is user-defined, or if the incoming shape is a placeholder
    /// without a specification.
    pub fn with_descriptor(mut self, descriptor: ActionDescriptor) -> Self {
        let Some(mut action) = self.action.take() else {
            self.action = Some(Action {
                action_type: Some(ActionType::Step),
                descriptor: Some(descriptor),
                ..Action::default()
            });
            return self;
        };

        let defaults = descriptor.property_defaults();

        let Some(previous) = action.descriptor.take() else {
            if self.configured_properties.is_none() {
                self.configured_properties = Some(defaults);
            }
            action.descriptor = Some(descriptor);
            self.action = Some(action);
            return self;
        };

        let mut properties = defaults;
        if let Some(existing) = self.configured_properties.take() {
            properties.extend(existing);
        }

        let mut descriptor = descriptor;
        if keep_existing_shape(
            previous.input_data_shape.as_ref(),
            descriptor.input_data_shape.as_ref(),
        ) {
            descriptor.input_data_shape = previous.input_data_shape;
        }
        if keep_existing_shape(
            previous.output_data_shape.as_ref(),
            descriptor.output_data_shape.as_ref(),
        ) {
            descriptor.output_data_shape = previous.output_data_shape;
        }

        action.descriptor = Some(descriptor);
        self.action = Some(action);
        self.configured_properties = Some(properties);
        self
    }
}

/// Whether the prior shape must survive a descriptor replacement.
///
/// True when the prior shape is user-defined, or when the incoming
/// shape is present but carries no specification and would clobber a
/// concrete shape with a vague placeholder.
fn keep_existing_shape(previous: Option<&DataShape>, incoming: Option<&DataShape>) -> bool {
    if previous.is_some_and(DataShape::is_user_defined) {
        return true;
    }
    incoming.is_some_and(|shape| {
        shape.is_present() && shape.specification.as_deref().is_none_or(str::is_empty)
    })
}
