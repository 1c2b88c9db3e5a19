//! Action metadata consumed by steps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, IntoStaticStr};

use super::Properties;
use super::shape::{DataShape, DataShapeKind, ShapeDirection};

/// Origin of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    /// Action supplied by a connector.
    Connector,
    /// Generic action attached directly to a step.
    Step,
}

/// An action a step performs, described by connector metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    /// Backend-assigned action ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Origin of the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    /// Input/output shapes and configuration metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ActionDescriptor>,
}

/// Describes an action's data shapes and configurable properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Shape of the data the action consumes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_data_shape: Option<DataShape>,
    /// Shape of the data the action produces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_data_shape: Option<DataShape>,
    /// Ordered configuration pages shown when configuring the action.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_definition_steps: Vec<ActionDescriptorStep>,
}

impl ActionDescriptor {
    /// Returns the shape for the given direction.
    pub fn data_shape(&self, direction: ShapeDirection) -> Option<&DataShape> {
        match direction {
            ShapeDirection::Input => self.input_data_shape.as_ref(),
            ShapeDirection::Output => self.output_data_shape.as_ref(),
        }
    }

    /// Collects the default values declared across every property
    /// definition step, later definitions winning on key collision.
    ///
    /// Properties without a declared default contribute nothing.
    pub fn property_defaults(&self) -> Properties {
        let mut defaults = Properties::new();
        for definition_step in &self.property_definition_steps {
            for (name, property) in &definition_step.properties {
                if let Some(value) = &property.default_value {
                    defaults.insert(name.clone(), value.clone());
                }
            }
        }
        defaults
    }

    /// Returns whether the shape for the given direction is the
    /// "any" wildcard.
    pub fn is_direction_shapeless(&self, direction: ShapeDirection) -> bool {
        self.data_shape(direction)
            .and_then(|shape| shape.kind.as_ref())
            .is_some_and(DataShapeKind::is_any)
    }

    /// Returns whether the input shape is the "any" wildcard.
    pub fn is_input_shapeless(&self) -> bool {
        self.is_direction_shapeless(ShapeDirection::Input)
    }

    /// Returns whether the output shape is the "any" wildcard.
    pub fn is_output_shapeless(&self) -> bool {
        self.is_direction_shapeless(ShapeDirection::Output)
    }

    /// Returns whether the action is effectively shapeless.
    ///
    /// Both shapes must be set with a kind, and at least one of the
    /// kinds must be the "any" wildcard.
    pub fn is_shapeless(&self) -> bool {
        let kinds = self
            .input_data_shape
            .as_ref()
            .and_then(|shape| shape.kind.as_ref())
            .zip(
                self.output_data_shape
                    .as_ref()
                    .and_then(|shape| shape.kind.as_ref()),
            );
        kinds.is_some_and(|(input, output)| input.is_any() || output.is_any())
    }
}

/// One page of configurable properties for an action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionDescriptorStep {
    /// Display name of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Configurable properties, keyed by property name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ConfigurationProperty>,
}

/// Metadata for a single configurable property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationProperty {
    /// Value used when the user has not configured the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Display name shown in configuration forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Description shown in configuration forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the property must be configured.
    #[serde(default)]
    pub required: bool,
    /// Whether the value is sensitive and must be masked.
    #[serde(default)]
    pub secret: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::shape::DataShapeKind;
    use super::*;

    fn definition_step(defaults: &[(&str, Value)]) -> ActionDescriptorStep {
        let properties = defaults
            .iter()
            .map(|(name, value)| {
                let property = ConfigurationProperty {
                    default_value: Some(value.clone()),
                    ..ConfigurationProperty::default()
                };
                ((*name).to_owned(), property)
            })
            .collect();
        ActionDescriptorStep {
            properties,
            ..ActionDescriptorStep::default()
        }
    }

    #[test]
    fn test_property_defaults_later_wins() {
        let descriptor = ActionDescriptor {
            property_definition_steps: vec![
                definition_step(&[("period", json!(60)), ("mode", json!("poll"))]),
                definition_step(&[("period", json!(120))]),
            ],
            ..ActionDescriptor::default()
        };

        let defaults = descriptor.property_defaults();
        assert_eq!(defaults.get("period"), Some(&json!(120)));
        assert_eq!(defaults.get("mode"), Some(&json!("poll")));
    }

    #[test]
    fn test_property_defaults_skip_undeclared() {
        let mut step = definition_step(&[("mode", json!("poll"))]);
        step.properties
            .insert("period".to_owned(), ConfigurationProperty::default());
        let descriptor = ActionDescriptor {
            property_definition_steps: vec![step],
            ..ActionDescriptor::default()
        };

        let defaults = descriptor.property_defaults();
        assert_eq!(defaults.len(), 1);
        assert!(!defaults.contains_key("period"));
    }

    #[test]
    fn test_shapeless_requires_both_kinds() {
        let one_sided = ActionDescriptor {
            input_data_shape: Some(DataShape::new(DataShapeKind::Any)),
            ..ActionDescriptor::default()
        };
        assert!(!one_sided.is_shapeless());
        assert!(one_sided.is_input_shapeless());

        let both = ActionDescriptor {
            input_data_shape: Some(DataShape::new(DataShapeKind::Any)),
            output_data_shape: Some(DataShape::new(DataShapeKind::JsonSchema)),
            ..ActionDescriptor::default()
        };
        assert!(both.is_shapeless());
        assert!(!both.is_output_shapeless());
    }
}
