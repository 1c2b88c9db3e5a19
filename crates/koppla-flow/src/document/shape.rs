//! Data shape types attached to action descriptors.

use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Discriminator for the format of a [`DataShape`] specification.
///
/// Open over its wire form: unrecognized tags are preserved in
/// [`DataShapeKind::Other`] and round-trip unchanged. Parsing is
/// case-insensitive and accepts `-` in place of `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataShapeKind {
    /// Sentinel for "no shape"; the shape does not count as present.
    None,
    /// Wildcard matching any shape.
    Any,
    /// JSON schema document.
    JsonSchema,
    /// JSON instance document.
    JsonInstance,
    /// XML schema document.
    XmlSchema,
    /// XML instance document.
    XmlInstance,
    /// Unrecognized kind tag, preserved as-is.
    Other(String),
}

impl DataShapeKind {
    /// Returns the canonical tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            DataShapeKind::None => "none",
            DataShapeKind::Any => "any",
            DataShapeKind::JsonSchema => "json_schema",
            DataShapeKind::JsonInstance => "json_instance",
            DataShapeKind::XmlSchema => "xml_schema",
            DataShapeKind::XmlInstance => "xml_instance",
            DataShapeKind::Other(tag) => tag,
        }
    }

    /// Returns whether this is the "no shape" sentinel.
    pub const fn is_no_shape(&self) -> bool {
        matches!(self, DataShapeKind::None)
    }

    /// Returns whether this is the "any shape" wildcard.
    pub const fn is_any(&self) -> bool {
        matches!(self, DataShapeKind::Any)
    }
}

impl From<String> for DataShapeKind {
    fn from(value: String) -> Self {
        // An empty tag behaves like the sentinel everywhere, so it is
        // collapsed into it rather than kept as a distinct value.
        match value.to_lowercase().replace('-', "_").as_str() {
            "" | "none" => DataShapeKind::None,
            "any" => DataShapeKind::Any,
            "json_schema" => DataShapeKind::JsonSchema,
            "json_instance" => DataShapeKind::JsonInstance,
            "xml_schema" => DataShapeKind::XmlSchema,
            "xml_instance" => DataShapeKind::XmlInstance,
            _ => DataShapeKind::Other(value),
        }
    }
}

impl From<&str> for DataShapeKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<DataShapeKind> for String {
    fn from(kind: DataShapeKind) -> Self {
        match kind {
            DataShapeKind::Other(tag) => tag,
            kind => kind.as_str().to_owned(),
        }
    }
}

/// Direction of a data shape relative to a step's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeDirection {
    /// Shape of the data flowing into the action.
    Input,
    /// Shape of the data flowing out of the action.
    Output,
}

/// Typed description of the data flowing into or out of a step's action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[builder(
    name = "DataShapeBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct DataShape {
    /// Format discriminator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DataShapeKind>,
    /// Display name of the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub name: Option<String>,
    /// Schema or sample document describing the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub specification: Option<String>,
    /// Shape metadata, including the user-defined marker.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[builder(default)]
    pub metadata: IndexMap<String, String>,
}

impl DataShapeBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.kind.is_none() {
            return Err("kind is required".into());
        }
        Ok(())
    }

    /// Marks the shape as explicitly defined by the user.
    pub fn user_defined(mut self) -> Self {
        self.metadata
            .get_or_insert_with(IndexMap::new)
            .insert(DataShape::USER_DEFINED_KEY.to_owned(), "true".to_owned());
        self
    }
}

impl DataShape {
    /// Metadata key marking a shape as explicitly set by the user.
    pub const USER_DEFINED_KEY: &'static str = "user_defined";

    /// Creates a new shape of the given kind.
    pub fn new(kind: DataShapeKind) -> Self {
        Self {
            kind: Some(kind),
            name: None,
            specification: None,
            metadata: IndexMap::new(),
        }
    }

    /// Returns a builder for creating a shape.
    pub fn builder() -> DataShapeBuilder {
        DataShapeBuilder::default()
    }

    /// Returns whether the shape counts as present.
    ///
    /// A shape is present only if its kind is set and is not the
    /// "no shape" sentinel.
    pub fn is_present(&self) -> bool {
        self.kind.as_ref().is_some_and(|kind| !kind.is_no_shape())
    }

    /// Returns whether the user explicitly set this shape.
    pub fn is_user_defined(&self) -> bool {
        self.metadata
            .get(Self::USER_DEFINED_KEY)
            .is_some_and(|value| value == "true")
    }
}
