//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use koppla_flow::prelude::*;
//! ```

pub use crate::document::{
    Action, ActionDescriptor, Connection, DataShape, DataShapeKind, Extension, Flow, FlowId,
    Integration, IntegrationOverview, IntegrationState, Properties, ShapeDirection, Step, StepId,
    StepKind,
};
pub use crate::editor::FlowEditor;
pub use crate::error::{ModelError, ModelResult};
pub use crate::icon::IconProvider;
pub use crate::keys::{KeySource, SequentialKeySource, UuidKeySource};
pub use crate::validate::{FlowError, FlowErrorKind};
