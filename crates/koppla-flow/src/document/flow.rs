//! Flow type and position arithmetic.

use serde::{Deserialize, Serialize};

use super::id::FlowId;
use super::step::Step;

/// An ordered sequence of steps forming one executable path.
///
/// `steps` distinguishes "list not created yet" (`None`) from "created
/// and empty" (`Some` with no elements); several queries depend on the
/// difference and it must survive edits and serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flow {
    /// Flow ID, assigned on creation or during save preparation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FlowId>,
    /// Display name of the flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description of the flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered steps, absent until the flow is first laid out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

impl Flow {
    /// Creates a new empty flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flow ID.
    pub fn with_id(mut self, id: impl Into<FlowId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the step list.
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Returns the position of the start slot, or `None` if the step
    /// list has not been created.
    pub fn first_position(&self) -> Option<usize> {
        self.steps.as_ref().map(|_| 0)
    }

    /// Returns the position of the end slot, or `None` if the step
    /// list has not been created.
    ///
    /// A flow with zero or one steps still reserves a logical end slot
    /// at position 1.
    pub fn last_position(&self) -> Option<usize> {
        self.steps.as_deref().map(steps_last_position)
    }

    /// Returns a position halfway between the start and end slots,
    /// rounding up.
    pub fn middle_position(&self) -> Option<usize> {
        self.last_position().map(|last| (last + 1) / 2)
    }

    /// Returns the step at the given position.
    pub fn step(&self, position: usize) -> Option<&Step> {
        self.steps.as_ref()?.get(position)
    }
}

/// Returns the end-slot position for a step list.
///
/// Lists with zero or one steps reserve position 1 for the end slot;
/// longer lists end at their final element.
pub fn steps_last_position(steps: &[Step]) -> usize {
    if steps.len() <= 1 { 1 } else { steps.len() - 1 }
}
