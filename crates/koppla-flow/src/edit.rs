//! Copy-on-write editing of integration documents.
//!
//! Editing never mutates a shared document in place. Every operation
//! consumes the value and returns the updated one, so view state that
//! still holds the previous revision is unaffected.

use serde_json::Value;

use crate::document::{Flow, FlowId, Integration, Step};

/// Returns a copy of the steps with `step` inserted before `position`.
///
/// Positions past the end append.
pub fn insert_step_before(steps: &[Step], step: Step, position: usize) -> Vec<Step> {
    let position = position.min(steps.len());
    let mut updated = steps.to_vec();
    updated.insert(position, step);
    updated
}

/// Returns a copy of the steps with `step` inserted after `position`.
pub fn insert_step_after(steps: &[Step], step: Step, position: usize) -> Vec<Step> {
    insert_step_before(steps, step, position.saturating_add(1))
}

impl Integration {
    /// Returns the integration with the given name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the integration with the named property set.
    ///
    /// Known fields are updated in place when the value deserializes
    /// into the field's type; values of the wrong shape leave the
    /// document unchanged. Unknown names land in the open property
    /// bag. An empty name is a no-op.
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        if name.is_empty() {
            return self;
        }
        match name {
            "id" => assign(&mut self.id, value),
            "name" => assign(&mut self.name, value),
            "description" => assign(&mut self.description, value),
            "flows" => assign(&mut self.flows, value),
            "tags" => assign(&mut self.tags, value),
            "version" => assign(&mut self.version, value),
            "created_at" => assign(&mut self.created_at, value),
            "updated_at" => assign(&mut self.updated_at, value),
            _ => {
                self.properties.insert(name.to_owned(), value);
            }
        }
        self
    }

    /// Returns the integration with the flow stored.
    ///
    /// A flow whose ID matches an existing one replaces every match;
    /// otherwise the flow is appended. Flows without an ID are always
    /// appended.
    pub fn with_flow(mut self, flow: Flow) -> Self {
        let target = flow.id.clone().filter(|id| !id.is_empty());
        match target {
            Some(id) if self.flows.iter().any(|existing| existing.id.as_ref() == Some(&id)) => {
                self.flows = self
                    .flows
                    .into_iter()
                    .map(|existing| {
                        if existing.id.as_ref() == Some(&id) {
                            flow.clone()
                        } else {
                            existing
                        }
                    })
                    .collect();
            }
            _ => self.flows.push(flow),
        }
        self
    }

    /// Returns the integration with `step` inserted before `position`
    /// in the flow. A missing flow leaves the document unchanged.
    pub fn with_step_before(self, flow_id: &FlowId, step: Step, position: usize) -> Self {
        let Some(flow) = self.flow(flow_id) else {
            return self;
        };
        let steps = insert_step_before(flow.steps.as_deref().unwrap_or_default(), step, position);
        let flow = flow.clone().with_steps(steps);
        self.with_flow(flow)
    }

    /// Returns the integration with `step` inserted after `position`
    /// in the flow. A missing flow leaves the document unchanged.
    pub fn with_step_after(self, flow_id: &FlowId, step: Step, position: usize) -> Self {
        self.with_step_before(flow_id, step, position.saturating_add(1))
    }
}

fn assign<T: serde::de::DeserializeOwned>(field: &mut T, value: Value) {
    if let Ok(parsed) = serde_json::from_value(value) {
        *field = parsed;
    }
}
