//! Read-only navigation queries over an integration document.
//!
//! Queries tolerate partially-built documents: a missing flow, an
//! absent step list, or an out-of-range position yields an empty
//! result rather than an error, so the editor can render transient
//! states without special handling.

use crate::document::{Flow, FlowId, Integration, ShapeDirection, Step};

impl Integration {
    /// Returns the flow with the given ID.
    ///
    /// An empty ID never resolves, and flows without an ID are never
    /// matched.
    pub fn flow(&self, flow_id: &FlowId) -> Option<&Flow> {
        if flow_id.is_empty() {
            return None;
        }
        self.flows
            .iter()
            .find(|flow| flow.id.as_ref() == Some(flow_id))
    }

    /// Returns the flow's steps, or an empty slice if the flow or its
    /// step list is missing.
    pub fn steps(&self, flow_id: &FlowId) -> &[Step] {
        self.flow(flow_id)
            .and_then(|flow| flow.steps.as_deref())
            .unwrap_or_default()
    }

    /// Returns the flow's start-slot position.
    pub fn first_position(&self, flow_id: &FlowId) -> Option<usize> {
        self.flow(flow_id)?.first_position()
    }

    /// Returns the flow's end-slot position.
    pub fn last_position(&self, flow_id: &FlowId) -> Option<usize> {
        self.flow(flow_id)?.last_position()
    }

    /// Returns a position halfway along the flow, rounding up.
    pub fn middle_position(&self, flow_id: &FlowId) -> Option<usize> {
        self.flow(flow_id)?.middle_position()
    }

    /// Returns the step at the given position of the flow.
    pub fn step(&self, flow_id: &FlowId, position: usize) -> Option<&Step> {
        self.flow(flow_id)?.step(position)
    }

    /// Returns the step in the flow's start slot.
    pub fn start_step(&self, flow_id: &FlowId) -> Option<&Step> {
        let position = self.first_position(flow_id)?;
        self.step(flow_id, position)
    }

    /// Returns the step in the flow's end slot.
    ///
    /// A flow with a single step has an empty end slot, so this
    /// returns `None` for it.
    pub fn last_step(&self, flow_id: &FlowId) -> Option<&Step> {
        let position = self.last_position(flow_id)?;
        self.step(flow_id, position)
    }

    /// Returns the steps strictly between the start and end slots.
    pub fn middle_steps(&self, flow_id: &FlowId) -> &[Step] {
        if self.last_position(flow_id).is_none_or(|last| last < 2) {
            return &[];
        }
        let Some(steps) = self.flow(flow_id).and_then(|flow| flow.steps.as_deref()) else {
            return &[];
        };
        &steps[1..steps.len() - 1]
    }

    /// Returns the steps after the given position, or `None` if the
    /// flow or its step list is missing.
    pub fn subsequent_steps(&self, flow_id: &FlowId, position: usize) -> Option<&[Step]> {
        let steps = self.flow(flow_id)?.steps.as_deref()?;
        let start = position.saturating_add(1).min(steps.len());
        Some(&steps[start..])
    }

    /// Returns the steps before the given position, or `None` if the
    /// flow or its step list is missing.
    pub fn previous_steps(&self, flow_id: &FlowId, position: usize) -> Option<&[Step]> {
        let steps = self.flow(flow_id)?.steps.as_deref()?;
        Some(&steps[..position.min(steps.len())])
    }

    /// Returns the endpoint steps after the given position.
    ///
    /// `None` means the step list itself is missing; `Some` with an
    /// empty list means it exists but holds no endpoint there. Callers
    /// rely on the difference to tell "not ready" from "no matches".
    pub fn subsequent_connections(&self, flow_id: &FlowId, position: usize) -> Option<Vec<&Step>> {
        self.subsequent_steps(flow_id, position)
            .map(|steps| steps.iter().filter(|step| step.is_endpoint()).collect())
    }

    /// Returns the endpoint steps before the given position.
    ///
    /// Distinguishes a missing step list from zero matches the same
    /// way as [`Integration::subsequent_connections`].
    pub fn previous_connections(&self, flow_id: &FlowId, position: usize) -> Option<Vec<&Step>> {
        self.previous_steps(flow_id, position)
            .map(|steps| steps.iter().filter(|step| step.is_endpoint()).collect())
    }

    /// Returns the nearest endpoint step before the given position.
    pub fn previous_connection(&self, flow_id: &FlowId, position: usize) -> Option<&Step> {
        self.previous_connections(flow_id, position)?.last().copied()
    }

    /// Returns the nearest endpoint step after the given position.
    pub fn subsequent_connection(&self, flow_id: &FlowId, position: usize) -> Option<&Step> {
        self.subsequent_connections(flow_id, position)?.first().copied()
    }

    /// Returns the steps after the given position that carry an input
    /// data shape, paired with their position in the flow.
    pub fn subsequent_steps_with_data_shape(
        &self,
        flow_id: &FlowId,
        position: usize,
    ) -> Vec<(usize, &Step)> {
        let Some(steps) = self.subsequent_steps(flow_id, position) else {
            return Vec::new();
        };
        let start = position.saturating_add(1);
        steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.has_data_shape(ShapeDirection::Input))
            .map(|(offset, step)| (start + offset, step))
            .collect()
    }

    /// Returns the steps before the given position that carry an
    /// output data shape, paired with their position in the flow.
    pub fn previous_steps_with_data_shape(
        &self,
        flow_id: &FlowId,
        position: usize,
    ) -> Vec<(usize, &Step)> {
        let Some(steps) = self.previous_steps(flow_id, position) else {
            return Vec::new();
        };
        steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.has_data_shape(ShapeDirection::Output))
            .collect()
    }

    /// Returns the position of the nearest preceding step with an
    /// output data shape.
    pub fn previous_step_index_with_data_shape(
        &self,
        flow_id: &FlowId,
        position: usize,
    ) -> Option<usize> {
        self.previous_steps_with_data_shape(flow_id, position)
            .last()
            .map(|(index, _)| *index)
    }

    /// Returns the nearest preceding step with an output data shape.
    pub fn previous_step_with_data_shape(
        &self,
        flow_id: &FlowId,
        position: usize,
    ) -> Option<&Step> {
        self.previous_steps_with_data_shape(flow_id, position)
            .last()
            .map(|(_, step)| *step)
    }

    /// Returns the nearest following step with an input data shape.
    pub fn subsequent_step_with_data_shape(
        &self,
        flow_id: &FlowId,
        position: usize,
    ) -> Option<&Step> {
        self.subsequent_steps_with_data_shape(flow_id, position)
            .first()
            .map(|(_, step)| *step)
    }

    /// Returns the first aggregate step after the given position.
    pub fn next_aggregate_step(&self, flow_id: &FlowId, position: usize) -> Option<&Step> {
        self.subsequent_steps(flow_id, position)?
            .iter()
            .find(|step| step.is_aggregate())
    }
}
