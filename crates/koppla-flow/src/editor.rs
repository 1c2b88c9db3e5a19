//! Document construction and repair.
//!
//! [`FlowEditor`] owns the key source used to mint flow and step
//! identifiers, so everything that creates document parts or fills in
//! missing IDs goes through it. Pure transforms that never mint keys
//! live on the document types themselves.

use std::cmp::Ordering;

use crate::document::{Connection, Flow, FlowId, Integration, Step, StepId, StepKind};
use crate::keys::{KeySource, UuidKeySource};
use crate::save::build_tags;

const TRACING_TARGET: &str = "koppla_flow::editor";

/// Builds and repairs integration documents.
///
/// The default editor mints UUID keys. Tests and reproducible
/// document construction can inject a deterministic source through
/// [`FlowEditor::with_keys`].
#[derive(Debug, Clone, Default)]
pub struct FlowEditor<K = UuidKeySource> {
    keys: K,
}

impl FlowEditor<UuidKeySource> {
    /// Creates an editor minting UUID keys.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: KeySource> FlowEditor<K> {
    /// Creates an editor minting keys from the given source.
    pub fn with_keys(keys: K) -> Self {
        Self { keys }
    }

    /// Creates a blank step with a fresh ID.
    pub fn create_step(&mut self) -> Step {
        Step {
            id: Some(StepId::new(self.keys.next_key())),
            ..Step::default()
        }
    }

    /// Creates a blank endpoint step with a fresh ID.
    pub fn create_connection_step(&mut self) -> Step {
        Step {
            kind: Some(StepKind::Endpoint),
            ..self.create_step()
        }
    }

    /// Creates an endpoint step holding the given connection.
    pub fn create_step_with_connection(&mut self, connection: Connection) -> Step {
        Step {
            kind: Some(StepKind::Endpoint),
            connection: Some(connection),
            ..self.create_step()
        }
    }

    /// Creates a flow with the given ID and empty endpoint steps in
    /// both boundary slots.
    pub fn create_flow(&mut self, id: impl Into<FlowId>) -> Flow {
        Flow {
            id: Some(id.into()),
            steps: Some(vec![
                self.create_connection_step(),
                self.create_connection_step(),
            ]),
            ..Flow::default()
        }
    }

    /// Creates an empty integration with a single unnamed flow, ready
    /// for the editor to fill in.
    pub fn create_integration(&mut self) -> Integration {
        Integration {
            flows: vec![Flow {
                id: Some(FlowId::new(self.keys.next_key())),
                name: Some(String::new()),
                steps: Some(Vec::new()),
                ..Flow::default()
            }],
            ..Integration::default()
        }
    }

    /// Returns the integration with `step` stored at `position` of
    /// the flow.
    ///
    /// A step without an ID gets a fresh one; an empty ID is kept
    /// as-is. The position directly after the last step appends.
    /// Positions past the append slot, or an unknown flow, leave the
    /// document unchanged.
    pub fn set_step_in_flow(
        &mut self,
        integration: Integration,
        flow_id: &FlowId,
        mut step: Step,
        position: usize,
    ) -> Integration {
        let Some(flow) = integration.flow(flow_id) else {
            return integration;
        };
        let mut steps = flow.steps.clone().unwrap_or_default();
        if step.id.is_none() {
            step.id = Some(StepId::new(self.keys.next_key()));
        }
        tracing::trace!(
            target: TRACING_TARGET,
            flow_id = flow_id.as_str(),
            position,
            "Setting step in flow"
        );
        match position.cmp(&steps.len()) {
            Ordering::Less => steps[position] = step,
            Ordering::Equal => steps.push(step),
            Ordering::Greater => return integration,
        }
        let flow = flow.clone().with_steps(steps);
        integration.with_flow(flow)
    }

    /// Returns the integration with the step at `position` removed
    /// from the flow.
    ///
    /// Boundary slots are never left empty: removing the start or end
    /// step puts a fresh blank endpoint step in its place. Interior
    /// positions remove the step outright. Out-of-range positions and
    /// unknown flows leave the document unchanged.
    pub fn remove_step_from_flow(
        &mut self,
        integration: Integration,
        flow_id: &FlowId,
        position: usize,
    ) -> Integration {
        let Some(flow) = integration.flow(flow_id) else {
            return integration;
        };
        let mut steps = flow.steps.clone().unwrap_or_default();
        let first = integration.first_position(flow_id);
        let last = integration.last_position(flow_id);
        tracing::trace!(
            target: TRACING_TARGET,
            flow_id = flow_id.as_str(),
            position,
            "Removing step from flow"
        );
        if Some(position) == first || Some(position) == last {
            let replacement = self.create_connection_step();
            match position.cmp(&steps.len()) {
                Ordering::Less => steps[position] = replacement,
                Ordering::Equal => steps.push(replacement),
                Ordering::Greater => return integration,
            }
        } else if position < steps.len() {
            steps.remove(position);
        } else {
            return integration;
        }
        let flow = flow.clone().with_steps(steps);
        integration.with_flow(flow)
    }

    /// Returns the flow with step IDs filled in and steps without a
    /// kind stripped out. The step list is always present afterwards.
    pub fn validate_flow_steps(&mut self, mut flow: Flow) -> Flow {
        let steps = flow
            .steps
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|step| self.ensure_step_id(step))
            .filter(|step| step.kind.is_some())
            .collect();
        flow.steps = Some(steps);
        flow
    }

    /// Returns the flows with flow and step IDs filled in and
    /// unconfigured steps stripped out.
    pub fn validate_flows(&mut self, flows: Vec<Flow>) -> Vec<Flow> {
        flows
            .into_iter()
            .map(|flow| {
                let flow = self.ensure_flow_id(flow);
                self.validate_flow_steps(flow)
            })
            .collect()
    }

    /// Performs the final checks and tweaks before the integration is
    /// handed to the persistence layer.
    ///
    /// Tags are rebuilt from the connector IDs the flows reference,
    /// then the flows are validated. Applying this twice yields the
    /// same document as applying it once.
    pub fn prepare_for_saving(&mut self, mut integration: Integration) -> Integration {
        let tags = build_tags(&integration.flows, &integration.tags);
        let flows = std::mem::take(&mut integration.flows);
        integration.flows = self.validate_flows(flows);
        integration.tags = tags;
        tracing::debug!(
            target: TRACING_TARGET,
            flow_count = integration.flows.len(),
            tag_count = integration.tags.len(),
            "Prepared integration for saving"
        );
        integration
    }

    fn ensure_flow_id(&mut self, mut flow: Flow) -> Flow {
        if flow.id.as_ref().is_none_or(FlowId::is_empty) {
            flow.id = Some(FlowId::new(self.keys.next_key()));
        }
        flow
    }

    fn ensure_step_id(&mut self, mut step: Step) -> Step {
        if step.id.as_ref().is_none_or(StepId::is_empty) {
            step.id = Some(StepId::new(self.keys.next_key()));
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FlowEditor;
    use crate::document::{Connection, Flow, FlowId, Integration, Step, StepId, StepKind};
    use crate::keys::SequentialKeySource;

    fn editor() -> FlowEditor<SequentialKeySource> {
        FlowEditor::with_keys(SequentialKeySource::new("k"))
    }

    fn flow_id() -> FlowId {
        FlowId::from("f1")
    }

    fn integration_with_steps(steps: Vec<Step>) -> Integration {
        Integration {
            flows: vec![Flow::new().with_id("f1").with_steps(steps)],
            ..Integration::default()
        }
    }

    fn step_ids(steps: &[Step]) -> Vec<&str> {
        steps
            .iter()
            .map(|step| step.id.as_ref().map_or("", |id| id.as_str()))
            .collect()
    }

    #[test]
    fn test_create_step_factories() {
        let mut editor = editor();

        let step = editor.create_step();
        assert_eq!(step.id, Some(StepId::from("k-1")));
        assert!(step.kind.is_none());

        let connection_step = editor.create_connection_step();
        assert_eq!(connection_step.kind, Some(StepKind::Endpoint));
        assert!(connection_step.connection.is_none());

        let connected = editor.create_step_with_connection(Connection::new("sql"));
        assert_eq!(connected.kind, Some(StepKind::Endpoint));
        assert_eq!(
            connected.connection.and_then(|c| c.connector_id),
            Some("sql".to_owned())
        );
    }

    #[test]
    fn test_create_flow_seeds_boundary_slots() {
        let mut editor = editor();
        let flow = editor.create_flow("f1");

        assert_eq!(flow.id, Some(FlowId::from("f1")));
        assert!(flow.name.is_none());
        let steps = flow.steps.expect("steps are seeded");
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(Step::is_endpoint));
        assert_ne!(steps[0].id, steps[1].id);
    }

    #[test]
    fn test_create_integration() {
        let mut editor = editor();
        let integration = editor.create_integration();

        assert_eq!(integration.name, "");
        assert!(integration.tags.is_empty());
        assert_eq!(integration.flows.len(), 1);
        let flow = &integration.flows[0];
        assert_eq!(flow.id, Some(FlowId::from("k-1")));
        assert_eq!(flow.name.as_deref(), Some(""));
        assert_eq!(flow.steps.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_set_step_overwrites_and_appends() {
        let mut editor = editor();
        let base = integration_with_steps(vec![
            Step {
                id: Some(StepId::from("s1")),
                ..Step::default()
            },
            Step {
                id: Some(StepId::from("s2")),
                ..Step::default()
            },
        ]);

        let step = Step {
            id: Some(StepId::from("s9")),
            ..Step::default()
        };
        let updated = editor.set_step_in_flow(base.clone(), &flow_id(), step.clone(), 1);
        assert_eq!(step_ids(updated.steps(&flow_id())), vec!["s1", "s9"]);

        let appended = editor.set_step_in_flow(base.clone(), &flow_id(), step.clone(), 2);
        assert_eq!(step_ids(appended.steps(&flow_id())), vec!["s1", "s2", "s9"]);

        let unchanged = editor.set_step_in_flow(base.clone(), &flow_id(), step.clone(), 3);
        assert_eq!(unchanged, base);

        let unchanged = editor.set_step_in_flow(base.clone(), &FlowId::from("missing"), step, 0);
        assert_eq!(unchanged, base);
    }

    #[test]
    fn test_set_step_mints_missing_id_only() {
        let mut editor = editor();
        let base = integration_with_steps(vec![Step::default()]);

        let updated = editor.set_step_in_flow(base.clone(), &flow_id(), Step::default(), 0);
        assert_eq!(step_ids(updated.steps(&flow_id())), vec!["k-1"]);

        // An empty ID is present, so it is kept rather than replaced.
        let blank = Step {
            id: Some(StepId::from("")),
            ..Step::default()
        };
        let updated = editor.set_step_in_flow(base, &flow_id(), blank, 0);
        assert_eq!(step_ids(updated.steps(&flow_id())), vec![""]);
    }

    #[test]
    fn test_remove_step_interior() {
        let mut editor = editor();
        let base = integration_with_steps(vec![
            Step {
                id: Some(StepId::from("s1")),
                ..Step::default()
            },
            Step {
                id: Some(StepId::from("s2")),
                ..Step::default()
            },
            Step {
                id: Some(StepId::from("s3")),
                ..Step::default()
            },
        ]);

        let updated = editor.remove_step_from_flow(base.clone(), &flow_id(), 1);
        assert_eq!(step_ids(updated.steps(&flow_id())), vec!["s1", "s3"]);

        let unchanged = editor.remove_step_from_flow(base.clone(), &flow_id(), 9);
        assert_eq!(unchanged, base);
    }

    #[test]
    fn test_remove_step_resets_boundary_slots() {
        let mut editor = editor();
        let base = integration_with_steps(vec![
            Step {
                id: Some(StepId::from("s1")),
                kind: Some(StepKind::Endpoint),
                connection: Some(Connection::new("sql")),
                ..Step::default()
            },
            Step {
                id: Some(StepId::from("s2")),
                ..Step::default()
            },
            Step {
                id: Some(StepId::from("s3")),
                kind: Some(StepKind::Endpoint),
                connection: Some(Connection::new("http")),
                ..Step::default()
            },
        ]);

        let updated = editor.remove_step_from_flow(base.clone(), &flow_id(), 0);
        let steps = updated.steps(&flow_id());
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].id, Some(StepId::from("k-1")));
        assert_eq!(steps[0].kind, Some(StepKind::Endpoint));
        assert!(steps[0].connection.is_none());

        let updated = editor.remove_step_from_flow(base, &flow_id(), 2);
        let steps = updated.steps(&flow_id());
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].id, Some(StepId::from("k-2")));
        assert!(steps[2].connection.is_none());
    }

    #[test]
    fn test_remove_step_single_step_flow_fills_end_slot() {
        // The end slot of a single-step flow sits one past the list,
        // so resetting it grows the list instead.
        let mut editor = editor();
        let base = integration_with_steps(vec![Step {
            id: Some(StepId::from("s1")),
            ..Step::default()
        }]);

        let updated = editor.remove_step_from_flow(base, &flow_id(), 1);
        let steps = updated.steps(&flow_id());
        assert_eq!(step_ids(steps), vec!["s1", "k-1"]);
        assert_eq!(steps[1].kind, Some(StepKind::Endpoint));
    }

    #[test]
    fn test_validate_flow_steps() {
        let mut editor = editor();
        let flow = Flow::new().with_steps(vec![
            Step {
                id: Some(StepId::from("s1")),
                kind: Some(StepKind::Endpoint),
                ..Step::default()
            },
            // No kind, stripped out.
            Step {
                id: Some(StepId::from("s2")),
                ..Step::default()
            },
            // Empty ID, minted anew.
            Step {
                id: Some(StepId::from("")),
                kind: Some(StepKind::from("log")),
                ..Step::default()
            },
            Step {
                kind: Some(StepKind::from("filter")),
                ..Step::default()
            },
        ]);

        let validated = editor.validate_flow_steps(flow);
        let steps = validated.steps.expect("step list is always present");
        assert_eq!(step_ids(&steps), vec!["s1", "k-1", "k-2"]);
    }

    #[test]
    fn test_validate_flow_steps_creates_missing_list() {
        let mut editor = editor();
        let validated = editor.validate_flow_steps(Flow::new());
        assert_eq!(validated.steps.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_validate_flows_mints_flow_ids() {
        let mut editor = editor();
        let flows = vec![
            Flow::new().with_id("f1"),
            Flow::new(),
            Flow::new().with_id(""),
        ];

        let validated = editor.validate_flows(flows);
        let ids: Vec<&str> = validated
            .iter()
            .map(|flow| flow.id.as_ref().map_or("", |id| id.as_str()))
            .collect();
        assert_eq!(ids, vec!["f1", "k-1", "k-2"]);
    }

    #[test]
    fn test_prepare_for_saving() {
        let mut editor = editor();
        let integration = Integration {
            tags: vec!["existing".to_owned()],
            flows: vec![Flow::new().with_steps(vec![
                Step {
                    kind: Some(StepKind::Endpoint),
                    connection: Some(Connection::new("sql")),
                    ..Step::default()
                },
                Step {
                    id: Some(StepId::from("s2")),
                    ..Step::default()
                },
            ])],
            ..Integration::default()
        }
        .with_property("board_id", json!("b-42"));

        let prepared = editor.prepare_for_saving(integration);
        assert_eq!(prepared.tags, vec!["existing", "sql"]);
        assert_eq!(prepared.flows[0].id, Some(FlowId::from("k-1")));
        // The unconfigured step is gone, the endpoint got an ID.
        let steps = prepared.flows[0].steps.as_deref().expect("validated steps");
        assert_eq!(step_ids(steps), vec!["k-2"]);
        // Unknown properties survive the save preparation.
        assert_eq!(prepared.properties.get("board_id"), Some(&json!("b-42")));
    }

    #[test]
    fn test_prepare_for_saving_is_idempotent() {
        let mut editor = editor();
        let integration = Integration {
            flows: vec![Flow::new().with_steps(vec![Step {
                kind: Some(StepKind::Endpoint),
                connection: Some(Connection::new("sql")),
                ..Step::default()
            }])],
            ..Integration::default()
        };

        let once = editor.prepare_for_saving(integration);
        let twice = editor.prepare_for_saving(once.clone());
        assert_eq!(twice, once);
    }
}
