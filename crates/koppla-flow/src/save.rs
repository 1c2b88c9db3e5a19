//! Save-time preparation helpers.

use indexmap::IndexSet;
use serde_json::Value;

use crate::document::{Flow, Properties};

/// Converts configured property values into the strings-and-numbers
/// form the persistence layer accepts.
///
/// Strings and numbers pass through untouched. Everything else is
/// replaced with its compact JSON rendering.
pub fn stringify_values(properties: Properties) -> Properties {
    properties
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(_) | Value::Number(_) => (name, value),
            other => (name, Value::String(other.to_string())),
        })
        .collect()
}

/// Merges the connector IDs referenced by the flows' endpoint steps
/// into the existing tags.
///
/// Existing tags come first, order is preserved and duplicates are
/// dropped. Endpoint steps without a connection or connector ID
/// contribute nothing.
pub fn build_tags(flows: &[Flow], tags: &[String]) -> Vec<String> {
    let mut merged: IndexSet<String> = tags.iter().cloned().collect();
    for flow in flows {
        for step in flow.steps.as_deref().unwrap_or_default() {
            if !step.is_endpoint() {
                continue;
            }
            let Some(connection) = step.connection.as_ref() else {
                continue;
            };
            if let Some(connector_id) = connection.connector_id.as_ref() {
                merged.insert(connector_id.clone());
            }
        }
    }
    merged.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{build_tags, stringify_values};
    use crate::document::{Connection, Flow, Properties, Step, StepKind};

    fn endpoint(connector_id: Option<&str>) -> Step {
        Step {
            kind: Some(StepKind::Endpoint),
            connection: connector_id.map(Connection::new),
            ..Step::default()
        }
    }

    #[test]
    fn test_stringify_values() {
        let mut properties = Properties::new();
        properties.insert("query".to_owned(), json!("select 1"));
        properties.insert("batch_size".to_owned(), json!(50));
        properties.insert("enabled".to_owned(), json!(true));
        properties.insert("headers".to_owned(), json!({"accept": "text/plain"}));
        properties.insert("missing".to_owned(), Value::Null);

        let stringified = stringify_values(properties);
        assert_eq!(stringified.get("query"), Some(&json!("select 1")));
        assert_eq!(stringified.get("batch_size"), Some(&json!(50)));
        assert_eq!(stringified.get("enabled"), Some(&json!("true")));
        assert_eq!(
            stringified.get("headers"),
            Some(&json!(r#"{"accept":"text/plain"}"#))
        );
        assert_eq!(stringified.get("missing"), Some(&json!("null")));

        // Applying again changes nothing, everything is scalar now.
        assert_eq!(stringify_values(stringified.clone()), stringified);
    }

    #[test]
    fn test_build_tags_merges_connector_ids() {
        let flows = vec![
            Flow::new().with_steps(vec![endpoint(Some("sql")), endpoint(Some("http"))]),
            Flow::new().with_steps(vec![endpoint(Some("sql"))]),
        ];
        let tags = vec!["existing".to_owned(), "http".to_owned()];

        let merged = build_tags(&flows, &tags);
        assert_eq!(merged, vec!["existing", "http", "sql"]);
    }

    #[test]
    fn test_build_tags_skips_unusable_steps() {
        let flows = vec![
            Flow::new().with_steps(vec![
                Step::default(),
                endpoint(None),
                Step {
                    kind: Some(StepKind::Endpoint),
                    connection: Some(Connection::default()),
                    ..Step::default()
                },
                endpoint(Some("amq")),
            ]),
            Flow::new(),
        ];

        let merged = build_tags(&flows, &[]);
        assert_eq!(merged, vec!["amq"]);
    }
}
