//! Identifier generation for flows and steps.

use uuid::Uuid;

/// Source of unique keys for flow and step identifiers.
///
/// Keys must not collide within the lifetime of a single document;
/// global uniqueness across processes is not required.
pub trait KeySource {
    /// Returns the next unique key.
    fn next_key(&mut self) -> String;
}

/// Key source backed by UUID v7 generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeySource;

impl KeySource for UuidKeySource {
    fn next_key(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic key source producing `prefix-1`, `prefix-2` and so on.
///
/// Useful for tests and reproducible document construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialKeySource {
    prefix: String,
    counter: u64,
}

impl SequentialKeySource {
    /// Creates a sequential source with the given key prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl KeySource for SequentialKeySource {
    fn next_key(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}
