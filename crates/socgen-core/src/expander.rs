//! Seed expansion
//!
//! Grows a record sequence to a target size through an injected
//! generation function. The generator is a capability, not a model: any
//! closure with the signature `(seeds, count) -> values` will do.

use crate::record::{retain_objects, EventRecord, RecordSequence};
use serde_json::Value;
use std::fmt;

/// Generation capability: `(seeds, count) -> values`
pub type GenerateFn = dyn Fn(&[EventRecord], usize) -> Vec<Value> + Send + Sync;

/// Seed expander backed by an injected generator
pub struct SeedExpander {
    model: String,
    generate: Box<GenerateFn>,
}

impl SeedExpander {
    /// Create expander from a model label and generator
    #[must_use]
    pub fn new<F>(model: impl Into<String>, generate: F) -> Self
    where
        F: Fn(&[EventRecord], usize) -> Vec<Value> + Send + Sync + 'static,
    {
        Self {
            model: model.into(),
            generate: Box::new(generate),
        }
    }

    /// Expander using [`echo_generator`]
    #[must_use]
    pub fn echo() -> Self {
        Self::new("echo", echo_generator)
    }

    /// Model label
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate `count` records from `seeds`
    ///
    /// Empty when `count` is zero or there are no seeds. Non-object values
    /// returned by the generator are discarded.
    #[must_use]
    pub fn expand(&self, seeds: &[EventRecord], count: usize) -> RecordSequence {
        if count == 0 || seeds.is_empty() {
            return RecordSequence::new();
        }
        let (records, dropped) = retain_objects((self.generate)(seeds, count));
        if dropped > 0 {
            tracing::warn!(
                "Generator '{}' produced {} non-object values; discarded",
                self.model,
                dropped
            );
        }
        tracing::debug!(
            "Expanded {} seeds into {} records via '{}'",
            seeds.len(),
            records.len(),
            self.model
        );
        records
    }
}

impl fmt::Debug for SeedExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedExpander")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Placeholder generator: cycles through seeds in order until `count`
#[must_use]
pub fn echo_generator(seeds: &[EventRecord], count: usize) -> Vec<Value> {
    if seeds.is_empty() {
        return Vec::new();
    }
    seeds
        .iter()
        .cycle()
        .take(count)
        .cloned()
        .map(Value::Object)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeds() -> RecordSequence {
        vec![
            json!({"event_id": "a"}).as_object().cloned().unwrap(),
            json!({"event_id": "b"}).as_object().cloned().unwrap(),
        ]
    }

    #[test]
    fn echo_cycles_in_order() {
        let out = SeedExpander::echo().expand(&seeds(), 5);
        let ids: Vec<_> = out.iter().map(|r| r["event_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn zero_count_or_no_seeds_is_empty() {
        let expander = SeedExpander::echo();
        assert!(expander.expand(&seeds(), 0).is_empty());
        assert!(expander.expand(&[], 10).is_empty());
    }

    #[test]
    fn non_objects_are_discarded() {
        let expander = SeedExpander::new("noisy", |_, n| {
            (0..n)
                .map(|i| if i % 2 == 0 { json!({"i": i}) } else { json!(i) })
                .collect()
        });
        let out = expander.expand(&seeds(), 4);
        assert_eq!(out.len(), 2);
        assert_eq!(expander.model(), "noisy");
    }

    #[test]
    fn generator_outputs_do_not_alias_seeds() {
        let seeds = seeds();
        let mut out = SeedExpander::echo().expand(&seeds, 1);
        out[0].insert("event_id".to_string(), json!("changed"));
        assert_eq!(seeds[0]["event_id"], "a");
    }
}
