//! Derives template values and defaults from an example slot.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::openapi::{ExampleSlot, OpenApiExample};

/// Example data attached to a parameter, header or media type.
///
/// The single `example` always takes precedence over named `examples` when a
/// default is needed; both contribute to [`ExampleValues::values`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleValues<'a> {
    example: Option<&'a JsonValue>,
    examples: Option<&'a IndexMap<String, OpenApiExample>>,
}

impl<'a> ExampleValues<'a> {
    pub fn new(
        example: Option<&'a JsonValue>,
        examples: Option<&'a IndexMap<String, OpenApiExample>>,
    ) -> Self {
        Self { example, examples }
    }

    pub fn from_slot<S: ExampleSlot + ?Sized>(slot: &'a S) -> Self {
        Self::new(slot.example(), slot.examples())
    }

    /// Serialized single example first, then every named example in map order.
    pub fn values(&self) -> Vec<String> {
        self.example
            .into_iter()
            .chain(self.named_values())
            .map(serialize)
            .collect()
    }

    /// Serialized single example, else the first named example, else `None`.
    pub fn default_value(&self) -> Option<String> {
        self.example
            .or_else(|| self.named_values().next())
            .map(serialize)
    }

    fn named_values(&self) -> impl Iterator<Item = &'a JsonValue> {
        self.examples
            .into_iter()
            .flat_map(|examples| examples.values().map(|example| &example.value))
    }
}

/// Compact JSON text of an example value
fn serialize(value: &JsonValue) -> String {
    value.to_string()
}
