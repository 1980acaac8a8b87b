//! Prompt-embeddable JSON schemas generated from Rust types.
//!
//! Gemini's JSON mode guarantees syntactically valid JSON but not a shape, so
//! the expected shape is generated with `schemars` and written into the
//! prompt. The result is deserialized back into the same type.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Types that can be requested from the model as JSON.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// A self-contained schema: `$ref`s inlined, `definitions` and `$schema` removed.
    fn prompt_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Pretty-printed schema for prompt text.
    fn prompt_schema_pretty() -> String {
        serde_json::to_string_pretty(&Self::prompt_schema()).unwrap_or_default()
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all `#/definitions/...` references.
fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs, 0);
    }
}

/// Recursion guard for self-referential types.
const MAX_INLINE_DEPTH: usize = 16;

fn inline_refs_recursive(
    value: &mut serde_json::Value,
    definitions: &serde_json::Value,
    depth: usize,
) {
    if depth > MAX_INLINE_DEPTH {
        return;
    }
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions, depth + 1);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions, depth);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions, depth);
            }
        }
        _ => {}
    }
}
