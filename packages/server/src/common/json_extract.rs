//! Recover typed JSON from free-form model output.
//!
//! Models are asked for JSON but routinely wrap it in prose or code fences.
//! [`parse_model_json`] first tries the whole (fence-stripped) response, then
//! scans for balanced `{...}` / `[...]` spans and parses the first that fits.

use serde::de::DeserializeOwned;

use super::errors::{PipelineError, PipelineResult};

/// Deepest nesting the scanner follows before abandoning a candidate.
pub const MAX_DEPTH: usize = 64;

/// Candidate start positions tried before giving up.
const MAX_CANDIDATES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn open(self) -> char {
        match self {
            JsonShape::Object => '{',
            JsonShape::Array => '[',
        }
    }
}

/// Parse `response` into `T`, recovering a JSON span of `shape` if needed.
pub fn parse_model_json<T: DeserializeOwned>(response: &str, shape: JsonShape) -> PipelineResult<T> {
    let cleaned = gemini_client::strip_code_blocks(response).trim();
    if let Ok(value) = serde_json::from_str::<T>(cleaned) {
        return Ok(value);
    }

    let mut last_error = None;
    let mut found_span = false;
    for start in cleaned
        .char_indices()
        .filter(|(_, c)| *c == shape.open())
        .map(|(i, _)| i)
        .take(MAX_CANDIDATES)
    {
        let Some(span) = balanced_span(&cleaned[start..]) else {
            continue;
        };
        found_span = true;
        match serde_json::from_str::<T>(span) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }

    match (found_span, last_error) {
        (true, Some(e)) => Err(PipelineError::DataExtraction(format!(
            "model JSON did not match the expected shape: {}",
            e
        ))),
        _ => Err(PipelineError::DataExtraction(format!(
            "no JSON {} found in model response",
            match shape {
                JsonShape::Object => "object",
                JsonShape::Array => "array",
            }
        ))),
    }
}

/// Return the prefix of `s` (which starts with `{` or `[`) that closes the
/// opening delimiter, honoring string literals and escapes.
pub fn balanced_span(s: &str) -> Option<&str> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => {
                if stack.len() >= MAX_DEPTH {
                    return None;
                }
                stack.push(if c == '{' { '}' } else { ']' });
            }
            '}' | ']' => {
                if stack.pop() != Some(c) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(&s[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_object_inside_noise() {
        let v: Value = parse_model_json(r#"noise {"a":1} trailing"#, JsonShape::Object).unwrap();
        assert_eq!(v, json!({"a": 1}));
    }

    #[test]
    fn test_no_braces_is_extraction_error() {
        let err = parse_model_json::<Value>("no json here", JsonShape::Object).unwrap_err();
        assert!(matches!(err, PipelineError::DataExtraction(_)));
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let v: Value =
            parse_model_json("```json\n[{\"x\": 2}]\n```", JsonShape::Array).unwrap();
        assert_eq!(v, json!([{"x": 2}]));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let raw = r#"Here: {"text": "a } tricky { \" value", "n": 3} done"#;
        let v: Value = parse_model_json(raw, JsonShape::Object).unwrap();
        assert_eq!(v["n"], 3);
    }

    #[test]
    fn test_unbalanced_candidate_is_skipped() {
        let raw = r#"{ broken ... then {"ok": true}"#;
        let v: Value = parse_model_json(raw, JsonShape::Object).unwrap();
        assert_eq!(v, json!({"ok": true}));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert!(balanced_span(&deep).is_none());

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert_eq!(balanced_span(&ok), Some(ok.as_str()));
    }

    #[test]
    fn test_wrong_shape_reports_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            required: String,
        }
        let err = parse_model_json::<Needs>(r#"x {"other": 1} y"#, JsonShape::Object).unwrap_err();
        assert!(err.to_string().contains("expected shape"));
    }
}
