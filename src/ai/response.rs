//! Validation of model replies.
//!
//! Model output is untrusted input. A reply that is not a JSON object is
//! never an error: it degrades to a fallback result that carries the raw
//! text for inspection.

use serde_json::Value;

use crate::core::models::{AnalysisResult, Severity};
use crate::utils::text::truncate_chars;

/// Max characters of a non-compliant reply kept in `raw_output`.
pub const MAX_RAW_OUTPUT_CHARS: usize = 4_000;

pub const NON_JSON_SUMMARY: &str =
    "Model returned non-JSON output; please adjust prompt/model settings.";

#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// The reply parsed as a JSON object and is passed through unchanged.
    Parsed(Value),
    /// The reply was unusable; a synthesized result replaces it.
    Fallback(AnalysisResult),
}

impl ModelOutput {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, ModelOutput::Fallback(_))
    }

    /// Overall severity as recorded in history, `MEDIUM` when absent.
    #[must_use]
    pub fn overall_severity(&self) -> String {
        match self {
            ModelOutput::Parsed(value) => match value.get("overall_severity") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => Severity::Medium.as_str().to_string(),
                Some(other) => other.to_string(),
            },
            ModelOutput::Fallback(result) => result.overall_severity.as_str().to_string(),
        }
    }

    /// Summary as recorded in history, empty when absent.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            ModelOutput::Parsed(value) => match value.get("summary") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            },
            ModelOutput::Fallback(result) => result.summary.clone(),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            ModelOutput::Parsed(value) => value,
            ModelOutput::Fallback(result) => fallback_value(&result),
        }
    }
}

fn fallback_value(result: &AnalysisResult) -> Value {
    serde_json::json!({
        "overall_severity": result.overall_severity,
        "findings": result.findings,
        "summary": result.summary,
        "raw_output": result.raw_output,
    })
}

fn fallback(text: &str, summary: String) -> ModelOutput {
    ModelOutput::Fallback(AnalysisResult {
        overall_severity: Severity::Medium,
        findings: Vec::new(),
        summary,
        raw_output: Some(truncate_chars(text, MAX_RAW_OUTPUT_CHARS).to_string()),
    })
}

/// Turns the model's (already trimmed) text into a usable result.
///
/// With `strict` unset any JSON object passes through untouched. With
/// `strict` set the object must also deserialize into [`AnalysisResult`];
/// a schema violation takes the fallback path.
#[must_use]
pub fn validate_model_output(text: &str, strict: bool) -> ModelOutput {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => value,
        _ => return fallback(text, NON_JSON_SUMMARY.to_string()),
    };

    if strict && let Err(e) = serde_json::from_value::<AnalysisResult>(value.clone()) {
        return fallback(
            text,
            format!("Model output did not match the expected schema: {e}"),
        );
    }

    ModelOutput::Parsed(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_passes_through_verbatim() {
        let text = r#"{"overall_severity":"HIGH","findings":[],"summary":"bad","extra":1}"#;
        let out = validate_model_output(text, false);
        assert_eq!(
            out,
            ModelOutput::Parsed(json!({
                "overall_severity": "HIGH",
                "findings": [],
                "summary": "bad",
                "extra": 1
            }))
        );
    }

    #[test]
    fn missing_fields_default_for_history() {
        let out = validate_model_output("{}", false);
        assert!(!out.is_fallback());
        assert_eq!(out.overall_severity(), "MEDIUM");
        assert_eq!(out.summary(), "");
    }

    #[test]
    fn non_object_json_falls_back() {
        for text in ["[1,2,3]", "\"just a string\"", "42", "null"] {
            let out = validate_model_output(text, false);
            assert!(out.is_fallback(), "{text} should fall back");
        }
    }

    #[test]
    fn fallback_value_shape() {
        let value = validate_model_output("```json\n{}\n```", false).into_value();
        assert_eq!(value["overall_severity"], "MEDIUM");
        assert_eq!(value["findings"], json!([]));
        assert_eq!(value["summary"], NON_JSON_SUMMARY);
        assert_eq!(value["raw_output"], "```json\n{}\n```");
    }
}
