use secureflow::ai::response::{MAX_RAW_OUTPUT_CHARS, NON_JSON_SUMMARY};
use secureflow::ai::{ModelOutput, validate_model_output};
use secureflow::core::models::Severity;
use serde_json::json;

fn compliant() -> serde_json::Value {
    json!({
        "overall_severity": "LOW",
        "findings": [{
            "id": "K8S-1",
            "title": "Privileged container",
            "severity": "LOW",
            "evidence": "privileged: true",
            "impact": "Container can access the host.",
            "recommendation": "Drop privileged mode."
        }],
        "summary": "One low severity finding."
    })
}

#[test]
fn test_compliant_reply_passes_in_both_modes() {
    let text = compliant().to_string();
    for strict in [false, true] {
        assert_eq!(
            validate_model_output(&text, strict),
            ModelOutput::Parsed(compliant())
        );
    }
}

#[test]
fn test_non_json_reply_yields_fallback() {
    let text = "I found some issues: the bucket is public.";
    match validate_model_output(text, false) {
        ModelOutput::Fallback(result) => {
            assert_eq!(result.overall_severity, Severity::Medium);
            assert!(result.findings.is_empty());
            assert_eq!(result.summary, NON_JSON_SUMMARY);
            assert_eq!(result.raw_output.as_deref(), Some(text));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn test_raw_output_is_capped() {
    let text = "é".repeat(MAX_RAW_OUTPUT_CHARS + 10);
    let value = validate_model_output(&text, false).into_value();
    let raw = value["raw_output"].as_str().unwrap();
    assert_eq!(raw.chars().count(), MAX_RAW_OUTPUT_CHARS);
}

#[test]
fn test_strict_mode_requires_finding_fields() {
    let mut reply = compliant();
    reply["findings"][0]
        .as_object_mut()
        .unwrap()
        .remove("recommendation");

    assert!(!validate_model_output(&reply.to_string(), false).is_fallback());

    let strict = validate_model_output(&reply.to_string(), true);
    assert!(strict.is_fallback());
    assert!(strict.summary().contains("expected schema"));
}

#[test]
fn test_strict_mode_requires_findings_array() {
    let reply = json!({ "overall_severity": "HIGH", "summary": "no findings key" });
    assert!(validate_model_output(&reply.to_string(), true).is_fallback());
}

#[test]
fn test_history_fields_read_from_parsed_reply() {
    let out = validate_model_output(&compliant().to_string(), false);
    assert_eq!(out.overall_severity(), "LOW");
    assert_eq!(out.summary(), "One low severity finding.");
}
