use valora_core::{InquiryInput, LotSizeUnit};

use crate::client::{LlmClient, truncate};
use crate::prompt::{MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, build_analysis_prompt};

fn sample_inquiry() -> InquiryInput {
    InquiryInput {
        address: "Property in Sonoma County".to_owned(),
        lot_size: 10.0,
        lot_size_unit: LotSizeUnit::Hectares,
        current_property: "Abandoned vineyard".to_owned(),
        property_goals: "Mixed orchard with sheep".to_owned(),
        investment_capacity: "$300,000".to_owned(),
        preferences_concerns: "Wildfire risk".to_owned(),
        region: "Sonoma County".to_owned(),
    }
}

#[test]
fn test_truncate_within_limit() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exceeds_limit() {
    assert_eq!(truncate("hello world", 5), "hello");
}

#[test]
fn test_truncate_unicode_boundary() {
    let s = "éééé";
    let result = truncate(s, 3);
    assert_eq!(result, "é");
}

#[test]
fn test_prompt_contains_inquiry_details() {
    let prompt = build_analysis_prompt(&sample_inquiry());
    assert!(prompt.contains("- Address: Property in Sonoma County"));
    assert!(prompt.contains("- Lot Size: 10 hectares (24.71 acres)"));
    assert!(prompt.contains("- Current Property: Abandoned vineyard"));
    assert!(prompt.contains("- Preferences/Concerns: Wildfire risk"));
    assert!(prompt.contains("market conditions in Sonoma County"));
}

#[test]
fn test_prompt_contains_json_skeleton() {
    let prompt = build_analysis_prompt(&sample_inquiry());
    for key in [
        "\"project_name\"",
        "\"cash_flow_projection\"",
        "\"agricultural_sales\"",
        "\"subsidies_incentives\"",
        "\"operational_costs\"",
        "\"maintenance\"",
    ] {
        assert!(prompt.contains(key), "missing {key}");
    }
    assert!(prompt.contains("exactly 10 yearly values"));
}

#[test]
fn test_estimate_request_parameters() {
    let client = LlmClient::new("key".to_owned(), "http://localhost".to_owned())
        .unwrap()
        .with_model("test-model".to_owned());
    let request = client.build_estimate_request(&sample_inquiry());

    assert_eq!(request.model, "test-model");
    assert!((request.temperature - TEMPERATURE).abs() < f64::EPSILON);
    assert_eq!(request.max_tokens, MAX_TOKENS);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(request.messages[1].role, "user");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["response_format"]["type"], "json_object");
    assert_eq!(json["max_tokens"], 2000);
}

#[test]
fn test_debug_masks_api_key() {
    let client = LlmClient::new("sk-secret".to_owned(), "http://localhost/".to_owned()).unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("sk-secret"));
    assert_eq!(client.base_url(), "http://localhost");
}
