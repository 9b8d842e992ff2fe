use serde_json::json;
use valora_core::zero_series;

use crate::error::LlmError;
use crate::validation::{
    DEFAULT_CONFIDENCE, DEFAULT_PROJECT_NAME, DEFAULT_RISK_ASSESSMENT, DEFAULT_TIMELINE,
    MAX_SERIES_VALUE, parse_estimate,
};

fn full_reply() -> serde_json::Value {
    let series: Vec<f64> = (1..=10).map(|y| f64::from(y) * 100.0).collect();
    json!({
        "project_name": "Oak Savanna Restoration",
        "project_description": "Restore native grassland with managed grazing.",
        "confidence_score": 0.82,
        "factors_considered": ["Soil", "Rainfall"],
        "recommendations": ["Soil test", "Seed natives"],
        "timeline": "3-4 years",
        "risk_assessment": "Low to moderate",
        "cash_flow_projection": series,
        "revenue_breakdown": {
            "agricultural_sales": series,
            "ecosystem_services": series,
            "subsidies_incentives": series
        },
        "cost_breakdown": {
            "operational_costs": series,
            "infrastructure": series,
            "maintenance": series
        }
    })
}

#[test]
fn test_complete_reply_has_no_defaults() {
    let validated = parse_estimate(&full_reply().to_string()).unwrap();
    assert!(validated.is_complete(), "{:?}", validated.defaulted);
    let content = validated.content;
    assert_eq!(content.project_name, "Oak Savanna Restoration");
    assert!((content.confidence_score - 0.82).abs() < f64::EPSILON);
    assert_eq!(content.recommendations, ["Soil test", "Seed natives"]);
    assert!((content.cost_breakdown.maintenance[9] - 1000.0).abs() < f64::EPSILON);
}

#[test]
fn test_fenced_reply_with_chatter() {
    let raw = format!("Here is the analysis:\n```json\n{}\n```\nLet me know!", full_reply());
    let validated = parse_estimate(&raw).unwrap();
    assert_eq!(validated.content.timeline, "3-4 years");
}

#[test]
fn test_object_embedded_in_prose() {
    let raw = format!("Sure. {} Hope this helps.", full_reply());
    assert!(parse_estimate(&raw).unwrap().is_complete());
}

#[test]
fn test_empty_object_gets_every_default() {
    let validated = parse_estimate("{}").unwrap();
    let content = &validated.content;
    assert_eq!(content.project_name, DEFAULT_PROJECT_NAME);
    assert!((content.confidence_score - DEFAULT_CONFIDENCE).abs() < f64::EPSILON);
    assert_eq!(content.timeline, DEFAULT_TIMELINE);
    assert_eq!(content.risk_assessment, DEFAULT_RISK_ASSESSMENT);
    assert!(content.factors_considered.is_empty());
    assert_eq!(content.cash_flow_projection, zero_series());
    assert_eq!(content.revenue_breakdown.ecosystem_services, zero_series());
    assert_eq!(content.cost_breakdown.infrastructure, zero_series());
    assert_eq!(validated.defaulted.len(), 14);
    assert!(validated.defaulted.contains(&"revenue_breakdown.subsidies_incentives"));
}

#[test]
fn test_confidence_coerced_and_clamped() {
    let cases = [(json!("0.9"), 0.9), (json!(1.7), 1.0), (json!(-0.2), 0.0), (json!(true), 0.5)];
    for (input, expected) in cases {
        let mut reply = full_reply();
        reply["confidence_score"] = input.clone();
        let validated = parse_estimate(&reply.to_string()).unwrap();
        assert!(
            (validated.content.confidence_score - expected).abs() < f64::EPSILON,
            "{input} -> {}",
            validated.content.confidence_score
        );
    }
}

#[test]
fn test_series_padded_truncated_and_cleaned() {
    let mut reply = full_reply();
    reply["cash_flow_projection"] = json!(["$1,500", -200, "n/a", null]);
    reply["revenue_breakdown"]["agricultural_sales"] = json!((0..15).collect::<Vec<i32>>());
    let content = parse_estimate(&reply.to_string()).unwrap().content;

    assert_eq!(content.cash_flow_projection.len(), 10);
    assert!((content.cash_flow_projection[0] - 1500.0).abs() < f64::EPSILON);
    assert!((content.cash_flow_projection[1] + 200.0).abs() < f64::EPSILON);
    assert!(content.cash_flow_projection[2..].iter().all(|v| *v == 0.0));
    assert_eq!(content.revenue_breakdown.agricultural_sales.len(), 10);
    assert!((content.revenue_breakdown.agricultural_sales[9] - 9.0).abs() < f64::EPSILON);
}

#[test]
fn test_huge_series_values_are_clamped() {
    let mut reply = full_reply();
    reply["cash_flow_projection"] = json!([1.7e308, -1.7e308, "1e300", 42]);
    reply["cost_breakdown"]["maintenance"] = json!(vec![1.7e308; 10]);
    let content = parse_estimate(&reply.to_string()).unwrap().content;

    assert_eq!(content.cash_flow_projection[0], MAX_SERIES_VALUE);
    assert_eq!(content.cash_flow_projection[1], -MAX_SERIES_VALUE);
    assert_eq!(content.cash_flow_projection[2], MAX_SERIES_VALUE);
    assert!((content.cash_flow_projection[3] - 42.0).abs() < f64::EPSILON);
    let total: f64 = content.cost_breakdown.maintenance.iter().sum();
    assert!(total.is_finite());
}

#[test]
fn test_list_items_stringified_or_dropped() {
    let mut reply = full_reply();
    reply["factors_considered"] = json!(["Soil", 42, false, {"nested": 1}, null, "  "]);
    let content = parse_estimate(&reply.to_string()).unwrap().content;
    assert_eq!(content.factors_considered, ["Soil", "42", "false"]);
}

#[test]
fn test_wrong_types_fall_back() {
    let mut reply = full_reply();
    reply["project_name"] = json!("   ");
    reply["recommendations"] = json!("Plant trees");
    reply["cost_breakdown"] = json!([1, 2, 3]);
    let validated = parse_estimate(&reply.to_string()).unwrap();

    assert_eq!(validated.content.project_name, DEFAULT_PROJECT_NAME);
    assert!(validated.content.recommendations.is_empty());
    assert_eq!(validated.content.cost_breakdown.operational_costs, zero_series());
    assert!(validated.defaulted.contains(&"project_name"));
    assert!(validated.defaulted.contains(&"recommendations"));
    assert!(validated.defaulted.contains(&"cost_breakdown.maintenance"));
    assert!(!validated.defaulted.contains(&"revenue_breakdown.agricultural_sales"));
}

#[test]
fn test_unknown_keys_ignored() {
    let mut reply = full_reply();
    reply["surprise"] = json!({"anything": [1, 2]});
    assert!(parse_estimate(&reply.to_string()).unwrap().is_complete());
}

#[test]
fn test_unusable_replies_are_malformed() {
    for raw in ["", "I cannot help with that.", "{not json}", "```json\n```"] {
        let err = parse_estimate(raw).unwrap_err();
        assert!(matches!(err, LlmError::MalformedEstimate(_)), "{raw:?}: {err:?}");
    }
}
