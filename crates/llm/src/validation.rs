//! Response validator: turns free-form model output into an `EstimateContent`.
//!
//! Only a reply with no locatable JSON object is rejected. Every missing or
//! mistyped field falls back to a documented default and is reported in
//! [`ValidatedEstimate::defaulted`].

use serde_json::{Map, Value};
use valora_core::{
    CostBreakdown, EstimateContent, PROJECTION_YEARS, RevenueBreakdown, extract_json_object,
    zero_series,
};

use crate::error::LlmError;

pub const DEFAULT_PROJECT_NAME: &str = "Regenerative Agriculture Project";
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "No project description was provided.";
pub const DEFAULT_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_TIMELINE: &str = "Not specified";
pub const DEFAULT_RISK_ASSESSMENT: &str = "Risk assessment not available.";
/// Largest magnitude accepted for one yearly amount; keeps year totals finite.
pub const MAX_SERIES_VALUE: f64 = 1e12;

/// A coerced estimate plus the fields that had to be defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEstimate {
    pub content: EstimateContent,
    pub defaulted: Vec<&'static str>,
}

impl ValidatedEstimate {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.defaulted.is_empty()
    }
}

/// Parse and coerce a model reply.
///
/// # Errors
/// Returns `MalformedEstimate` when no JSON object can be located, the text
/// is not valid JSON, or the top-level value is not an object.
pub fn parse_estimate(raw: &str) -> Result<ValidatedEstimate, LlmError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| LlmError::MalformedEstimate("no JSON object found in response".into()))?;
    let value: Value = serde_json::from_str(json)
        .map_err(|e| LlmError::MalformedEstimate(format!("invalid JSON: {e}")))?;
    let Value::Object(obj) = value else {
        return Err(LlmError::MalformedEstimate("top-level JSON value is not an object".into()));
    };

    let mut coercer = Coercer { obj: &obj, defaulted: Vec::new() };
    let content = EstimateContent {
        project_name: coercer.text("project_name", DEFAULT_PROJECT_NAME),
        project_description: coercer.text("project_description", DEFAULT_PROJECT_DESCRIPTION),
        confidence_score: coercer.confidence(),
        factors_considered: coercer.list("factors_considered"),
        recommendations: coercer.list("recommendations"),
        timeline: coercer.text("timeline", DEFAULT_TIMELINE),
        risk_assessment: coercer.text("risk_assessment", DEFAULT_RISK_ASSESSMENT),
        cash_flow_projection: coercer.top_level_series("cash_flow_projection"),
        revenue_breakdown: coercer.revenue(),
        cost_breakdown: coercer.costs(),
    };

    let defaulted = coercer.defaulted;
    if !defaulted.is_empty() {
        tracing::warn!(fields = ?defaulted, "AI response incomplete, defaults applied");
    }
    Ok(ValidatedEstimate { content, defaulted })
}

struct Coercer<'a> {
    obj: &'a Map<String, Value>,
    defaulted: Vec<&'static str>,
}

impl Coercer<'_> {
    fn text(&mut self, key: &'static str, default: &str) -> String {
        match self.obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_owned(),
            _ => {
                self.defaulted.push(key);
                default.to_owned()
            },
        }
    }

    fn confidence(&mut self) -> f64 {
        match self.obj.get("confidence_score").and_then(number_from) {
            Some(score) => score.clamp(0.0, 1.0),
            None => {
                self.defaulted.push("confidence_score");
                DEFAULT_CONFIDENCE
            },
        }
    }

    fn list(&mut self, key: &'static str) -> Vec<String> {
        let Some(Value::Array(items)) = self.obj.get(key) else {
            self.defaulted.push(key);
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect()
    }

    fn top_level_series(&mut self, key: &'static str) -> Vec<f64> {
        let obj = self.obj;
        self.series_in(obj, key, key)
    }

    fn series_in(
        &mut self,
        container: &Map<String, Value>,
        key: &str,
        label: &'static str,
    ) -> Vec<f64> {
        match container.get(key) {
            Some(Value::Array(items)) => normalize_series(items),
            _ => {
                self.defaulted.push(label);
                zero_series()
            },
        }
    }

    fn nested(&self, key: &str) -> Map<String, Value> {
        match self.obj.get(key) {
            Some(Value::Object(inner)) => inner.clone(),
            _ => Map::new(),
        }
    }

    fn revenue(&mut self) -> RevenueBreakdown {
        let inner = self.nested("revenue_breakdown");
        RevenueBreakdown {
            agricultural_sales: self.series_in(
                &inner,
                "agricultural_sales",
                "revenue_breakdown.agricultural_sales",
            ),
            ecosystem_services: self.series_in(
                &inner,
                "ecosystem_services",
                "revenue_breakdown.ecosystem_services",
            ),
            subsidies_incentives: self.series_in(
                &inner,
                "subsidies_incentives",
                "revenue_breakdown.subsidies_incentives",
            ),
        }
    }

    fn costs(&mut self) -> CostBreakdown {
        let inner = self.nested("cost_breakdown");
        CostBreakdown {
            operational_costs: self.series_in(
                &inner,
                "operational_costs",
                "cost_breakdown.operational_costs",
            ),
            infrastructure: self.series_in(
                &inner,
                "infrastructure",
                "cost_breakdown.infrastructure",
            ),
            maintenance: self.series_in(&inner, "maintenance", "cost_breakdown.maintenance"),
        }
    }
}

/// Exactly `PROJECTION_YEARS` values clamped to `MAX_SERIES_VALUE`;
/// unreadable entries count as zero.
fn normalize_series(items: &[Value]) -> Vec<f64> {
    let mut series: Vec<f64> = items
        .iter()
        .take(PROJECTION_YEARS)
        .map(|v| number_from(v).map_or(0.0, |n| n.clamp(-MAX_SERIES_VALUE, MAX_SERIES_VALUE)))
        .collect();
    series.resize(PROJECTION_YEARS, 0.0);
    series
}

/// A JSON number, or a string such as `"$12,500.50"`.
fn number_from(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String =
                s.chars().filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace()).collect();
            cleaned.parse::<f64>().ok()
        },
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
