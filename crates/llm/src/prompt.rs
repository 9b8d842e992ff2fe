//! Property analysis prompt.

use valora_core::{InquiryInput, PROJECTION_YEARS};

use crate::ai_types::{ChatRequest, Message, ResponseFormat};
use crate::client::LlmClient;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

pub const SYSTEM_PROMPT: &str = "You are an expert regenerative agriculture property analyst. \
Give a detailed, realistic analysis in the JSON format the user requests. \
Your response must be valid JSON only, with no other text.";

const RESPONSE_SKELETON: &str = r#"{
    "project_name": "Descriptive, memorable name for the project on this land",
    "project_description": "About 100 words describing the regenerative agriculture project",
    "confidence_score": 0.85,
    "factors_considered": ["Location", "Lot size", "Market trends", "Soil quality", "Climate"],
    "recommendations": ["Start with soil testing", "Establish agroforestry", "Introduce rotational grazing"],
    "timeline": "X-Y years to full implementation",
    "risk_assessment": "Overall risk level and the main risks to plan for",
    "cash_flow_projection": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10],
    "revenue_breakdown": {
        "agricultural_sales": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10],
        "ecosystem_services": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10],
        "subsidies_incentives": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10]
    },
    "cost_breakdown": {
        "operational_costs": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10],
        "infrastructure": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10],
        "maintenance": [y1, y2, y3, y4, y5, y6, y7, y8, y9, y10]
    }
}"#;

/// Render the user prompt for one inquiry.
#[must_use]
pub fn build_analysis_prompt(inquiry: &InquiryInput) -> String {
    let region = &inquiry.region;
    format!(
        "Analyze this agricultural property. Respond with JSON only.

PROPERTY DETAILS:
- Address: {address}
- Lot Size: {lot_size} {unit} ({acres:.2} acres)
- Region: {region}
- Current Property: {current}
- Property Goals: {goals}
- Investment Capacity: {capacity}
- Preferences/Concerns: {concerns}

Return exactly this JSON structure, filled with realistic values for this property:
{RESPONSE_SKELETON}

FINANCIAL PROJECTION REQUIREMENTS:
- Every series has exactly {PROJECTION_YEARS} yearly values
- All amounts are in USD
- Reflect market conditions in {region}
- Include regenerative benefits such as ecosystem services and carbon credits

Prioritize soil health, long-term sustainability and economic viability in {region}.",
        address = inquiry.address,
        lot_size = inquiry.lot_size,
        unit = inquiry.lot_size_unit,
        acres = inquiry.lot_size_acres(),
        current = inquiry.current_property,
        goals = inquiry.property_goals,
        capacity = inquiry.investment_capacity,
        concerns = inquiry.preferences_concerns,
    )
}

impl LlmClient {
    /// Chat request asking for an estimate of `inquiry`, using this client's model.
    #[must_use]
    pub fn build_estimate_request(&self, inquiry: &InquiryInput) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message { role: "system".to_owned(), content: SYSTEM_PROMPT.to_owned() },
                Message { role: "user".to_owned(), content: build_analysis_prompt(inquiry) },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat { format_type: "json_object".to_owned() },
        }
    }
}
