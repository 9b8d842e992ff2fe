//! JSON bodies returned by the estimate API.

use serde::Serialize;
use valora_core::{CostBreakdown, Estimate, EstimateId, InquiryId, RevenueBreakdown};

#[derive(Debug, Serialize)]
pub struct GenerateEstimateResponse<'a> {
    pub success: bool,
    pub estimate: EstimatePayload<'a>,
}

/// User-facing estimate fields. Internal analysis data stays server side.
#[derive(Debug, Serialize)]
pub struct EstimatePayload<'a> {
    pub id: EstimateId,
    pub inquiry_id: InquiryId,
    pub project_name: &'a str,
    pub project_description: &'a str,
    pub confidence_score: f64,
    pub timeline: &'a str,
    pub cash_flow_projection: &'a [f64],
    pub revenue_breakdown: &'a RevenueBreakdown,
    pub cost_breakdown: &'a CostBreakdown,
}

impl<'a> From<&'a Estimate> for EstimatePayload<'a> {
    fn from(estimate: &'a Estimate) -> Self {
        let c = &estimate.content;
        Self {
            id: estimate.id,
            inquiry_id: estimate.inquiry_id,
            project_name: &c.project_name,
            project_description: &c.project_description,
            confidence_score: c.confidence_score,
            timeline: &c.timeline,
            cash_flow_projection: &c.cash_flow_projection,
            revenue_breakdown: &c.revenue_breakdown,
            cost_breakdown: &c.cost_breakdown,
        }
    }
}
