use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PROJECTION_YEARS;
use crate::inquiry::InquiryId;

pub type EstimateId = i64;

/// Ten-year revenue projection split by income category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueBreakdown {
    pub agricultural_sales: Vec<f64>,
    pub ecosystem_services: Vec<f64>,
    pub subsidies_incentives: Vec<f64>,
}

impl RevenueBreakdown {
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            agricultural_sales: zero_series(),
            ecosystem_services: zero_series(),
            subsidies_incentives: zero_series(),
        }
    }

    #[must_use]
    pub fn total_for_year(&self, year: usize) -> f64 {
        value_at(&self.agricultural_sales, year)
            + value_at(&self.ecosystem_services, year)
            + value_at(&self.subsidies_incentives, year)
    }
}

/// Ten-year cost projection split by expense category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub operational_costs: Vec<f64>,
    pub infrastructure: Vec<f64>,
    pub maintenance: Vec<f64>,
}

impl CostBreakdown {
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            operational_costs: zero_series(),
            infrastructure: zero_series(),
            maintenance: zero_series(),
        }
    }

    #[must_use]
    pub fn total_for_year(&self, year: usize) -> f64 {
        value_at(&self.operational_costs, year)
            + value_at(&self.infrastructure, year)
            + value_at(&self.maintenance, year)
    }
}

/// A series of `PROJECTION_YEARS` zeros.
#[must_use]
pub fn zero_series() -> Vec<f64> {
    vec![0.0; PROJECTION_YEARS]
}

fn value_at(series: &[f64], year: usize) -> f64 {
    series.get(year).copied().unwrap_or(0.0)
}

/// The validated valuation payload produced from an AI response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateContent {
    pub project_name: String,
    pub project_description: String,
    pub confidence_score: f64,
    pub factors_considered: Vec<String>,
    pub recommendations: Vec<String>,
    pub timeline: String,
    pub risk_assessment: String,
    pub cash_flow_projection: Vec<f64>,
    pub revenue_breakdown: RevenueBreakdown,
    pub cost_breakdown: CostBreakdown,
}

/// Everything needed to persist a new estimate.
#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub inquiry_id: InquiryId,
    pub content: EstimateContent,
    pub ai_response_raw: serde_json::Value,
    pub processing_time: f64,
}

/// A persisted estimate, owned one-to-one by an inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Estimate {
    pub id: EstimateId,
    pub inquiry_id: InquiryId,
    #[serde(flatten)]
    pub content: EstimateContent,
    pub ai_response_raw: serde_json::Value,
    pub processing_time: f64,
    pub created_at: DateTime<Utc>,
}

/// Per-year totals shown alongside the projection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct YearlyFigures {
    pub year: usize,
    pub revenue: f64,
    pub costs: f64,
    pub net_cash_flow: f64,
}

/// Condensed estimate view: headline fields plus the projections.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateSummary {
    pub project_name: String,
    pub project_description: String,
    pub confidence_score: f64,
    pub key_recommendations: Vec<String>,
    pub timeline: String,
    pub processing_time: f64,
    pub financial_projections: FinancialProjections,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialProjections {
    pub cash_flow_projection: Vec<f64>,
    pub revenue_breakdown: RevenueBreakdown,
    pub cost_breakdown: CostBreakdown,
}

impl Estimate {
    #[must_use]
    pub fn from_new(id: EstimateId, new: NewEstimate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            inquiry_id: new.inquiry_id,
            content: new.content,
            ai_response_raw: new.ai_response_raw,
            processing_time: new.processing_time,
            created_at,
        }
    }

    /// Revenue, cost and net cash flow for each projected year (1-based).
    #[must_use]
    pub fn yearly_figures(&self) -> Vec<YearlyFigures> {
        let content = &self.content;
        (0..PROJECTION_YEARS)
            .map(|i| YearlyFigures {
                year: i + 1,
                revenue: content.revenue_breakdown.total_for_year(i),
                costs: content.cost_breakdown.total_for_year(i),
                net_cash_flow: value_at(&content.cash_flow_projection, i),
            })
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> EstimateSummary {
        let content = &self.content;
        EstimateSummary {
            project_name: content.project_name.clone(),
            project_description: content.project_description.clone(),
            confidence_score: content.confidence_score,
            key_recommendations: content.recommendations.iter().take(3).cloned().collect(),
            timeline: content.timeline.clone(),
            processing_time: self.processing_time,
            financial_projections: FinancialProjections {
                cash_flow_projection: content.cash_flow_projection.clone(),
                revenue_breakdown: content.revenue_breakdown.clone(),
                cost_breakdown: content.cost_breakdown.clone(),
            },
        }
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Estimate for inquiry {} - {}", self.inquiry_id, self.content.project_name)
    }
}
