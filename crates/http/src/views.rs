//! Template contexts for the HTML pages.

use serde::Serialize;
use valora_core::{
    Estimate, Inquiry, InquiryId, LotSizeUnit, QUESTIONNAIRE_STEPS, QuestionnaireDraft,
    QuestionnaireStep, YearlyFigures,
};

use crate::forms::LandingForm;

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub error: Option<String>,
    pub lot_size: String,
    pub region: String,
    pub acres_selected: bool,
    pub hectares_selected: bool,
}

impl LandingView {
    pub fn blank() -> Self {
        Self {
            error: None,
            lot_size: String::new(),
            region: String::new(),
            acres_selected: true,
            hectares_selected: false,
        }
    }

    /// Re-render the submitted values next to an error.
    pub fn rejected(form: &LandingForm, error: String) -> Self {
        let hectares = matches!(form.lot_size_unit.parse(), Ok(LotSizeUnit::Hectares));
        Self {
            error: Some(error),
            lot_size: form.lot_size.trim().to_owned(),
            region: form.region.trim().to_owned(),
            acres_selected: !hectares,
            hectares_selected: hectares,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireView {
    pub step: u8,
    pub total_steps: u8,
    pub progress: u32,
    pub last_step: bool,
    pub question: &'static str,
    pub hint: &'static str,
    pub error: Option<String>,
    pub answer: String,
    pub lot_size: String,
    pub lot_size_unit: &'static str,
    pub region: String,
    /// Answers from the other steps, carried forward.
    pub carried: Vec<HiddenField>,
}

impl QuestionnaireView {
    pub fn new(draft: &QuestionnaireDraft, step: QuestionnaireStep, error: Option<String>) -> Self {
        let carried = QuestionnaireStep::ALL
            .into_iter()
            .filter(|other| *other != step)
            .filter_map(|other| {
                draft
                    .answers
                    .get(other)
                    .map(|value| HiddenField { name: other.field(), value: value.to_owned() })
            })
            .collect();
        Self {
            step: step.number(),
            total_steps: QUESTIONNAIRE_STEPS,
            progress: u32::from(step.number()) * 100 / u32::from(QUESTIONNAIRE_STEPS),
            last_step: step.next().is_none(),
            question: step.question(),
            hint: step.hint(),
            error,
            answer: draft.answers.get(step).unwrap_or_default().to_owned(),
            lot_size: draft.details.lot_size.to_string(),
            lot_size_unit: draft.details.lot_size_unit.as_str(),
            region: draft.details.region.clone(),
            carried,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadingView<'a> {
    pub inquiry_id: InquiryId,
    pub region: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RevenueRow {
    pub year: usize,
    pub agricultural_sales: f64,
    pub ecosystem_services: f64,
    pub subsidies_incentives: f64,
}

#[derive(Debug, Serialize)]
pub struct CostRow {
    pub year: usize,
    pub operational_costs: f64,
    pub infrastructure: f64,
    pub maintenance: f64,
}

/// User-facing part of an estimate, arranged for the results table.
#[derive(Debug, Serialize)]
pub struct EstimateView<'a> {
    pub project_name: &'a str,
    pub project_description: &'a str,
    pub confidence_score: f64,
    pub timeline: &'a str,
    pub total_net_cash_flow: f64,
    pub net_negative: bool,
    pub years: Vec<YearlyFigures>,
    pub revenue_rows: Vec<RevenueRow>,
    pub cost_rows: Vec<CostRow>,
}

impl<'a> EstimateView<'a> {
    pub fn new(estimate: &'a Estimate) -> Self {
        let c = &estimate.content;
        let at = |series: &[f64], i: usize| series.get(i).copied().unwrap_or(0.0);
        let years = estimate.yearly_figures();
        let revenue_rows = (0..years.len())
            .map(|i| RevenueRow {
                year: i + 1,
                agricultural_sales: at(&c.revenue_breakdown.agricultural_sales, i),
                ecosystem_services: at(&c.revenue_breakdown.ecosystem_services, i),
                subsidies_incentives: at(&c.revenue_breakdown.subsidies_incentives, i),
            })
            .collect();
        let cost_rows = (0..years.len())
            .map(|i| CostRow {
                year: i + 1,
                operational_costs: at(&c.cost_breakdown.operational_costs, i),
                infrastructure: at(&c.cost_breakdown.infrastructure, i),
                maintenance: at(&c.cost_breakdown.maintenance, i),
            })
            .collect();
        let total_net_cash_flow: f64 = years.iter().map(|y| y.net_cash_flow).sum();
        Self {
            project_name: &c.project_name,
            project_description: &c.project_description,
            confidence_score: c.confidence_score,
            timeline: &c.timeline,
            total_net_cash_flow,
            net_negative: total_net_cash_flow < 0.0,
            years,
            revenue_rows,
            cost_rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsView<'a> {
    pub inquiry: &'a Inquiry,
    pub estimate: Option<EstimateView<'a>>,
}
