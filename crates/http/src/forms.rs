//! Form payloads posted by the questionnaire pages.
//!
//! Every field is read as text so that a malformed submission renders an
//! error page instead of an extractor rejection.

use serde::Deserialize;
use valora_core::{
    LandingDetails, QuestionnaireAnswers, QuestionnaireDraft, QuestionnaireStep, ValuationError,
};

#[derive(Debug, Default, Deserialize)]
pub struct LandingForm {
    #[serde(default)]
    pub lot_size: String,
    #[serde(default)]
    pub lot_size_unit: String,
    #[serde(default)]
    pub region: String,
}

impl LandingForm {
    pub fn parse(&self) -> Result<LandingDetails, ValuationError> {
        LandingDetails::parse(&self.lot_size, &self.lot_size_unit, &self.region)
    }
}

/// One questionnaire step plus the draft carried in hidden fields.
#[derive(Debug, Default, Deserialize)]
pub struct StepForm {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub landing: LandingForm,
    #[serde(default)]
    pub current_property: Option<String>,
    #[serde(default)]
    pub property_goals: Option<String>,
    #[serde(default)]
    pub investment_capacity: Option<String>,
    #[serde(default)]
    pub preferences_concerns: Option<String>,
}

impl StepForm {
    /// The submitted step; unparseable or out-of-range values restart at step 1.
    pub fn step(&self) -> QuestionnaireStep {
        QuestionnaireStep::from_number(self.step.trim().parse().unwrap_or(1))
    }

    /// Rebuild the draft, or `None` when the carried landing details are unusable.
    pub fn draft(&self) -> Option<QuestionnaireDraft> {
        let details = self.landing.parse().ok()?;
        Some(QuestionnaireDraft {
            details,
            answers: QuestionnaireAnswers {
                current_property: self.current_property.clone(),
                property_goals: self.property_goals.clone(),
                investment_capacity: self.investment_capacity.clone(),
                preferences_concerns: self.preferences_concerns.clone(),
            },
        })
    }
}
