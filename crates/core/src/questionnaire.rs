//! Multi-step questionnaire state.
//!
//! The landing form collects lot size, unit and region; four free-text steps
//! follow. The draft is carried by the client between steps, so everything
//! here is pure data plus validation.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_REGION_LEN;
use crate::error::{Result, ValuationError};
use crate::inquiry::{InquiryInput, LotSizeUnit};

pub const MISSING_LANDING_FIELDS: &str = "Lot size and region are required fields.";
pub const INVALID_LOT_SIZE: &str = "Please enter a valid lot size greater than 0.";
pub const MISSING_ANSWER: &str = "Please provide an answer before continuing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireStep {
    CurrentProperty,
    PropertyGoals,
    InvestmentCapacity,
    PreferencesConcerns,
}

impl QuestionnaireStep {
    pub const ALL: [Self; 4] = [
        Self::CurrentProperty,
        Self::PropertyGoals,
        Self::InvestmentCapacity,
        Self::PreferencesConcerns,
    ];

    /// Map a 1-based step number; anything out of range restarts at step 1.
    #[must_use]
    pub const fn from_number(n: u8) -> Self {
        match n {
            2 => Self::PropertyGoals,
            3 => Self::InvestmentCapacity,
            4 => Self::PreferencesConcerns,
            _ => Self::CurrentProperty,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::CurrentProperty => 1,
            Self::PropertyGoals => 2,
            Self::InvestmentCapacity => 3,
            Self::PreferencesConcerns => 4,
        }
    }

    /// Inquiry field filled by this step.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::CurrentProperty => "current_property",
            Self::PropertyGoals => "property_goals",
            Self::InvestmentCapacity => "investment_capacity",
            Self::PreferencesConcerns => "preferences_concerns",
        }
    }

    #[must_use]
    pub const fn question(self) -> &'static str {
        match self {
            Self::CurrentProperty => "Tell us about the property as it is today.",
            Self::PropertyGoals => "What would you like this land to become?",
            Self::InvestmentCapacity => "What investment and timeline can you commit?",
            Self::PreferencesConcerns => "Any preferences or concerns we should know about?",
        }
    }

    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::CurrentProperty => {
                "Current use, vegetation, buildings, water access, soil condition..."
            },
            Self::PropertyGoals => "Food production, carbon sequestration, biodiversity, income...",
            Self::InvestmentCapacity => "Budget range and how many years you plan to invest.",
            Self::PreferencesConcerns => "Organic only, low maintenance, wildlife corridors...",
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::CurrentProperty => Some(Self::PropertyGoals),
            Self::PropertyGoals => Some(Self::InvestmentCapacity),
            Self::InvestmentCapacity => Some(Self::PreferencesConcerns),
            Self::PreferencesConcerns => None,
        }
    }
}

/// Values collected by the landing form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LandingDetails {
    pub lot_size: f64,
    pub lot_size_unit: LotSizeUnit,
    pub region: String,
}

impl LandingDetails {
    /// Parse raw landing form values.
    ///
    /// # Errors
    /// Returns `InvalidInput` with a user-facing message when a required value
    /// is missing, the lot size is not a positive number, or the unit is unknown.
    pub fn parse(lot_size: &str, lot_size_unit: &str, region: &str) -> Result<Self> {
        let lot_size = lot_size.trim();
        let region = region.trim();
        if lot_size.is_empty() || region.is_empty() {
            return Err(ValuationError::InvalidInput(MISSING_LANDING_FIELDS.to_owned()));
        }

        if region.chars().count() > MAX_REGION_LEN {
            return Err(ValuationError::InvalidInput(format!(
                "Region must be at most {MAX_REGION_LEN} characters."
            )));
        }

        let lot_size: f64 = lot_size
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite() && *v > 0.0)
            .ok_or_else(|| ValuationError::InvalidInput(INVALID_LOT_SIZE.to_owned()))?;

        let lot_size_unit = if lot_size_unit.trim().is_empty() {
            LotSizeUnit::default()
        } else {
            lot_size_unit.parse()?
        };

        Ok(Self { lot_size, lot_size_unit, region: region.to_owned() })
    }
}

/// Free-text answers gathered so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionnaireAnswers {
    pub current_property: Option<String>,
    pub property_goals: Option<String>,
    pub investment_capacity: Option<String>,
    pub preferences_concerns: Option<String>,
}

impl QuestionnaireAnswers {
    #[must_use]
    pub fn get(&self, step: QuestionnaireStep) -> Option<&str> {
        let slot = match step {
            QuestionnaireStep::CurrentProperty => &self.current_property,
            QuestionnaireStep::PropertyGoals => &self.property_goals,
            QuestionnaireStep::InvestmentCapacity => &self.investment_capacity,
            QuestionnaireStep::PreferencesConcerns => &self.preferences_concerns,
        };
        slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn slot_mut(&mut self, step: QuestionnaireStep) -> &mut Option<String> {
        match step {
            QuestionnaireStep::CurrentProperty => &mut self.current_property,
            QuestionnaireStep::PropertyGoals => &mut self.property_goals,
            QuestionnaireStep::InvestmentCapacity => &mut self.investment_capacity,
            QuestionnaireStep::PreferencesConcerns => &mut self.preferences_concerns,
        }
    }

    #[must_use]
    pub fn first_missing(&self) -> Option<QuestionnaireStep> {
        QuestionnaireStep::ALL.into_iter().find(|step| self.get(*step).is_none())
    }
}

/// Result of submitting one questionnaire step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Show the given step next.
    Next(QuestionnaireStep),
    /// Final step accepted, but an earlier answer is missing.
    Incomplete(QuestionnaireStep),
    /// All answers present; ready to persist.
    Complete(InquiryInput),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestionnaireDraft {
    pub details: LandingDetails,
    pub answers: QuestionnaireAnswers,
}

impl QuestionnaireDraft {
    #[must_use]
    pub fn new(details: LandingDetails) -> Self {
        Self { details, answers: QuestionnaireAnswers::default() }
    }

    /// Record the answer for `step` and decide what comes next.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the answer is blank; the draft is unchanged.
    pub fn submit(&mut self, step: QuestionnaireStep, answer: &str) -> Result<StepOutcome> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValuationError::InvalidInput(MISSING_ANSWER.to_owned()));
        }
        *self.answers.slot_mut(step) = Some(answer.to_owned());

        if let Some(next) = step.next() {
            return Ok(StepOutcome::Next(next));
        }
        match self.answers.first_missing() {
            Some(missing) => Ok(StepOutcome::Incomplete(missing)),
            None => Ok(StepOutcome::Complete(self.to_inquiry_input())),
        }
    }

    fn to_inquiry_input(&self) -> InquiryInput {
        let answer = |step| self.answers.get(step).unwrap_or_default().to_owned();
        InquiryInput {
            address: format!("Property in {}", self.details.region),
            lot_size: self.details.lot_size,
            lot_size_unit: self.details.lot_size_unit,
            current_property: answer(QuestionnaireStep::CurrentProperty),
            property_goals: answer(QuestionnaireStep::PropertyGoals),
            investment_capacity: answer(QuestionnaireStep::InvestmentCapacity),
            preferences_concerns: answer(QuestionnaireStep::PreferencesConcerns),
            region: self.details.region.clone(),
        }
    }
}
