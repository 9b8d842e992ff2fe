//! Landing form and the four-step questionnaire.
//!
//! The draft travels in hidden form fields, so every step submit carries the
//! full state and the server keeps nothing between requests.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use valora_core::{MISSING_ANSWER, QuestionnaireDraft, QuestionnaireStep, StepOutcome};
use valora_service::ServiceError;

use crate::AppState;
use crate::forms::{LandingForm, StepForm};
use crate::pages::{self, PageError};
use crate::views::{LandingView, QuestionnaireView};

pub async fn landing(State(state): State<Arc<AppState>>) -> Result<Response, PageError> {
    Ok(state.pages.render(pages::LANDING, &LandingView::blank())?.into_response())
}

pub async fn submit_landing(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LandingForm>,
) -> Result<Response, PageError> {
    match form.parse() {
        Ok(details) => {
            let draft = QuestionnaireDraft::new(details);
            render_step(&state, &draft, QuestionnaireStep::CurrentProperty, None)
        },
        Err(e) => {
            let view = LandingView::rejected(&form, user_message(&e.to_string()));
            Ok(state.pages.render(pages::LANDING, &view)?.into_response())
        },
    }
}

/// Nothing to resume without a posted draft.
pub async fn restart() -> Redirect {
    Redirect::to("/")
}

pub async fn submit_step(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StepForm>,
) -> Result<Response, PageError> {
    let Some(mut draft) = form.draft() else {
        tracing::debug!("questionnaire step posted without usable landing details");
        return Ok(Redirect::to("/").into_response());
    };
    let step = form.step();

    match draft.submit(step, &form.answer) {
        Err(e) => render_step(&state, &draft, step, Some(user_message(&e.to_string()))),
        Ok(StepOutcome::Next(next)) => render_step(&state, &draft, next, None),
        Ok(StepOutcome::Incomplete(missing)) => {
            render_step(&state, &draft, missing, Some(MISSING_ANSWER.to_owned()))
        },
        Ok(StepOutcome::Complete(input)) => match state.inquiry_service.submit(input).await {
            Ok(inquiry) => {
                Ok(Redirect::to(&format!("/loading-estimate/{}", inquiry.id)).into_response())
            },
            Err(ServiceError::InvalidInput(msg)) => {
                let view = LandingView::rejected(&form.landing, user_message(&msg));
                Ok(state.pages.render(pages::LANDING, &view)?.into_response())
            },
            Err(e) => Err(e.into()),
        },
    }
}

fn render_step(
    state: &AppState,
    draft: &QuestionnaireDraft,
    step: QuestionnaireStep,
    error: Option<String>,
) -> Result<Response, PageError> {
    let view = QuestionnaireView::new(draft, step, error);
    Ok(state.pages.render(pages::QUESTIONNAIRE, &view)?.into_response())
}

/// Validation errors carry an "Invalid input: " prefix meant for logs.
fn user_message(raw: &str) -> String {
    raw.strip_prefix("Invalid input: ").unwrap_or(raw).to_owned()
}
