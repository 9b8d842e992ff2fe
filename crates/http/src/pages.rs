//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and rendered with handlebars.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;

pub const LANDING: &str = "landing";
pub const QUESTIONNAIRE: &str = "questionnaire";
pub const LOADING: &str = "loading";
pub const RESULTS: &str = "results";

const TEMPLATES: &[(&str, &str)] = &[
    (LANDING, include_str!("templates/landing.hbs")),
    (QUESTIONNAIRE, include_str!("templates/questionnaire.hbs")),
    (LOADING, include_str!("templates/loading.hbs")),
    (RESULTS, include_str!("templates/results.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("templates/header.hbs")),
    ("footer", include_str!("templates/footer.hbs")),
];

handlebars_helper!(usd: |value: f64| format_usd(value));
handlebars_helper!(percent: |value: f64| format!("{:.0}%", value * 100.0));

/// Compiled page templates.
pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    /// Compile every embedded template.
    ///
    /// # Errors
    /// Returns an error if a template fails to parse.
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        registry.register_helper("usd", Box::new(usd));
        registry.register_helper("percent", Box::new(percent));
        Ok(Self { registry })
    }

    /// Render a page.
    ///
    /// # Errors
    /// Returns `PageError` if the template is unknown or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, PageError> {
        self.registry.render(name, data).map(Html).map_err(|e| PageError(e.into()))
    }
}

/// Failure while producing an HTML page. Logged; the user sees a static page.
#[derive(Debug)]
pub struct PageError(pub anyhow::Error);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "page rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}

impl From<valora_service::ServiceError> for PageError {
    fn from(err: valora_service::ServiceError) -> Self {
        Self(err.into())
    }
}

const ERROR_PAGE: &str = "<!doctype html><html><head><title>Valora Earth</title></head>\
<body><h1>Something went wrong</h1><p>Please <a href=\"/\">start again</a>.</p></body></html>";

/// Whole US dollars with thousands separators, e.g. `-$12,500`.
#[must_use]
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 { format!("-${grouped}") } else { format!("${grouped}") }
}
