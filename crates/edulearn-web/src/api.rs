//! REST API endpoint handlers.
//!
//! The page holds the API key in the browser and sends it with each
//! generate request, so the server keeps no per-user state.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edulearn::CompletionClient;
use edulearn::config::{APP_TITLE, APP_VERSION, CourseConfig, DISCLAIMER, LOADING_MESSAGE};
use edulearn::course::{
    CourseContent, FormattedCourseContent, ParsedCourseContent, Section, all_content_text,
    section_text,
};
use edulearn::credentials::MemoryCredentialStore;
use edulearn::error::GenerateError;
use edulearn::session::Session;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub config: Arc<CourseConfig>,
}

/// Response body for GET /api/info.
#[derive(Serialize, Deserialize, Debug)]
pub struct InfoResponse {
    pub title: String,
    pub version: String,
    pub loading_message: String,
    pub disclaimer: String,
    pub model: String,
}

/// GET /api/info: static page text and the configured model.
pub async fn get_info(State(app): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        title: APP_TITLE.to_string(),
        version: APP_VERSION.to_string(),
        loading_message: LOADING_MESSAGE.to_string(),
        disclaimer: DISCLAIMER.to_string(),
        model: app.config.model.clone(),
    })
}

/// Request body for POST /api/generate.
#[derive(Deserialize, Debug)]
pub struct GenerateRequest {
    #[serde(default)]
    pub course_title: String,
    #[serde(default)]
    pub api_key: String,
}

/// Copy texts for the page's copy buttons.
#[derive(Serialize, Deserialize, Debug)]
pub struct CopyTexts {
    pub all: String,
    pub objective: String,
    pub syllabus: String,
    pub outcomes: String,
    pub assessments: String,
    pub readings: String,
}

impl CopyTexts {
    fn for_content(content: &CourseContent) -> Self {
        Self {
            all: all_content_text(content),
            objective: section_text(Section::Objective, content),
            syllabus: section_text(Section::Syllabus, content),
            outcomes: section_text(Section::Outcomes, content),
            assessments: section_text(Section::Assessments, content),
            readings: section_text(Section::Readings, content),
        }
    }
}

/// Response body for a successful POST /api/generate.
#[derive(Serialize, Debug)]
pub struct GenerateResponse {
    pub title: String,
    pub sections: ParsedCourseContent,
    pub html: FormattedCourseContent,
    pub copy: CopyTexts,
}

impl From<CourseContent> for GenerateResponse {
    fn from(content: CourseContent) -> Self {
        let html = content.formatted();
        let copy = CopyTexts::for_content(&content);
        Self {
            title: content.title,
            sections: content.sections,
            html,
            copy,
        }
    }
}

/// Error body shared by all failing endpoints.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// A failed request rendered as an HTTP response with an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl From<GenerateError> for ApiFailure {
    fn from(err: GenerateError) -> Self {
        let status = match &err {
            GenerateError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerateError::Api { .. }
            | GenerateError::Transport(_)
            | GenerateError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// POST /api/generate: validate, call the model and segment its reply.
///
/// Returns 200 with sections, HTML fragments and copy texts; 400 when the
/// body or its fields are rejected; 502 when the upstream API call fails.
pub async fn post_generate(
    State(app): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiFailure> {
    let Json(body) = body.inspect_err(|e| warn!("rejected generate body: {e}"))?;
    let mut session = Session::open(
        app.config.as_ref().clone(),
        Box::new(MemoryCredentialStore::default()),
    );
    session.use_api_key(body.api_key);

    match session.generate(app.client.as_ref(), &body.course_title).await {
        Ok(content) => {
            info!(
                "generated \"{}\" ({}/7 sections)",
                content.title,
                content.sections.filled_count()
            );
            Ok(Json(content.into()))
        }
        Err(e) => {
            warn!("generate failed: {e}");
            Err(e.into())
        }
    }
}
