//! HTTP surface: the landing page, step generation and component
//! explanations.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::db::ResponseCache;
use crate::llm_wrapper::{generate_response, CompletionClient};
use crate::prompts;
use crate::schemas::study_guide::{ComponentRequest, ErrorResponse, GuideResponse, StudyGuideRequest};
use crate::settings::Settings;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub cache: ResponseCache,
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, llm: Arc<dyn CompletionClient>) -> Self {
        let cache = ResponseCache::new(&settings.responses_file);
        Self {
            settings,
            cache,
            llm,
        }
    }
}

type ApiResult = Result<Json<GuideResponse>, (StatusCode, Json<ErrorResponse>)>;

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.settings.static_dir);
    Router::new()
        .route("/", get(home))
        .route("/generate", post(generate_study_guide))
        .route("/get_component_details", post(get_component_details))
        .nest_service("/static", static_dir)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Rejected bodies still answer with an `{error}` document.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, (StatusCode, Json<ErrorResponse>)> {
    body.map(|Json(req)| req).map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        error_response(StatusCode::BAD_REQUEST, rejection.body_text())
    })
}

pub fn render_index(default_steps: u32) -> String {
    INDEX_TEMPLATE.replace("{{ default_steps }}", &default_steps.to_string())
}

async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.settings.default_steps))
}

async fn generate_study_guide(
    State(state): State<AppState>,
    body: Result<Json<StudyGuideRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    if req.subject.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Missing required parameters",
        ));
    }

    if let Some(saved) = state.cache.get(&req.subject, req.step).await {
        if !saved.is_empty() {
            info!("Using saved response for {} step {}", req.subject, req.step);
            return Ok(Json(GuideResponse { response: saved }));
        }
    }

    let system_prompt = prompts::system_prompt(&req);
    let step_prompt = prompts::step_prompt(req.step, &req);

    let response = generate_response(
        state.llm.as_ref(),
        &system_prompt,
        &step_prompt,
        &req.previous_responses,
    )
    .await
    .map_err(|e| {
        error!("Error generating response: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    state.cache.save(&req.subject, req.step, &response).await;

    Ok(Json(GuideResponse { response }))
}

async fn get_component_details(
    State(state): State<AppState>,
    body: Result<Json<ComponentRequest>, JsonRejection>,
) -> ApiResult {
    let req = parse_body(body)?;
    let (component, subject) = match (req.component.as_deref(), req.subject.as_deref()) {
        (Some(c), Some(s)) if !c.is_empty() && !s.is_empty() => (c, s),
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Missing required parameters",
            ))
        }
    };

    let prompt = prompts::component_prompt(component, subject);
    let persona = prompts::component_persona(subject);

    let response = generate_response(state.llm.as_ref(), &persona, &prompt, &[])
        .await
        .map_err(|e| {
            error!("Error getting component details: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(GuideResponse { response }))
}
