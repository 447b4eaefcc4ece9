//! JSON API surface
//!
//! Handlers are pure renderers of state produced by the orchestrator and
//! the translation client; they echo inputs, map error kinds to status
//! codes, and never carry business logic of their own.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    PoiMapError,
    auth::{AuthContext, UserIdentity},
    geocode::NominatimClient,
    models::SearchSession,
    overpass::OverpassClient,
    search::SearchOrchestrator,
    translate::TranslationClient,
    weather::OpenMeteoClient,
};

/// The orchestrator wired to the real provider clients
pub type Orchestrator = SearchOrchestrator<NominatimClient, OverpassClient, OpenMeteoClient>;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub translator: Arc<TranslationClient>,
    pub auth: Arc<AuthContext>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(err: &PoiMapError) -> ApiError {
    let status = match err {
        PoiMapError::Validation { .. } => StatusCode::BAD_REQUEST,
        PoiMapError::NotFound { .. } => StatusCode::NOT_FOUND,
        PoiMapError::Upstream { .. } | PoiMapError::EmptyResult { .. } => StatusCode::BAD_GATEWAY,
        PoiMapError::Config { .. } | PoiMapError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.user_message(),
        }),
    )
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/me", get(me))
        .route("/search", get(search))
        .route("/session", get(session))
        .route("/translate", post(translate))
        .with_state(state)
}

/// Service health, including whether the translation endpoint is wired up
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "translation": {
            "configured": state.translator.is_configured(),
            "languages": state.translator.language_pair(),
        },
    }))
}

async fn sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<CredentialsRequest>,
) -> Result<Json<UserIdentity>, ApiError> {
    state
        .auth
        .sign_in(&credentials.email, &credentials.password)
        .map(Json)
        .map_err(|err| error_response(&err))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<CredentialsRequest>,
) -> Result<Json<UserIdentity>, ApiError> {
    state
        .auth
        .sign_up(&credentials.email, &credentials.password)
        .map(Json)
        .map_err(|err| error_response(&err))
}

async fn sign_out(State(state): State<AppState>) -> StatusCode {
    state.auth.sign_out();
    StatusCode::NO_CONTENT
}

async fn me(State(state): State<AppState>) -> Json<Option<UserIdentity>> {
    use crate::auth::IdentityGate;
    Json(state.auth.current_user())
}

/// Run a search and render the resulting session
///
/// The session carries its own error message when a search fails; the
/// response is always the full session state, the way the map view
/// renders it.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchSession> {
    Json(state.orchestrator.search(&params.q).await)
}

async fn session(State(state): State<AppState>) -> Json<SearchSession> {
    Json(state.orchestrator.session())
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    state
        .translator
        .translate(&request.text)
        .await
        .map(|translated_text| Json(TranslateResponse { translated_text }))
        .map_err(|err| error_response(&err))
}
