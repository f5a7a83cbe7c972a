//! HTTP request handlers

use super::types::{ErrorResponse, EvictResponse, ModelRequest, ModelResponse};
use crate::dialogue::{Dialect, DialogueEngine, Intent};
use crate::services::{Finalizer, ProjectDirectory, SpecService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router<P, Sp, F>(engine: Arc<DialogueEngine<P, Sp, F>>) -> Router
where
    P: ProjectDirectory + 'static,
    Sp: SpecService + 'static,
    F: Finalizer + 'static,
{
    Router::new()
        .route("/", get(liveness))
        .route("/test/model", post(model_test::<P, Sp, F>))
        .route("/test/model/:channel", delete(evict_context::<P, Sp, F>))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

async fn liveness() -> &'static str {
    "API testing bot is running."
}

async fn model_test<P, Sp, F>(
    State(engine): State<Arc<DialogueEngine<P, Sp, F>>>,
    Json(request): Json<ModelRequest>,
) -> Result<Json<ModelResponse>, AppError>
where
    P: ProjectDirectory,
    Sp: SpecService,
    F: Finalizer,
{
    if request.channel.trim().is_empty() {
        return Err(AppError::BadRequest("channel must not be empty".to_string()));
    }

    let intent = Intent::from(request.intent);
    let dialect = Dialect::from_messenger(&request.messenger);
    let outcome = engine
        .handle(&request.channel, dialect, &request.msg, &intent)
        .await;

    Ok(Json(ModelResponse {
        text: outcome.text,
        close_context: outcome.closed,
    }))
}

async fn evict_context<P, Sp, F>(
    State(engine): State<Arc<DialogueEngine<P, Sp, F>>>,
    Path(channel): Path<String>,
) -> Json<EvictResponse>
where
    P: ProjectDirectory,
    Sp: SpecService,
    F: Finalizer,
{
    let evicted = engine.store().evict(&channel).await;
    if evicted {
        tracing::info!(channel = %channel, "context evicted");
    }
    Json(EvictResponse { evicted })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
