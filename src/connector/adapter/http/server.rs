use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::error::ApiError;
use crate::connector::api::Container;
use crate::domain::{DomainError, FormEntry, MethodologyResponse, Questionnaire, Violation};

/// Build the HTTP router with the security headers applied to every response.
pub fn router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/questions", get(questions))
        .route("/api/methodology", post(generate_methodology))
        .route("/api/questionnaire", post(submit_questionnaire))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(container)
}

/// Bind on loopback (or every interface when `public`) and serve until the
/// process is stopped.
pub async fn serve(container: Arc<Container>, port: u16, public: bool) -> anyhow::Result<()> {
    let host = if public { "0.0.0.0" } else { "127.0.0.1" };
    let listener = TcpListener::bind((host, port)).await?;
    info!(
        "Serving methodology API on http://{} (model: {})",
        listener.local_addr()?,
        container.model_name()
    );
    axum::serve(listener, router(container)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn questions(State(container): State<Arc<Container>>) -> Json<Questionnaire> {
    Json(container.questionnaire().clone())
}

async fn generate_methodology(
    State(container): State<Arc<Container>>,
    body: Bytes,
) -> Result<Json<MethodologyResponse>, ApiError> {
    let span = info_span!("methodology", request_id = %Uuid::new_v4());
    async move {
        let input: Value = parse_body(&body)?;
        let methodology = container.generate_use_case().execute(&input).await?;
        Ok(Json(methodology))
    }
    .instrument(span)
    .await
}

async fn submit_questionnaire(
    State(container): State<Arc<Container>>,
    body: Bytes,
) -> Result<Json<MethodologyResponse>, ApiError> {
    let span = info_span!("questionnaire", request_id = %Uuid::new_v4());
    async move {
        let answers: Vec<FormEntry> = parse_body(&body)?;
        let methodology = container
            .generate_use_case()
            .execute_answers(&answers)
            .await?;
        Ok(Json(methodology))
    }
    .instrument(span)
    .await
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, DomainError> {
    serde_json::from_slice(body).map_err(|e| {
        DomainError::invalid_input(vec![Violation::new(
            format!("Request body is not valid: {e}"),
            "",
        )])
    })
}
