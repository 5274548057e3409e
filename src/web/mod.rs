//! Web form for price estimates
//!
//! `GET /` and `GET /analysis` show the blank form, `POST /analysis` validates
//! the submitted fields and renders the estimate. The predictor is loaded
//! once by the caller and shared read-only across requests.

pub mod pages;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};

use crate::features::RawFeatures;
use crate::predict::Predictor;
use crate::{HouseError, Result, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        AppState {
            predictor: Arc::new(predictor),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analysis", get(index).post(analysis))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the form until Ctrl+C
pub fn serve(config: &ServerConfig, predictor: Predictor) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let bind_addr = config.bind_addr();
    let app = router(AppState::new(predictor));

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
        log::info!("Listening on http://{}", bind_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("Server stopped");
        Ok::<_, HouseError>(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn index() -> Html<String> {
    Html(pages::render_form(None, None))
}

async fn analysis(State(state): State<AppState>, Form(raw): Form<RawFeatures>) -> Response {
    let predictor = &state.predictor;
    let result = raw
        .validate(predictor.limits())
        .and_then(|features| predictor.predict(features));

    match result {
        Ok(prediction) => Html(pages::render_result(&raw, &prediction)).into_response(),
        Err(e @ HouseError::InvalidInput { .. }) => {
            log::warn!("Rejected submission: {}", e);
            let page = pages::render_form(Some(&raw), Some(&e.to_string()));
            (StatusCode::BAD_REQUEST, Html(page)).into_response()
        }
        Err(e) => {
            log::error!("Prediction failed: {}", e);
            let page = pages::render_form(Some(&raw), Some("The estimate could not be computed."));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let artifact = state.predictor.artifact();
    Json(serde_json::json!({
        "status": "ok",
        "format_version": artifact.format_version,
        "trained_at": artifact.trained_at,
    }))
}
