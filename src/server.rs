use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tracing::{info, warn};

use crate::api::{run_analysis, ApiAnalyzeResponse, ApiError};
use feed_analyzer::config::{AnalyzerConfig, WindowConfig};
use feed_analyzer::synthetic::FeedRequest;

#[derive(Clone)]
struct AppState {
    window: Arc<WindowConfig>,
}

pub async fn serve(config: AnalyzerConfig) -> Result<(), String> {
    let state = AppState {
        window: Arc::new(config.window),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/analyze-feed", post(analyze_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "feed analyzer listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<FeedRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, Json<ApiError>)> {
    let started = Instant::now();
    let result = run_analysis(&request, &state.window);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(response) => {
            info!(
                messages = request.messages.len(),
                window_minutes = request.time_window_minutes,
                elapsed_ms,
                "analyzed feed"
            );
            Ok(Json(response))
        }
        Err(err) => {
            warn!(code = %err.code, error = %err.error, "rejected feed");
            Err((err.status(), Json(err)))
        }
    }
}
