// Saju Engine - Web Server
// REST API with Axum: chart computation + health check

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::OnceLock;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use saju_engine::{analyze, BirthInput, CalendarKind, ChartError, ChartReport, Gender, NoLunarConverter};

// ============================================================================
// Configuration
// ============================================================================

struct ServerConfig {
    bind_addr: String,
    port: u16,
}

static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

fn config() -> &'static ServerConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        ServerConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
        }
    })
}

// ============================================================================
// Request / Response types
// ============================================================================

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// POST /api/saju body
#[derive(Debug, Deserialize)]
struct ChartRequest {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    gender: String,
    #[serde(default)]
    is_lunar: bool,
    #[serde(default)]
    is_leap_month: bool,
}

impl ChartRequest {
    fn into_input(self) -> Result<BirthInput, ChartError> {
        let gender: Gender = self.gender.parse()?;
        let calendar = if self.is_lunar {
            CalendarKind::Lunar { leap_month: self.is_leap_month }
        } else {
            CalendarKind::Solar
        };
        Ok(BirthInput {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            gender,
            calendar,
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn status_for(error: &ChartError) -> StatusCode {
    match error {
        ChartError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ChartError::CalendarConversion(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChartError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: ChartError) -> Response {
    let status = status_for(&error);
    if error.is_user_error() {
        tracing::info!(%error, "rejected chart request");
    } else {
        tracing::error!(%error, "chart computation failed");
    }
    (status, Json(ApiResponse::<ChartReport>::err(error.to_string()))).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok",
        version: saju_engine::VERSION,
    }))
}

/// POST /api/saju - Compute a full chart report
async fn compute_chart(Json(request): Json<ChartRequest>) -> Response {
    tracing::debug!(?request, "chart request");

    let input = match request.into_input() {
        Ok(input) => input,
        Err(e) => return error_response(e),
    };

    // No calendar service is configured; lunar requests get a 422
    match analyze(&input, &NoLunarConverter) {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::ok(report))).into_response(),
        Err(e) => error_response(e),
    }
}

fn app() -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/saju", post(compute_chart));

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🔮 Saju Engine - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = config();
    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: POST http://{}/api/saju", addr);
    println!("   Health: GET http://{}/api/health", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app()).await?;

    Ok(())
}
