//! HTTP surface of the calculator.
//!
//! `GET /` serves the form page and `POST /calcular` turns a form payload into
//! an amortization schedule.

use std::any::Any;

use anyhow::{Context, anyhow};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::error::ApiError;
use crate::request::{LoanRequest, ValidationLimits};
use crate::response::CalculationResponse;

const INDEX_PAGE: &str = include_str!("index.html");

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub limits: ValidationLimits,
}

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(index))
        .route("/calcular", post(calculate))
        .with_state(state);

    with_middleware(routes)
}

/// Request tracing, plus a panic guard that answers with the generic 500 body.
pub fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(%address, max_term_months = settings.max_term_months, "amortization calculator listening");

    let state = AppState {
        limits: settings.limits(),
    };
    axum::serve(listener, router(state))
        .await
        .context("server terminated unexpectedly")
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn calculate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CalculationResponse>, ApiError> {
    let loan = LoanRequest::from_json(&body)?.validate(&state.limits)?;
    let schedule = loan.terms().schedule();

    info!(
        principal = %loan.principal,
        annual_rate = %loan.annual_rate_percent,
        term_months = loan.term_months,
        rows = schedule.rows.len(),
        installment = %schedule.fixed_installment,
        "amortization schedule computed"
    );

    Ok(Json(CalculationResponse::success(&loan, &schedule)))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(anyhow!("handler panicked: {detail}")).into_response()
}
