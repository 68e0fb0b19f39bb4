//! HTTP request handlers for the money-funnel API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_employee_with, calculate_entrepreneur_with};
use crate::config::{ChoreCatalog, PerTier, TierRates};
use crate::export::Statement;
use crate::models::ChoreTier;
use crate::payment::PaymentLink;

use super::request::{CalculationRequest, PaymentLinkRequest, StatementRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/chores", get(chores_handler))
        .route("/statement", post(statement_handler))
        .route("/payment-link", post(payment_link_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a task with optional overrides and returns the money funnel for
/// the requested mode.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let start_time = Instant::now();
    let outcome = match &request {
        CalculationRequest::Employee { task, ratios } => {
            calculate_employee_with(task, &config.employee_ratios(ratios.as_ref()))
        }
        CalculationRequest::Entrepreneur { task, defaults } => {
            calculate_entrepreneur_with(task, &config.entrepreneur_params(defaults.as_ref()))
        }
    };

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                mode = ?request.mode(),
                task = %request.task().task_name,
                gross_revenue = %result.gross_revenue,
                final_net = %result.final_net,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Query parameters for GET /chores.
#[derive(Debug, Deserialize)]
struct ChoresQuery {
    tier: Option<ChoreTier>,
}

/// Response body for GET /chores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoresResponse {
    /// Chores per tier.
    pub tiers: PerTier<Vec<String>>,
    /// Default rates per tier and mode.
    pub rates: TierRates,
    /// Chore suggestions, limited to `tier` when one was requested.
    pub suggestions: Vec<String>,
}

impl ChoresResponse {
    fn new(catalog: &ChoreCatalog, tier: Option<ChoreTier>) -> Self {
        Self {
            tiers: catalog.tiers.clone(),
            rates: catalog.rates.clone(),
            suggestions: catalog
                .suggestions(tier)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Handler for GET /chores endpoint.
async fn chores_handler(
    State(state): State<AppState>,
    Query(query): Query<ChoresQuery>,
) -> Json<ChoresResponse> {
    Json(ChoresResponse::new(state.config().chores(), query.tier))
}

/// Handler for POST /statement endpoint.
///
/// Renders a previously calculated result as a plain-text statement.
async fn statement_handler(payload: Result<Json<StatementRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let statement = Statement::build(&request.calculation, &request.options());
    info!(
        correlation_id = %correlation_id,
        title = statement.title,
        sections = statement.sections.len(),
        "Statement rendered"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        statement.to_string(),
    )
        .into_response()
}

/// Handler for POST /payment-link endpoint.
async fn payment_link_handler(
    payload: Result<Json<PaymentLinkRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match PaymentLink::for_result(&request.phone, &request.calculation) {
        Ok(link) => {
            info!(
                correlation_id = %correlation_id,
                amount = %link.amount,
                "Payment link created"
            );
            (StatusCode::OK, Json(link)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payment link rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error).into_response()
}
