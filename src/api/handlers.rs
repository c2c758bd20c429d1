//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{AgentStatement, compute_statement, summarize_team};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    DEFAULT_HISTORY_LENGTH, PayPeriod, PayStatement, Sale, Shift, WageSettingsOverride,
};

use super::request::{
    PeriodsQuery, SaleRequest, ShiftRequest, StatementRequest, TeamSummaryRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, PeriodsResponse, StatementResponse, TeamSummaryResponse,
};
use super::state::AppState;

/// Largest number of periods `GET /periods` will list.
pub const MAX_HISTORY_LENGTH: usize = 120;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/statement", post(statement_handler))
        .route("/periods", get(periods_handler))
        .route("/team/summary", post(team_summary_handler))
        .with_state(state)
}

/// Handler for POST /statement.
///
/// Computes one agent's pay statement for the selected period.
async fn statement_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing statement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let agent_id = request.agent_id.clone();
    let start_time = Instant::now();
    match build_statement(state.config(), request, today()) {
        Ok(statement) => {
            info!(
                correlation_id = %correlation_id,
                agent_id = %agent_id,
                period = %statement.period,
                shift_count = statement.shift_count,
                sale_count = statement.sale_count,
                net_pay = %statement.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Statement computed"
            );
            json_response(
                StatusCode::OK,
                StatementResponse {
                    calculation_id: correlation_id,
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    agent_id,
                    statement,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                agent_id = %agent_id,
                error = %err,
                "Statement rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /periods.
///
/// Lists consecutive pay periods, newest first.
async fn periods_handler(query: Result<Query<PeriodsQuery>, QueryRejection>) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Invalid periods query");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let count = query.count.unwrap_or(DEFAULT_HISTORY_LENGTH);
    if count == 0 || count > MAX_HISTORY_LENGTH {
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error(format!(
                "count must be between 1 and {}, got {}",
                MAX_HISTORY_LENGTH, count
            )),
        );
    }

    let reference = query.reference_date.unwrap_or_else(today);
    let periods = PayPeriod::history(reference, count);
    info!(reference_date = %reference, count, "Listed pay periods");

    json_response(StatusCode::OK, PeriodsResponse { periods })
}

/// Handler for POST /team/summary.
///
/// Computes a statement per agent and aggregates them.
async fn team_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<TeamSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing team summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let start_time = Instant::now();
    let result = request.selection.resolve(today()).and_then(|period| {
        let statements = request
            .agents
            .into_iter()
            .map(|agent| -> EngineResult<AgentStatement> {
                let statement = agent_statement(
                    state.config(),
                    &agent.agent_id,
                    agent.settings.as_ref(),
                    agent.shifts,
                    agent.sales,
                    &period,
                )?;
                Ok(AgentStatement {
                    agent_id: agent.agent_id,
                    statement,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        summarize_team(&period, &statements)
    });

    match result {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                period = %summary.period,
                agent_count = summary.agent_count,
                total_sales = summary.total_sales,
                duration_us = start_time.elapsed().as_micros(),
                "Team summary computed"
            );
            json_response(
                StatusCode::OK,
                TeamSummaryResponse {
                    calculation_id: correlation_id,
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    summary,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Team summary rejected"
            );
            error_response(err.into())
        }
    }
}

/// Resolves the period and computes the statement for a statement request.
fn build_statement(
    config: &ConfigLoader,
    request: StatementRequest,
    today: NaiveDate,
) -> EngineResult<PayStatement> {
    let period = request.selection.resolve(today)?;
    agent_statement(
        config,
        &request.agent_id,
        request.settings.as_ref(),
        request.shifts,
        request.sales,
        &period,
    )
}

/// Validates one agent's records and computes their statement.
fn agent_statement(
    config: &ConfigLoader,
    agent_id: &str,
    settings: Option<&WageSettingsOverride>,
    shifts: Vec<ShiftRequest>,
    sales: Vec<SaleRequest>,
    period: &PayPeriod,
) -> EngineResult<PayStatement> {
    let settings = config.resolve_settings(agent_id, settings)?;

    let shifts: Vec<Shift> = shifts.into_iter().map(Into::into).collect();
    for shift in &shifts {
        shift.validate()?;
    }

    let projects = config.project_names();
    let sales: Vec<Sale> = sales.into_iter().map(Into::into).collect();
    for sale in &sales {
        sale.validate(&projects)?;
    }

    compute_statement(&shifts, &sales, &settings, period)
}

/// Maps a JSON body rejection onto an API error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Today's date in Iceland, which keeps UTC all year.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
