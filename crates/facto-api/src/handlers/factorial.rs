//! /factorial handler — the lookup service over HTTP.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use facto_services::lookup::LookupError;

use super::ApiState;

#[derive(Deserialize)]
pub struct FactorialParams {
    /// Kept as a raw string so validation happens in one place, inside
    /// the lookup service, not in the extractor.
    pub number: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/factorial?number=N
///
/// A valid, non-cached key never sees a hard failure here: the response
/// is 200 with a pending message and the computation happens in the
/// background. Only structurally invalid requests get a 400.
pub async fn handle_factorial(
    State(state): State<ApiState>,
    Query(params): Query<FactorialParams>,
) -> (StatusCode, Json<MessageResponse>) {
    match state.lookup.lookup(params.number.as_deref()) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: outcome.message(),
            }),
        ),
        Err(LookupError::Validation(v)) => {
            tracing::debug!(error = %v, "lookup rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: v.message().to_string(),
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Internal error, please retry.".to_string(),
                }),
            )
        }
    }
}
