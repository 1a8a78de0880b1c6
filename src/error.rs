//! Error types for the booking registry.
//!
//! Booking and cancellation never fail with an error; they report
//! [`BookingOutcome::Failure`](crate::models::BookingOutcome) instead. Errors
//! here cover queries that need an existing record.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::FlightId;

/// Custom error type for registry queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The flight id has never been registered.
    #[error("flight {0} not found")]
    FlightNotFound(FlightId),
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match self {
            RegistryError::FlightNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
