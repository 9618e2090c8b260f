use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use galaxium_core::{BookingError, BoxError, ServiceError};

/// Wire shape for failed operations, shared by the REST and tool surfaces.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    Booking(BookingError),
    BadRequest { code: &'static str, message: String },
    NotFound { code: &'static str, message: String },
    Internal(BoxError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Booking(e) => Self::Booking(e),
            ServiceError::Store(e) => Self::Internal(e),
        }
    }
}

fn status_for(code: &str) -> StatusCode {
    match code {
        "INVALID_SEAT_CLASS" | "INVALID_EMAIL" => StatusCode::BAD_REQUEST,
        "FLIGHT_NOT_FOUND" | "USER_NOT_FOUND" | "BOOKING_NOT_FOUND" => StatusCode::NOT_FOUND,
        "NO_SEATS_AVAILABLE" | "EMAIL_EXISTS" | "NAME_MISMATCH" | "ALREADY_CANCELLED" => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Booking(err) => (
                status_for(err.code()),
                ErrorBody {
                    success: false,
                    error: err.to_string(),
                    error_code: err.code().to_string(),
                    details: Some(err.details()),
                },
            ),
            ApiError::BadRequest { code, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    success: false,
                    error: message,
                    error_code: code.to_string(),
                    details: None,
                },
            ),
            ApiError::NotFound { code, message } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    success: false,
                    error: message,
                    error_code: code.to_string(),
                    details: None,
                },
            ),
            ApiError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        success: false,
                        error: "Internal Server Error".to_string(),
                        error_code: "INTERNAL_ERROR".to_string(),
                        details: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
