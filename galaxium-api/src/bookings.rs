use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use galaxium_core::Booking;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub user_id: i64,
    pub name: String,
    pub flight_id: i64,
    #[serde(default = "default_seat_class")]
    pub seat_class: String,
}

fn default_seat_class() -> String {
    "economy".to_string()
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(book_flight))
        .route("/bookings/{user_id}", get(get_bookings))
        .route("/cancel/{booking_id}", post(cancel_booking))
}

/// POST /book
/// Book a seat on a flight for a user. `seat_class` defaults to economy.
async fn book_flight(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .bookings
        .book_flight(req.user_id, &req.name, req.flight_id, &req.seat_class)
        .await?;
    Ok(Json(booking))
}

/// GET /bookings/{user_id}
/// All bookings for a user, any status.
async fn get_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.bookings_for_user(user_id).await?))
}

/// POST /cancel/{booking_id}
/// Cancel an existing booking and restore its seat.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.bookings.cancel_booking(booking_id).await?))
}
