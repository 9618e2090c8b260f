use axum::{extract::State, routing::get, Json, Router};

use galaxium_core::FlightView;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights", get(list_flights))
}

/// GET /flights
/// Every flight with its seat counters and derived per-class prices.
async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<FlightView>>, ApiError> {
    Ok(Json(state.flights.list_flights().await?))
}
