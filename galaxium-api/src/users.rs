use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use galaxium_core::User;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub name: String,
    pub email: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/user", get(get_user))
}

/// POST /register
/// Register a new user with a name and unique email.
async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.identity.register(&req.name, &req.email).await?))
}

/// GET /user?name=&email=
/// Look a user up by exact name and email.
async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.identity.find_user(&query.name, &query.email).await?))
}
