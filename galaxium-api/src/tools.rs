//! Tool-call adapter for AI agents.
//!
//! Exposes the same six operations as the REST surface as self-describing
//! tools: `GET /tools` lists the definitions, `POST /tools/call` dispatches
//! a call by name to the underlying services.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Serialize)]
pub struct ToolCallResponse {
    pub content: Value,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
}

fn definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "list_flights",
            description: "List all available flights with origin, destination, times, \
                          per-class prices, and seats available in each class.",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDef {
            name: "book_flight",
            description: "Book a seat on a specific flight for a user in the specified seat \
                          class. Requires user_id, name, and flight_id. Optional seat_class: \
                          'economy' (default), 'business', or 'galaxium'. Decrements available \
                          seats for the selected class if successful.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "user_id": { "type": "integer" },
                    "name": { "type": "string" },
                    "flight_id": { "type": "integer" },
                    "seat_class": {
                        "type": "string",
                        "enum": ["economy", "business", "galaxium"],
                        "default": "economy"
                    }
                },
                "required": ["user_id", "name", "flight_id"]
            }),
        },
        ToolDef {
            name: "get_bookings",
            description: "Retrieve all bookings for a specific user by user_id.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "user_id": { "type": "integer" }
                },
                "required": ["user_id"]
            }),
        },
        ToolDef {
            name: "cancel_booking",
            description: "Cancel an existing booking by its booking_id. Increments available \
                          seats for the booking's seat class if successful.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "booking_id": { "type": "integer" }
                },
                "required": ["booking_id"]
            }),
        },
        ToolDef {
            name: "register_user",
            description: "Register a new user with a name and unique email. Returns the \
                          created user's details including the assigned user_id.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "email": { "type": "string" }
                },
                "required": ["name", "email"]
            }),
        },
        ToolDef {
            name: "get_user_id",
            description: "Retrieve a user's information, including user_id, by providing both \
                          name and email.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "email": { "type": "string" }
                },
                "required": ["name", "email"]
            }),
        },
    ]
}

/// GET /tools
async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": definitions() }))
}

/// POST /tools/call
async fn call_tool(
    State(state): State<AppState>,
    Json(req): Json<ToolCallRequest>,
) -> Result<Json<ToolCallResponse>, ApiError> {
    let content = dispatch(&state, &req.name, req.arguments).await?;
    Ok(Json(ToolCallResponse { content }))
}

#[derive(Debug, Deserialize)]
struct BookFlightArgs {
    user_id: i64,
    name: String,
    flight_id: i64,
    #[serde(default = "default_seat_class")]
    seat_class: String,
}

fn default_seat_class() -> String {
    "economy".to_string()
}

#[derive(Debug, Deserialize)]
struct GetBookingsArgs {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct CancelBookingArgs {
    booking_id: i64,
}

#[derive(Debug, Deserialize)]
struct UserArgs {
    name: String,
    email: String,
}

async fn dispatch(state: &AppState, name: &str, arguments: Value) -> Result<Value, ApiError> {
    match name {
        "list_flights" => to_content(state.flights.list_flights().await?),
        "book_flight" => {
            let args: BookFlightArgs = parse_args(arguments)?;
            to_content(
                state
                    .bookings
                    .book_flight(args.user_id, &args.name, args.flight_id, &args.seat_class)
                    .await?,
            )
        }
        "get_bookings" => {
            let args: GetBookingsArgs = parse_args(arguments)?;
            to_content(state.bookings.bookings_for_user(args.user_id).await?)
        }
        "cancel_booking" => {
            let args: CancelBookingArgs = parse_args(arguments)?;
            to_content(state.bookings.cancel_booking(args.booking_id).await?)
        }
        "register_user" => {
            let args: UserArgs = parse_args(arguments)?;
            to_content(state.identity.register(&args.name, &args.email).await?)
        }
        "get_user_id" => {
            let args: UserArgs = parse_args(arguments)?;
            to_content(state.identity.find_user(&args.name, &args.email).await?)
        }
        _ => Err(ApiError::NotFound {
            code: "UNKNOWN_TOOL",
            message: format!("Tool not found: {name}"),
        }),
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ApiError> {
    serde_json::from_value(arguments).map_err(|e| ApiError::BadRequest {
        code: "INVALID_ARGUMENTS",
        message: format!("Invalid tool arguments: {e}"),
    })
}

fn to_content<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(Box::new(e)))
}
