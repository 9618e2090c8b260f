use crate::models::{BookingStatus, SeatClass};
use crate::store::BoxError;

/// Expected business-rule outcomes. Every variant carries enough context to
/// render a short message, a stable machine-readable code, and elaborating
/// detail text. These are returned as values; the core never panics or
/// unwinds for them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid seat class")]
    InvalidSeatClass { class: String },

    #[error("Flight not found")]
    FlightNotFound { flight_id: i64 },

    #[error("No seats available")]
    NoSeatsAvailable { class: SeatClass },

    #[error("User not found")]
    UserNotFound { details: String },

    #[error("Name mismatch")]
    NameMismatch {
        user_id: i64,
        given: String,
        registered: String,
    },

    #[error("Booking not found")]
    BookingNotFound { booking_id: i64 },

    #[error("Booking already cancelled")]
    AlreadyCancelled {
        booking_id: i64,
        status: BookingStatus,
    },

    #[error("Invalid email address")]
    InvalidEmail { email: String },

    #[error("Email already registered")]
    EmailExists { email: String },
}

impl BookingError {
    /// Stable code callers can branch on.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSeatClass { .. } => "INVALID_SEAT_CLASS",
            Self::FlightNotFound { .. } => "FLIGHT_NOT_FOUND",
            Self::NoSeatsAvailable { .. } => "NO_SEATS_AVAILABLE",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::NameMismatch { .. } => "NAME_MISMATCH",
            Self::BookingNotFound { .. } => "BOOKING_NOT_FOUND",
            Self::AlreadyCancelled { .. } => "ALREADY_CANCELLED",
            Self::InvalidEmail { .. } => "INVALID_EMAIL",
            Self::EmailExists { .. } => "EMAIL_EXISTS",
        }
    }

    /// Elaborating detail text for the caller-facing error body.
    pub fn details(&self) -> String {
        match self {
            Self::InvalidSeatClass { class } => format!(
                "Seat class '{class}' is not valid. Choose one of 'economy', 'business', or 'galaxium'."
            ),
            Self::FlightNotFound { flight_id } => format!(
                "The specified flight_id {flight_id} does not exist in our system. \
                 Please check the flight_id or use list_flights to see available flights."
            ),
            Self::NoSeatsAvailable { class } => format!(
                "No {class} seats are available on this flight. \
                 Please choose another seat class or check other flights."
            ),
            Self::UserNotFound { details } => details.clone(),
            Self::NameMismatch {
                user_id,
                given,
                registered,
            } => format!(
                "User ID {user_id} exists but the name '{given}' does not match the registered \
                 name '{registered}'. Please verify the user's name or use the correct name for \
                 this user ID."
            ),
            Self::BookingNotFound { booking_id } => format!(
                "Booking with ID {booking_id} not found. The booking may have been deleted or \
                 the booking_id may be incorrect."
            ),
            Self::AlreadyCancelled { booking_id, status } => format!(
                "Booking {booking_id} is already cancelled and cannot be cancelled again. \
                 The booking status is currently '{status}'."
            ),
            Self::InvalidEmail { email } => format!(
                "'{email}' is not a valid email address. Expected a local part, an '@', a \
                 domain, and a top-level domain of at least two letters."
            ),
            Self::EmailExists { email } => format!(
                "Email '{email}' is already registered. A user with this email already exists \
                 in our system. If you're trying to access an existing account, use get_user \
                 with the correct name and email to get the user_id."
            ),
        }
    }

    pub fn user_id_unknown(user_id: i64) -> Self {
        Self::UserNotFound {
            details: format!(
                "User with ID {user_id} is not registered in our system. The user might need \
                 to register first, or you may need to check if the user_id is correct."
            ),
        }
    }

    pub fn user_lookup_failed(name: &str, email: &str) -> Self {
        Self::UserNotFound {
            details: format!(
                "User not found with name '{name}' and email '{email}'. The user may not be \
                 registered in our system. Please check the spelling of both name and email, \
                 or register the user first."
            ),
        }
    }
}

/// Outcome of a service operation: either a business-rule failure the caller
/// branches on, or a storage failure that propagates untouched.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("storage failure: {0}")]
    Store(BoxError),
}

impl From<BoxError> for ServiceError {
    fn from(err: BoxError) -> Self {
        Self::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let cases: Vec<(BookingError, &str)> = vec![
            (
                BookingError::InvalidSeatClass { class: "luxury".into() },
                "INVALID_SEAT_CLASS",
            ),
            (BookingError::FlightNotFound { flight_id: 9 }, "FLIGHT_NOT_FOUND"),
            (
                BookingError::NoSeatsAvailable { class: SeatClass::Economy },
                "NO_SEATS_AVAILABLE",
            ),
            (BookingError::user_id_unknown(9), "USER_NOT_FOUND"),
            (
                BookingError::NameMismatch {
                    user_id: 1,
                    given: "Bob".into(),
                    registered: "Alice".into(),
                },
                "NAME_MISMATCH",
            ),
            (BookingError::BookingNotFound { booking_id: 9 }, "BOOKING_NOT_FOUND"),
            (
                BookingError::AlreadyCancelled {
                    booking_id: 1,
                    status: BookingStatus::Cancelled,
                },
                "ALREADY_CANCELLED",
            ),
            (BookingError::InvalidEmail { email: "x".into() }, "INVALID_EMAIL"),
            (BookingError::EmailExists { email: "a@x.com".into() }, "EMAIL_EXISTS"),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_name_mismatch_detail_names_registered_name() {
        let err = BookingError::NameMismatch {
            user_id: 3,
            given: "Bob".into(),
            registered: "Alice".into(),
        };
        assert!(err.details().contains("'Alice'"));
        assert!(err.details().contains("'Bob'"));
    }

    #[test]
    fn test_no_seats_detail_names_the_class() {
        let err = BookingError::NoSeatsAvailable { class: SeatClass::Galaxium };
        assert!(err.details().contains("galaxium"));
    }

    #[test]
    fn test_already_cancelled_detail_echoes_status() {
        let err = BookingError::AlreadyCancelled {
            booking_id: 4,
            status: BookingStatus::Cancelled,
        };
        assert!(err.details().contains("'cancelled'"));
    }
}
