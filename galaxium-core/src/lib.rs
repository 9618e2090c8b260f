pub mod error;
pub mod models;
pub mod pricing;
pub mod store;

pub use error::{BookingError, ServiceError};
pub use models::{Booking, BookingStatus, Flight, NewBooking, NewFlight, SeatClass, User};
pub use pricing::FlightView;
pub use store::{BoxError, Store, StoreTx};
