use chrono::{DateTime, Utc};

use galaxium_core::pricing;
use galaxium_core::store::{BoxError, Store};
use galaxium_core::{BookingStatus, NewBooking, NewFlight, SeatClass};

const DEMO_USERS: &[(&str, &str)] = &[
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@galaxium.com"),
    ("Diana", "diana@moonmail.com"),
    ("Eve", "eve@marsmail.com"),
    ("Frank", "frank@venusmail.com"),
    ("Grace", "grace@jupiter.com"),
    ("Heidi", "heidi@europa.com"),
    ("Ivan", "ivan@asteroidbelt.com"),
    ("Judy", "judy@pluto.com"),
];

// (origin, destination, departure, arrival, base_price, total_seats)
const DEMO_FLIGHTS: &[(&str, &str, &str, &str, i64, i64)] = &[
    ("Earth", "Mars", "2099-01-01T09:00:00Z", "2099-01-01T17:00:00Z", 1_000_000, 10),
    ("Earth", "Moon", "2099-01-02T10:00:00Z", "2099-01-02T14:00:00Z", 500_000, 10),
    ("Mars", "Earth", "2099-01-03T12:00:00Z", "2099-01-03T20:00:00Z", 950_000, 10),
    ("Venus", "Earth", "2099-01-04T08:00:00Z", "2099-01-04T18:00:00Z", 1_200_000, 10),
    ("Jupiter", "Europa", "2099-01-05T15:00:00Z", "2099-01-05T19:00:00Z", 2_000_000, 10),
    ("Earth", "Venus", "2099-01-06T07:00:00Z", "2099-01-06T15:00:00Z", 1_100_000, 10),
    ("Moon", "Mars", "2099-01-07T11:00:00Z", "2099-01-07T19:00:00Z", 800_000, 10),
    ("Mars", "Jupiter", "2099-01-08T13:00:00Z", "2099-01-08T23:00:00Z", 2_500_000, 10),
    ("Europa", "Earth", "2099-01-09T09:00:00Z", "2099-01-09T21:00:00Z", 3_000_000, 10),
    ("Earth", "Pluto", "2099-01-10T06:00:00Z", "2099-01-11T06:00:00Z", 5_000_000, 10),
];

// (user index, flight index, status, class, booking_time)
const DEMO_BOOKINGS: &[(usize, usize, BookingStatus, SeatClass, &str)] = &[
    (0, 0, BookingStatus::Booked, SeatClass::Economy, "2098-12-01T09:00:00Z"),
    (1, 0, BookingStatus::Cancelled, SeatClass::Business, "2098-12-02T10:30:00Z"),
    (2, 1, BookingStatus::Completed, SeatClass::Galaxium, "2098-11-15T08:00:00Z"),
    (3, 2, BookingStatus::Booked, SeatClass::Business, "2098-12-05T14:00:00Z"),
    (4, 3, BookingStatus::Booked, SeatClass::Galaxium, "2098-12-06T16:45:00Z"),
    (0, 4, BookingStatus::Completed, SeatClass::Economy, "2098-10-20T11:00:00Z"),
];

/// Seat split per flight: 60% economy, 30% business, 10% galaxium, with at
/// least one seat per class once a flight has three seats or more.
fn split_seats(total: i64) -> (i64, i64, i64) {
    let mut economy = total * 6 / 10;
    let mut business = total * 3 / 10;
    let mut galaxium = total / 10;
    if total >= 3 {
        economy = economy.max(1);
        business = business.max(1);
        galaxium = galaxium.max(1);
    }
    (economy, business, galaxium)
}

/// Load the deterministic demo fixture: ten users, ten interplanetary
/// flights, and a handful of bookings covering every status and class.
/// Skipped when flights already exist, so restarts don't duplicate data.
pub async fn seed_demo_data(store: &dyn Store) -> Result<(), BoxError> {
    if !store.list_flights().await?.is_empty() {
        tracing::info!("demo data already present, skipping seed");
        return Ok(());
    }

    let mut tx = store.begin().await?;

    let mut users = Vec::with_capacity(DEMO_USERS.len());
    for (name, email) in DEMO_USERS {
        users.push(tx.insert_user(name, email).await?);
    }

    let mut flights = Vec::with_capacity(DEMO_FLIGHTS.len());
    for &(origin, destination, departure, arrival, base_price, total_seats) in DEMO_FLIGHTS {
        let (economy, business, galaxium) = split_seats(total_seats);
        let flight = tx
            .insert_flight(&NewFlight {
                origin: origin.to_string(),
                destination: destination.to_string(),
                departure_time: departure.to_string(),
                arrival_time: arrival.to_string(),
                base_price,
                economy_seats_available: economy,
                business_seats_available: business,
                galaxium_seats_available: galaxium,
            })
            .await?;
        flights.push(flight);
    }

    for &(user_idx, flight_idx, status, class, booked_at) in DEMO_BOOKINGS {
        let user = &users[user_idx];
        let flight = &flights[flight_idx];
        let booking_time: DateTime<Utc> =
            DateTime::parse_from_rfc3339(booked_at)?.with_timezone(&Utc);

        // Active bookings hold a seat; cancelled and completed ones don't
        if status == BookingStatus::Booked && !tx.reserve_seat(flight.flight_id, class).await? {
            return Err(format!(
                "demo fixture oversells flight {} in class {class}",
                flight.flight_id
            )
            .into());
        }

        tx.insert_booking(&NewBooking {
            user_id: user.user_id,
            flight_id: flight.flight_id,
            status,
            seat_class: class,
            booking_time,
            price_paid: pricing::price_for(flight.base_price, class),
        })
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        users = DEMO_USERS.len(),
        flights = DEMO_FLIGHTS.len(),
        bookings = DEMO_BOOKINGS.len(),
        "seeded demo data"
    );
    Ok(())
}
