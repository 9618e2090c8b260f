use chrono::{TimeZone, Utc};

use galaxium_core::{BookingStatus, NewBooking, NewFlight, SeatClass, Store};
use galaxium_store::{seed, MemoryStore, SqliteStore};

async fn store() -> SqliteStore {
    let store = SqliteStore::connect_in_memory().await.unwrap();
    store.init_schema().await.unwrap();
    store
}

fn demo_flight() -> NewFlight {
    NewFlight {
        origin: "Earth".into(),
        destination: "Mars".into(),
        departure_time: "2099-01-01T09:00:00Z".into(),
        arrival_time: "2099-01-01T17:00:00Z".into(),
        base_price: 1_000_000,
        economy_seats_available: 6,
        business_seats_available: 3,
        galaxium_seats_available: 1,
    }
}

#[tokio::test]
async fn test_user_round_trip() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    let alice = tx.insert_user("Alice", "alice@example.com").await.unwrap();
    let bob = tx.insert_user("Bob", "bob@example.com").await.unwrap();
    tx.commit().await.unwrap();

    assert!(bob.user_id > alice.user_id);

    let found = store.user_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(found, alice);

    let by_pair = store
        .user_by_name_and_email("Bob", "bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_pair, bob);

    // Both fields must match exactly, case included
    assert!(store
        .user_by_name_and_email("bob", "bob@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_email_hits_unique_constraint() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    tx.insert_user("Alice", "alice@example.com").await.unwrap();
    let err = tx.insert_user("Other", "alice@example.com").await.unwrap_err();
    assert!(err.to_string().to_lowercase().contains("unique"));
}

#[tokio::test]
async fn test_booking_round_trip_preserves_completed_status() {
    let store = store().await;
    let booked_at = Utc.with_ymd_and_hms(2098, 12, 1, 9, 0, 0).unwrap();

    let mut tx = store.begin().await.unwrap();
    let user = tx.insert_user("Alice", "alice@example.com").await.unwrap();
    let flight = tx.insert_flight(&demo_flight()).await.unwrap();
    let booking = tx
        .insert_booking(&NewBooking {
            user_id: user.user_id,
            flight_id: flight.flight_id,
            status: BookingStatus::Completed,
            seat_class: SeatClass::Galaxium,
            booking_time: booked_at,
            price_paid: 5_000_000,
        })
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let bookings = store.bookings_for_user(user.user_id).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].booking_id, booking.booking_id);
    assert_eq!(bookings[0].status, BookingStatus::Completed);
    assert_eq!(bookings[0].seat_class, SeatClass::Galaxium);
    assert_eq!(bookings[0].booking_time, booked_at);
    assert_eq!(bookings[0].price_paid, 5_000_000);
}

#[tokio::test]
async fn test_reserve_decrements_only_the_requested_class() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    let flight = tx.insert_flight(&demo_flight()).await.unwrap();
    assert!(tx.reserve_seat(flight.flight_id, SeatClass::Business).await.unwrap());
    tx.commit().await.unwrap();

    let flights = store.list_flights().await.unwrap();
    assert_eq!(flights[0].economy_seats_available, 6);
    assert_eq!(flights[0].business_seats_available, 2);
    assert_eq!(flights[0].galaxium_seats_available, 1);
}

#[tokio::test]
async fn test_reserve_floors_at_zero() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    let flight = tx.insert_flight(&demo_flight()).await.unwrap();
    assert!(tx.reserve_seat(flight.flight_id, SeatClass::Galaxium).await.unwrap());
    // Counter is now 0; the conditional update must refuse
    assert!(!tx.reserve_seat(flight.flight_id, SeatClass::Galaxium).await.unwrap());
    let current = tx.flight(flight.flight_id).await.unwrap().unwrap();
    assert_eq!(current.galaxium_seats_available, 0);
    tx.commit().await.unwrap();
}

#[tokio::test]
async fn test_reserve_on_unknown_flight_fails_without_error() {
    let store = store().await;
    let mut tx = store.begin().await.unwrap();
    assert!(!tx.reserve_seat(404, SeatClass::Economy).await.unwrap());
}

#[tokio::test]
async fn test_release_restores_and_ignores_unknown_flight() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    let flight = tx.insert_flight(&demo_flight()).await.unwrap();
    assert!(tx.reserve_seat(flight.flight_id, SeatClass::Economy).await.unwrap());
    tx.release_seat(flight.flight_id, SeatClass::Economy).await.unwrap();
    // Unknown flight: silent no-op
    tx.release_seat(404, SeatClass::Economy).await.unwrap();
    tx.commit().await.unwrap();

    let flights = store.list_flights().await.unwrap();
    assert_eq!(flights[0].economy_seats_available, 6);
}

#[tokio::test]
async fn test_drop_without_commit_rolls_back() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    tx.insert_flight(&demo_flight()).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = store.begin().await.unwrap();
    assert!(tx.reserve_seat(1, SeatClass::Economy).await.unwrap());
    tx.insert_user("Ghost", "ghost@example.com").await.unwrap();
    drop(tx);

    let flights = store.list_flights().await.unwrap();
    assert_eq!(flights[0].economy_seats_available, 6);
    assert!(store.user_by_email("ghost@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_booking_status_touches_nothing_else() {
    let store = store().await;

    let mut tx = store.begin().await.unwrap();
    let user = tx.insert_user("Alice", "alice@example.com").await.unwrap();
    let flight = tx.insert_flight(&demo_flight()).await.unwrap();
    let booking = tx
        .insert_booking(&NewBooking {
            user_id: user.user_id,
            flight_id: flight.flight_id,
            status: BookingStatus::Booked,
            seat_class: SeatClass::Business,
            booking_time: Utc::now(),
            price_paid: 2_500_000,
        })
        .await
        .unwrap();
    tx.set_booking_status(booking.booking_id, BookingStatus::Cancelled).await.unwrap();
    tx.commit().await.unwrap();

    let bookings = store.bookings_for_user(user.user_id).await.unwrap();
    assert_eq!(bookings[0].status, BookingStatus::Cancelled);
    assert_eq!(bookings[0].seat_class, SeatClass::Business);
    assert_eq!(bookings[0].price_paid, 2_500_000);
}

#[tokio::test]
async fn test_commit_twice_is_an_error() {
    let store = store().await;
    let mut tx = store.begin().await.unwrap();
    tx.insert_user("Alice", "alice@example.com").await.unwrap();
    tx.commit().await.unwrap();
    assert!(tx.commit().await.is_err());
}

#[tokio::test]
async fn test_seed_populates_sqlite_and_is_idempotent() {
    let store = store().await;

    seed::seed_demo_data(&store).await.unwrap();
    let flights = store.list_flights().await.unwrap();
    assert_eq!(flights.len(), 10);
    assert_eq!(flights[0].economy_seats_available, 5); // 6 minus the demo booking
    assert_eq!(flights[0].origin, "Earth");
    assert_eq!(flights[0].base_price, 1_000_000);

    // Second run is a no-op
    seed::seed_demo_data(&store).await.unwrap();
    assert_eq!(store.list_flights().await.unwrap().len(), 10);

    let alice = store.user_by_email("alice@example.com").await.unwrap().unwrap();
    let bookings = store.bookings_for_user(alice.user_id).await.unwrap();
    assert_eq!(bookings.len(), 2);
}

#[tokio::test]
async fn test_seed_populates_memory_store() {
    let store = MemoryStore::new();
    seed::seed_demo_data(&store).await.unwrap();

    let flights = store.list_flights().await.unwrap();
    assert_eq!(flights.len(), 10);
    // Every class keeps a non-negative counter after demo bookings
    for flight in &flights {
        assert!(flight.economy_seats_available >= 0);
        assert!(flight.business_seats_available >= 0);
        assert!(flight.galaxium_seats_available >= 0);
    }
}
