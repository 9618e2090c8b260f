use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection, Transaction};

use galaxium_core::store::{BoxError, Store, StoreTx};
use galaxium_core::{Booking, BookingStatus, Flight, NewBooking, NewFlight, SeatClass, User};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    email   TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS flights (
    flight_id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    origin                    TEXT NOT NULL,
    destination               TEXT NOT NULL,
    departure_time            TEXT NOT NULL,
    arrival_time              TEXT NOT NULL,
    base_price                INTEGER NOT NULL,
    economy_seats_available   INTEGER NOT NULL CHECK (economy_seats_available >= 0),
    business_seats_available  INTEGER NOT NULL CHECK (business_seats_available >= 0),
    galaxium_seats_available  INTEGER NOT NULL CHECK (galaxium_seats_available >= 0)
);

CREATE TABLE IF NOT EXISTS bookings (
    booking_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      INTEGER NOT NULL REFERENCES users (user_id),
    flight_id    INTEGER NOT NULL REFERENCES flights (flight_id),
    status       TEXT NOT NULL,
    seat_class   TEXT NOT NULL,
    booking_time TEXT NOT NULL,
    price_paid   INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings (user_id);
"#;

/// SQLite-backed store. SQLite's single-writer locking gives each
/// transaction exclusive access for its check-then-mutate sequence; a
/// writer that loses the race surfaces a busy/conflict error the caller
/// may retry.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Single-connection store over an in-process database, for tests.
    pub async fn connect_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        tracing::info!("Ensuring database schema...");
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    flight_id: i64,
    origin: String,
    destination: String,
    departure_time: String,
    arrival_time: String,
    base_price: i64,
    economy_seats_available: i64,
    business_seats_available: i64,
    galaxium_seats_available: i64,
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: i64,
    user_id: i64,
    flight_id: i64,
    status: String,
    seat_class: String,
    booking_time: String,
    price_paid: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            name: row.name,
            email: row.email,
        }
    }
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            flight_id: row.flight_id,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            base_price: row.base_price,
            economy_seats_available: row.economy_seats_available,
            business_seats_available: row.business_seats_available,
            galaxium_seats_available: row.galaxium_seats_available,
        }
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = BoxError;

    fn try_from(row: BookingRow) -> Result<Self, BoxError> {
        let status = BookingStatus::parse(&row.status)
            .ok_or_else(|| format!("unknown booking status in store: {}", row.status))?;
        let seat_class = SeatClass::parse(&row.seat_class)
            .ok_or_else(|| format!("unknown seat class in store: {}", row.seat_class))?;
        let booking_time: DateTime<Utc> =
            DateTime::parse_from_rfc3339(&row.booking_time)?.with_timezone(&Utc);
        Ok(Booking {
            booking_id: row.booking_id,
            user_id: row.user_id,
            flight_id: row.flight_id,
            status,
            seat_class,
            booking_time,
            price_paid: row.price_paid,
        })
    }
}

const USER_COLUMNS: &str = "user_id, name, email";
const FLIGHT_COLUMNS: &str = "flight_id, origin, destination, departure_time, arrival_time, \
     base_price, economy_seats_available, business_seats_available, galaxium_seats_available";
const BOOKING_COLUMNS: &str =
    "booking_id, user_id, flight_id, status, seat_class, booking_time, price_paid";

fn seats_column(class: SeatClass) -> &'static str {
    match class {
        SeatClass::Economy => "economy_seats_available",
        SeatClass::Business => "business_seats_available",
        SeatClass::Galaxium => "galaxium_seats_available",
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, BoxError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(SqliteTx { tx: Some(tx) }))
    }

    async fn list_flights(&self) -> Result<Vec<Flight>, BoxError> {
        let rows: Vec<FlightRow> =
            sqlx::query_as(&format!("SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY flight_id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn bookings_for_user(&self, user_id: i64) -> Result<Vec<Booking>, BoxError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ?1 ORDER BY booking_id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, BoxError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(User::from))
    }

    async fn user_by_name_and_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, BoxError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name = ?1 AND email = ?2"
        ))
        .bind(name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }
}

struct SqliteTx {
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteTx {
    fn conn(&mut self) -> Result<&mut SqliteConnection, BoxError> {
        match self.tx.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err("transaction already committed".into()),
        }
    }
}

#[async_trait]
impl StoreTx for SqliteTx {
    async fn flight(&mut self, flight_id: i64) -> Result<Option<Flight>, BoxError> {
        let conn = self.conn()?;
        let row: Option<FlightRow> =
            sqlx::query_as(&format!("SELECT {FLIGHT_COLUMNS} FROM flights WHERE flight_id = ?1"))
                .bind(flight_id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row.map(Flight::from))
    }

    async fn user(&mut self, user_id: i64) -> Result<Option<User>, BoxError> {
        let conn = self.conn()?;
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"))
                .bind(user_id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row.map(User::from))
    }

    async fn user_by_email(&mut self, email: &str) -> Result<Option<User>, BoxError> {
        let conn = self.conn()?;
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))
                .bind(email)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row.map(User::from))
    }

    async fn insert_user(&mut self, name: &str, email: &str) -> Result<User, BoxError> {
        let conn = self.conn()?;
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?1, ?2)")
            .bind(name)
            .bind(email)
            .execute(&mut *conn)
            .await?;
        Ok(User {
            user_id: result.last_insert_rowid(),
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    async fn insert_flight(&mut self, flight: &NewFlight) -> Result<Flight, BoxError> {
        let conn = self.conn()?;
        let result = sqlx::query(
            "INSERT INTO flights (origin, destination, departure_time, arrival_time, base_price, \
             economy_seats_available, business_seats_available, galaxium_seats_available) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(&flight.departure_time)
        .bind(&flight.arrival_time)
        .bind(flight.base_price)
        .bind(flight.economy_seats_available)
        .bind(flight.business_seats_available)
        .bind(flight.galaxium_seats_available)
        .execute(&mut *conn)
        .await?;
        Ok(Flight {
            flight_id: result.last_insert_rowid(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time.clone(),
            arrival_time: flight.arrival_time.clone(),
            base_price: flight.base_price,
            economy_seats_available: flight.economy_seats_available,
            business_seats_available: flight.business_seats_available,
            galaxium_seats_available: flight.galaxium_seats_available,
        })
    }

    async fn reserve_seat(&mut self, flight_id: i64, class: SeatClass) -> Result<bool, BoxError> {
        let conn = self.conn()?;
        let column = seats_column(class);
        // Conditional decrement: the WHERE clause is the availability check,
        // evaluated atomically with the update.
        let result = sqlx::query(&format!(
            "UPDATE flights SET {column} = {column} - 1 WHERE flight_id = ?1 AND {column} > 0"
        ))
        .bind(flight_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn release_seat(&mut self, flight_id: i64, class: SeatClass) -> Result<(), BoxError> {
        let conn = self.conn()?;
        let column = seats_column(class);
        let result = sqlx::query(&format!(
            "UPDATE flights SET {column} = {column} + 1 WHERE flight_id = ?1"
        ))
        .bind(flight_id)
        .execute(&mut *conn)
        .await?;
        if result.rows_affected() == 0 {
            tracing::warn!(flight_id, class = %class, "seat release on unknown flight ignored");
        }
        Ok(())
    }

    async fn insert_booking(&mut self, booking: &NewBooking) -> Result<Booking, BoxError> {
        let conn = self.conn()?;
        let result = sqlx::query(
            "INSERT INTO bookings (user_id, flight_id, status, seat_class, booking_time, price_paid) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(booking.user_id)
        .bind(booking.flight_id)
        .bind(booking.status.as_str())
        .bind(booking.seat_class.as_str())
        .bind(booking.booking_time.to_rfc3339())
        .bind(booking.price_paid)
        .execute(&mut *conn)
        .await?;
        Ok(Booking {
            booking_id: result.last_insert_rowid(),
            user_id: booking.user_id,
            flight_id: booking.flight_id,
            status: booking.status,
            seat_class: booking.seat_class,
            booking_time: booking.booking_time,
            price_paid: booking.price_paid,
        })
    }

    async fn booking(&mut self, booking_id: i64) -> Result<Option<Booking>, BoxError> {
        let conn = self.conn()?;
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = ?1"
        ))
        .bind(booking_id)
        .fetch_optional(&mut *conn)
        .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn set_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<(), BoxError> {
        let conn = self.conn()?;
        sqlx::query("UPDATE bookings SET status = ?1 WHERE booking_id = ?2")
            .bind(status.as_str())
            .bind(booking_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        match self.tx.take() {
            Some(tx) => {
                tx.commit().await?;
                Ok(())
            }
            None => Err("transaction already committed".into()),
        }
    }
}
