use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::{Booking, BookingHold, DiningTable};

use super::ReservationStore;

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.pool_size)
            .acquire_timeout(std::time::Duration::from_secs(cfg.acquire_timeout_seconds))
            .connect(&cfg.url)
            .await?;

        Ok(PgStore { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Applying reservation schema migrations...");
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        info!("Reservation schema up to date");
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn active_tables(&self, tenant_id: Uuid) -> Result<Vec<DiningTable>, StoreError> {
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT id, tenant_id, name, capacity, active
             FROM restaurant_tables
             WHERE tenant_id = $1 AND active = TRUE
             ORDER BY capacity, name",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    async fn bookings_on(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, StoreError> {
        let day_start = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        let day_end = day_start + Duration::days(1);

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT id, tenant_id, booking_time, duration_minutes, party_size,
                    guest_name, guest_email, guest_phone, special_requests,
                    status, deposit_required, deposit_paid, created_at
             FROM bookings
             WHERE tenant_id = $1 AND booking_time >= $2 AND booking_time < $3
             ORDER BY booking_time",
        )
        .bind(tenant_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn insert_hold(&self, hold: &BookingHold) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO booking_holds
                 (id, tenant_id, booking_time, party_size, duration_minutes,
                  session_id, expires_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(hold.id)
        .bind(hold.tenant_id)
        .bind(hold.booking_time)
        .bind(hold.party_size)
        .bind(hold.duration_minutes)
        .bind(hold.session_id)
        .bind(hold.expires_at)
        .bind(hold.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_booking(
        &self,
        tenant_id: Uuid,
        guest_email: &str,
        booking_time: NaiveDateTime,
    ) -> Result<Option<Booking>, StoreError> {
        let booking = sqlx::query_as::<_, Booking>(
            "SELECT id, tenant_id, booking_time, duration_minutes, party_size,
                    guest_name, guest_email, guest_phone, special_requests,
                    status, deposit_required, deposit_paid, created_at
             FROM bookings
             WHERE tenant_id = $1 AND guest_email = $2 AND booking_time = $3
             ORDER BY created_at
             LIMIT 1",
        )
        .bind(tenant_id)
        .bind(guest_email)
        .bind(booking_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO bookings
                 (id, tenant_id, booking_time, duration_minutes, party_size,
                  guest_name, guest_email, guest_phone, special_requests,
                  status, deposit_required, deposit_paid, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(booking.id)
        .bind(booking.tenant_id)
        .bind(booking.booking_time)
        .bind(booking.duration_minutes)
        .bind(booking.party_size)
        .bind(&booking.guest_name)
        .bind(&booking.guest_email)
        .bind(&booking.guest_phone)
        .bind(&booking.special_requests)
        .bind(&booking.status)
        .bind(booking.deposit_required)
        .bind(booking.deposit_paid)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_expired_holds(&self, now: NaiveDateTime) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM booking_holds WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
