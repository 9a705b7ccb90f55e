pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Booking, BookingHold, DiningTable};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Narrow data-access seam for the booking flow. The production
/// implementation talks to Postgres; tests substitute [`MemoryStore`].
/// No caching and no retries: every error aborts the calling operation.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// All active tables for a tenant.
    async fn active_tables(&self, tenant_id: Uuid) -> Result<Vec<DiningTable>, StoreError>;

    /// All bookings whose booking time falls inside the given calendar
    /// day, [00:00, next day 00:00), computed from the date's own
    /// year/month/day components.
    async fn bookings_on(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, StoreError>;

    async fn insert_hold(&self, hold: &BookingHold) -> Result<(), StoreError>;

    /// Best-effort duplicate lookup by (tenant, guest email, booking
    /// time). Not backed by a unique constraint, so two concurrent
    /// confirms can still both miss here.
    async fn find_booking(
        &self,
        tenant_id: Uuid,
        guest_email: &str,
        booking_time: NaiveDateTime,
    ) -> Result<Option<Booking>, StoreError>;

    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Removes holds whose expiry is at or before `now`. Returns the
    /// number of rows reclaimed. Only the background sweeper calls this.
    async fn delete_expired_holds(&self, now: NaiveDateTime) -> Result<u64, StoreError>;
}
