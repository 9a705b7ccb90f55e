use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Booking, BookingHold, DiningTable};

use super::ReservationStore;

/// In-memory [`ReservationStore`] used by the test suite in place of
/// Postgres. Seed it with tables and bookings, then drive the services
/// or the full router against it.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: Vec<DiningTable>,
    bookings: Vec<Booking>,
    holds: Vec<BookingHold>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_table(&self, table: DiningTable) {
        self.inner.lock().unwrap().tables.push(table);
    }

    pub fn seed_booking(&self, booking: Booking) {
        self.inner.lock().unwrap().bookings.push(booking);
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.lock().unwrap().bookings.clone()
    }

    pub fn holds(&self) -> Vec<BookingHold> {
        self.inner.lock().unwrap().holds.clone()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn active_tables(&self, tenant_id: Uuid) -> Result<Vec<DiningTable>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut tables: Vec<DiningTable> = inner
            .tables
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.active)
            .cloned()
            .collect();
        tables.sort_by(|a, b| a.capacity.cmp(&b.capacity).then_with(|| a.name.cmp(&b.name)));
        Ok(tables)
    }

    async fn bookings_on(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, StoreError> {
        let day_start = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        let day_end = day_start + Duration::days(1);

        let inner = self.inner.lock().unwrap();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| {
                b.tenant_id == tenant_id
                    && b.booking_time >= day_start
                    && b.booking_time < day_end
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.booking_time);
        Ok(bookings)
    }

    async fn insert_hold(&self, hold: &BookingHold) -> Result<(), StoreError> {
        self.inner.lock().unwrap().holds.push(hold.clone());
        Ok(())
    }

    async fn find_booking(
        &self,
        tenant_id: Uuid,
        guest_email: &str,
        booking_time: NaiveDateTime,
    ) -> Result<Option<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut matches: Vec<&Booking> = inner
            .bookings
            .iter()
            .filter(|b| {
                b.tenant_id == tenant_id
                    && b.guest_email == guest_email
                    && b.booking_time == booking_time
            })
            .collect();
        matches.sort_by_key(|b| b.created_at);
        Ok(matches.first().map(|b| (*b).clone()))
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        self.inner.lock().unwrap().bookings.push(booking.clone());
        Ok(())
    }

    async fn delete_expired_holds(&self, now: NaiveDateTime) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.holds.len();
        inner.holds.retain(|h| h.expires_at > now);
        Ok((before - inner.holds.len()) as u64)
    }
}
