use chrono::{Duration, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use crate::config::BookingConfig;
use crate::error::StoreError;
use crate::models::BookingHold;
use crate::store::ReservationStore;

#[derive(Debug, Error)]
pub enum HoldError {
    #[error("no table can seat a party of {0}")]
    NoSuitableTable(i32),
    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct HoldOutcome {
    pub hold: BookingHold,
    pub table_identifiers: Vec<String>,
}

/// Creates a 10-minute hold for a selected slot.
///
/// The hold carries a freshly generated session id and expires at
/// `now + hold_ttl_minutes`. Table assignment picks the smallest active
/// table that seats the party. Availability is NOT re-checked against
/// concurrent holds; the hold is advisory data until the sweeper or a
/// confirm consumes the slot.
pub async fn create_hold(
    store: &dyn ReservationStore,
    tenant_id: Uuid,
    booking_time: NaiveDateTime,
    party_size: i32,
    now: NaiveDateTime,
    cfg: &BookingConfig,
) -> Result<HoldOutcome, HoldError> {
    let tables = store.active_tables(tenant_id).await?;

    // active_tables returns capacity-ascending order, so the first
    // suitable table is the tightest fit.
    let assigned = tables
        .iter()
        .find(|t| t.capacity >= party_size)
        .ok_or(HoldError::NoSuitableTable(party_size))?;

    let hold = BookingHold {
        id: Uuid::new_v4(),
        tenant_id,
        booking_time,
        party_size,
        duration_minutes: cfg.slot_duration_minutes as i32,
        session_id: Uuid::new_v4(),
        expires_at: now + Duration::minutes(cfg.hold_ttl_minutes),
        created_at: now,
    };

    store.insert_hold(&hold).await?;

    Ok(HoldOutcome {
        hold,
        table_identifiers: vec![assigned.name.clone()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiningTable;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn table(tenant: Uuid, name: &str, capacity: i32) -> DiningTable {
        DiningTable {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            name: name.to_string(),
            capacity,
            active: true,
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn hold_expires_exactly_ttl_after_creation() {
        let tenant = Uuid::new_v4();
        let store = MemoryStore::new();
        store.seed_table(table(tenant, "window-2", 4));
        let now = at(11, 0);

        let outcome = create_hold(&store, tenant, at(18, 0), 2, now, &BookingConfig::default())
            .await
            .unwrap();

        assert_eq!(outcome.hold.expires_at, now + Duration::minutes(10));
        assert_eq!(store.holds().len(), 1);
    }

    #[tokio::test]
    async fn assigns_the_smallest_suitable_table() {
        let tenant = Uuid::new_v4();
        let store = MemoryStore::new();
        store.seed_table(table(tenant, "banquet-8", 8));
        store.seed_table(table(tenant, "corner-4", 4));
        store.seed_table(table(tenant, "bar-2", 2));

        let outcome = create_hold(&store, tenant, at(19, 0), 3, at(11, 0), &BookingConfig::default())
            .await
            .unwrap();

        assert_eq!(outcome.table_identifiers, vec!["corner-4".to_string()]);
    }

    #[tokio::test]
    async fn fails_when_no_table_fits_the_party() {
        let tenant = Uuid::new_v4();
        let store = MemoryStore::new();
        store.seed_table(table(tenant, "bar-2", 2));

        let err = create_hold(&store, tenant, at(19, 0), 6, at(11, 0), &BookingConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, HoldError::NoSuitableTable(6)));
        assert!(store.holds().is_empty());
    }
}
