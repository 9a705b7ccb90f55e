use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::AppState;

/// Background reclamation of expired booking holds. The widget flow
/// only ever writes holds; this sweeper is the process that terminates
/// their lifecycle.
pub struct HoldSweeper {
    state: Arc<AppState>,
}

impl HoldSweeper {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn run_once(&self) {
        let now = Utc::now().naive_utc();
        match self.state.store.delete_expired_holds(now).await {
            Ok(0) => {}
            Ok(n) => info!("Reclaimed {} expired booking holds", n),
            Err(e) => error!("Hold sweep failed: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::BookingHold;
    use crate::store::{MemoryStore, ReservationStore};
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    fn hold_expiring_at(expires_at: NaiveDateTime) -> BookingHold {
        BookingHold {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            booking_time: expires_at + Duration::hours(2),
            party_size: 2,
            duration_minutes: 120,
            session_id: Uuid::new_v4(),
            expires_at,
            created_at: expires_at - Duration::minutes(10),
        }
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_holds() {
        let store = MemoryStore::new();
        let now = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        store.insert_hold(&hold_expiring_at(now - Duration::minutes(1))).await.unwrap();
        store.insert_hold(&hold_expiring_at(now)).await.unwrap();
        store.insert_hold(&hold_expiring_at(now + Duration::minutes(1))).await.unwrap();

        let removed = store.delete_expired_holds(now).await.unwrap();

        assert_eq!(removed, 2);
        let remaining = store.holds();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].expires_at > now);
    }
}
