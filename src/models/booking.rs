use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub booking_time: NaiveDateTime,
    pub duration_minutes: i32,
    pub party_size: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub special_requests: Option<String>,
    pub status: String,
    pub deposit_required: bool,
    pub deposit_paid: bool,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Human-readable code shown to the guest: `CONF` + the last six
    /// characters of the booking id, upper-cased.
    pub fn confirmation_number(&self) -> String {
        let id = self.id.to_string();
        let tail = &id[id.len() - 6..];
        format!("CONF{}", tail.to_uppercase())
    }

    /// End of the seating window, [booking_time, booking_time + duration).
    pub fn end_time(&self) -> NaiveDateTime {
        self.booking_time + chrono::Duration::minutes(self.duration_minutes as i64)
    }
}
