use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A provisional reservation intent. Write-only in the request path:
/// nothing in the widget flow reads or renews a hold once created, the
/// background sweeper reclaims expired rows.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingHold {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub booking_time: NaiveDateTime,
    pub party_size: i32,
    pub duration_minutes: i32,
    pub session_id: Uuid,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}
