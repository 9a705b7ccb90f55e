use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Booking;
use crate::store::ReservationStore;

pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
}

/// Looks up a booking by (tenant, guest email, booking time) and inserts
/// one if none exists. Returns the booking plus whether it was created
/// by this call.
///
/// The lookup-then-insert is deliberately not transactional: two
/// concurrent confirms for the same key can both miss and both insert.
/// This seam is where a unique constraint plus retry-on-conflict would
/// slot in.
pub async fn find_or_create_booking(
    store: &dyn ReservationStore,
    tenant_id: Uuid,
    booking_time: NaiveDateTime,
    guest: GuestDetails,
    party_size: i32,
    now: NaiveDateTime,
) -> Result<(Booking, bool), StoreError> {
    if let Some(existing) = store
        .find_booking(tenant_id, &guest.email, booking_time)
        .await?
    {
        return Ok((existing, false));
    }

    let booking = Booking {
        id: Uuid::new_v4(),
        tenant_id,
        booking_time,
        duration_minutes: 120,
        party_size,
        guest_name: format!("{} {}", guest.first_name, guest.last_name),
        guest_email: guest.email,
        guest_phone: guest.phone,
        special_requests: guest.special_requests,
        status: "confirmed".to_string(),
        deposit_required: false,
        deposit_paid: false,
        created_at: now,
    };

    store.insert_booking(&booking).await?;

    Ok((booking, true))
}
