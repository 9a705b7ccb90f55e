use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::config::BookingConfig;
use crate::models::{Booking, DiningTable, TimeSlot};

/// Projected takings for a party seated at a given instant. Injected so
/// tests can pin a fixed scorer and so a real analytics model can be
/// swapped in without touching the generator.
pub trait RevenueModel: Send + Sync {
    fn project(&self, slot_time: NaiveDateTime, party_size: i32) -> f64;
}

/// Default scorer: average spend per cover times covers, with a flat
/// uplift during the dinner peak. Deterministic, unlike the placeholder
/// it replaces.
pub struct PerCoverRevenueModel {
    pub avg_spend_per_cover: f64,
}

const PEAK_UPLIFT: f64 = 1.25;

impl RevenueModel for PerCoverRevenueModel {
    fn project(&self, slot_time: NaiveDateTime, party_size: i32) -> f64 {
        let base = self.avg_spend_per_cover * party_size as f64;
        if is_peak_hour(slot_time) {
            base * PEAK_UPLIFT
        } else {
            base
        }
    }
}

fn is_peak_hour(time: NaiveDateTime) -> bool {
    matches!(time.hour(), 18 | 19)
}

/// Enumerates candidate reservation slots for one tenant-day.
///
/// Walks every `slot_interval_minutes` boundary from `open_hour` up to
/// (exclusive) `close_hour`, keeps instants strictly in the future, and
/// counts how many suitable tables remain once bookings overlapping the
/// two-hour seating window are subtracted. Slots with no remaining
/// table are dropped; output is chronological and capped at
/// `max_slots`.
///
/// The available count is advisory: nothing re-checks it atomically at
/// confirm time.
pub fn generate_slots(
    tables: &[DiningTable],
    bookings: &[Booking],
    party_size: i32,
    date: NaiveDate,
    now: NaiveDateTime,
    revenue: &dyn RevenueModel,
    cfg: &BookingConfig,
) -> Vec<TimeSlot> {
    let suitable = tables
        .iter()
        .filter(|t| t.capacity >= party_size)
        .count() as i64;

    let mut slots = Vec::new();
    let mut minutes = cfg.open_hour * 60;
    let close_minutes = cfg.close_hour * 60;

    while minutes < close_minutes && slots.len() < cfg.max_slots {
        let slot_time = date
            .and_hms_opt(minutes / 60, minutes % 60, 0)
            .expect("slot grid stays within a day");
        minutes += cfg.slot_interval_minutes;

        if slot_time <= now {
            continue;
        }

        let slot_end = slot_time + Duration::minutes(cfg.slot_duration_minutes);
        let overlapping = bookings
            .iter()
            .filter(|b| b.booking_time < slot_end && b.end_time() > slot_time)
            .count() as i64;

        let available = suitable - overlapping;
        if available > 0 {
            slots.push(TimeSlot {
                time: slot_time,
                available_tables: available,
                projected_revenue: revenue.project(slot_time, party_size),
                optimal: is_peak_hour(slot_time),
            });
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn table(tenant: Uuid, capacity: i32) -> DiningTable {
        DiningTable {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            name: format!("T{}", capacity),
            capacity,
            active: true,
        }
    }

    fn booking_at(tenant: Uuid, time: NaiveDateTime) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            booking_time: time,
            duration_minutes: 120,
            party_size: 2,
            guest_name: "Ada Guest".to_string(),
            guest_email: "ada@example.com".to_string(),
            guest_phone: None,
            special_requests: None,
            status: "confirmed".to_string(),
            deposit_required: false,
            deposit_paid: false,
            created_at: time,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    /// `now` well before the day starts, so no slot is filtered as past.
    fn early_now() -> NaiveDateTime {
        day().pred_opt().unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn scorer() -> PerCoverRevenueModel {
        PerCoverRevenueModel { avg_spend_per_cover: 32.5 }
    }

    #[test]
    fn full_grid_for_an_open_day() {
        let tenant = Uuid::new_v4();
        let tables = vec![table(tenant, 4)];
        let cfg = BookingConfig::default();

        let slots = generate_slots(&tables, &[], 4, day(), early_now(), &scorer(), &cfg);

        // 12:00 through 20:30 is 18 half-hour boundaries, capped at 15.
        assert_eq!(slots.len(), 15);
        assert_eq!(slots[0].time, day().and_hms_opt(12, 0, 0).unwrap());
        assert!(slots.iter().all(|s| s.available_tables == 1));
        assert!(slots.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn no_slot_at_or_before_now() {
        let tenant = Uuid::new_v4();
        let tables = vec![table(tenant, 4)];
        let cfg = BookingConfig::default();
        let now = day().and_hms_opt(18, 0, 0).unwrap();

        let slots = generate_slots(&tables, &[], 2, day(), now, &scorer(), &cfg);

        assert!(slots.iter().all(|s| s.time > now));
        // 18:00 itself is not strictly in the future.
        assert_eq!(slots[0].time, day().and_hms_opt(18, 30, 0).unwrap());
    }

    #[test]
    fn undersized_tables_never_count() {
        let tenant = Uuid::new_v4();
        let tables = vec![table(tenant, 2), table(tenant, 2)];
        let cfg = BookingConfig::default();

        let slots = generate_slots(&tables, &[], 4, day(), early_now(), &scorer(), &cfg);

        assert!(slots.is_empty());
    }

    #[test]
    fn overlapping_booking_blocks_the_window() {
        let tenant = Uuid::new_v4();
        let tables = vec![table(tenant, 4)];
        let cfg = BookingConfig::default();
        // One booking 18:00-20:00 against a single table.
        let bookings = vec![booking_at(tenant, day().and_hms_opt(18, 0, 0).unwrap())];

        let slots = generate_slots(&tables, &bookings, 4, day(), early_now(), &scorer(), &cfg);

        // Any slot whose two-hour window intersects 18:00-20:00 is gone:
        // 16:30 through 19:30 inclusive.
        let blocked_from = day().and_hms_opt(16, 30, 0).unwrap();
        let blocked_to = day().and_hms_opt(19, 30, 0).unwrap();
        assert!(slots
            .iter()
            .all(|s| s.time < blocked_from || s.time > blocked_to));
        // 16:00 (ends exactly at 18:00) and 20:00 (starts at booking end)
        // do not overlap the half-open interval.
        assert!(slots.iter().any(|s| s.time == day().and_hms_opt(16, 0, 0).unwrap()));
        assert!(slots.iter().any(|s| s.time == day().and_hms_opt(20, 0, 0).unwrap()));
    }

    #[test]
    fn dinner_peak_is_flagged_optimal() {
        let tenant = Uuid::new_v4();
        let tables = vec![table(tenant, 6)];
        let cfg = BookingConfig::default();

        let slots = generate_slots(&tables, &[], 2, day(), early_now(), &scorer(), &cfg);

        for slot in &slots {
            let hour = slot.time.hour();
            assert_eq!(slot.optimal, hour == 18 || hour == 19, "at {}", slot.time);
        }
    }

    #[test]
    fn revenue_model_is_deterministic() {
        let model = scorer();
        let off_peak = day().and_hms_opt(13, 0, 0).unwrap();
        let peak = day().and_hms_opt(19, 0, 0).unwrap();

        assert_eq!(model.project(off_peak, 4), 130.0);
        assert_eq!(model.project(peak, 4), 162.5);
        assert_eq!(model.project(peak, 4), model.project(peak, 4));
    }
}
