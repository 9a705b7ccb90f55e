use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A candidate reservation instant, computed fresh per search request
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: NaiveDateTime,
    pub available_tables: i64,
    pub projected_revenue: f64,
    pub optimal: bool,
}
