use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub acquire_timeout_seconds: u64,
}

/// Knobs for the slot grid and hold lifetime. Defaults mirror the
/// widget contract: half-hour slots from 12:00 until (exclusive) 21:00,
/// two-hour seatings, 10-minute holds, at most 15 slots per search.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub open_hour: u32,
    pub close_hour: u32,
    pub slot_interval_minutes: u32,
    pub slot_duration_minutes: i64,
    pub hold_ttl_minutes: i64,
    pub max_slots: usize,
    pub avg_spend_per_cover: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "reservation_api=debug,tower_http=debug".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
                pool_size: env::var("DB_POOL_SIZE")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .expect("DB_POOL_SIZE must be a valid number"),
                acquire_timeout_seconds: env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number"),
            },
            booking: BookingConfig::from_env(),
        }
    }
}

impl BookingConfig {
    pub fn from_env() -> Self {
        BookingConfig {
            open_hour: env::var("BOOKING_OPEN_HOUR")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .expect("BOOKING_OPEN_HOUR must be a valid hour"),
            close_hour: env::var("BOOKING_CLOSE_HOUR")
                .unwrap_or_else(|_| "21".to_string())
                .parse()
                .expect("BOOKING_CLOSE_HOUR must be a valid hour"),
            slot_interval_minutes: env::var("BOOKING_SLOT_INTERVAL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("BOOKING_SLOT_INTERVAL_MINUTES must be a valid number"),
            slot_duration_minutes: env::var("BOOKING_SLOT_DURATION_MINUTES")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .expect("BOOKING_SLOT_DURATION_MINUTES must be a valid number"),
            hold_ttl_minutes: env::var("BOOKING_HOLD_TTL_MINUTES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("BOOKING_HOLD_TTL_MINUTES must be a valid number"),
            max_slots: env::var("BOOKING_MAX_SLOTS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("BOOKING_MAX_SLOTS must be a valid number"),
            avg_spend_per_cover: env::var("BOOKING_AVG_SPEND_PER_COVER")
                .unwrap_or_else(|_| "32.5".to_string())
                .parse()
                .expect("BOOKING_AVG_SPEND_PER_COVER must be a valid number"),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            open_hour: 12,
            close_hour: 21,
            slot_interval_minutes: 30,
            slot_duration_minutes: 120,
            hold_ttl_minutes: 10,
            max_slots: 15,
            avg_spend_per_cover: 32.5,
        }
    }
}
