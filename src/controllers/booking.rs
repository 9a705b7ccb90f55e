use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::TimeSlot;
use crate::services::{confirm, holds, slots};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/booking", any(handle_widget_request))
}

/* ---------- request/response bodies ---------- */

#[derive(Debug, Deserialize, Validate)]
struct SearchRequest {
    tenant_id: Uuid,
    date: NaiveDate,
    #[validate(range(min = 1, max = 50, message = "party_size must be between 1 and 50"))]
    party_size: i32,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    slots: Vec<TimeSlot>,
}

#[derive(Debug, Deserialize, Validate)]
struct HoldRequest {
    tenant_id: Uuid,
    time_slot: NaiveDateTime,
    #[validate(range(min = 1, max = 50, message = "party_size must be between 1 and 50"))]
    party_size: i32,
}

#[derive(Debug, Serialize)]
struct HoldResponse {
    success: bool,
    hold_id: Uuid,
    expires_at: NaiveDateTime,
    table_identifiers: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct ConfirmRequest {
    tenant_id: Uuid,
    time_slot: NaiveDateTime,
    #[validate(nested)]
    guest_details: GuestDetailsBody,
    #[validate(range(min = 1, max = 50, message = "party_size must be between 1 and 50"))]
    party_size: i32,
    // Accepted for wire compatibility; de-duplication keys on
    // (tenant, guest email, booking time), not on this value.
    #[allow(dead_code)]
    idempotency_key: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct GuestDetailsBody {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    email: String,
    phone: Option<String>,
    special_requests: Option<String>,
}

#[derive(Debug, Serialize)]
struct ConfirmResponse {
    success: bool,
    reservation_id: Uuid,
    confirmation_number: String,
    status: String,
    summary: ConfirmSummary,
}

#[derive(Debug, Serialize)]
struct ConfirmSummary {
    date: NaiveDate,
    time: String,
    party_size: i32,
    table_info: String,
    deposit_required: bool,
}

/* ---------- dispatch ---------- */

/// Single widget endpoint. POST with an `action` field routes to
/// search/hold/confirm; OPTIONS short-circuits with no body; anything
/// else is rejected. Every outcome uses the uniform envelope.
async fn handle_widget_request(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidPayload(format!("malformed JSON body: {}", e)))?;

    let action = payload
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::InvalidPayload("missing 'action' field".to_string()))?;

    match action {
        "search" => search_slots(&state, payload).await,
        "hold" => create_hold(&state, payload).await,
        "confirm" => confirm_reservation(&state, payload).await,
        other => Err(ApiError::InvalidAction(other.to_string())),
    }
}

fn parse_body<T>(payload: Value) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned + Validate,
{
    let req: T = serde_json::from_value(payload)
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
    req.validate()
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
    Ok(req)
}

/* ---------- handlers ---------- */

async fn search_slots(state: &AppState, payload: Value) -> Result<Response, ApiError> {
    let req: SearchRequest = parse_body(payload)?;

    let tables = state
        .store
        .active_tables(req.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("search: failed to load tables: {:?}", e);
            ApiError::SearchFailed(e)
        })?;
    let bookings = state
        .store
        .bookings_on(req.tenant_id, req.date)
        .await
        .map_err(|e| {
            tracing::error!("search: failed to load bookings: {:?}", e);
            ApiError::SearchFailed(e)
        })?;

    let now = Utc::now().naive_utc();
    let slots = slots::generate_slots(
        &tables,
        &bookings,
        req.party_size,
        req.date,
        now,
        state.revenue.as_ref(),
        &state.config.booking,
    );

    Ok(Json(SearchResponse { success: true, slots }).into_response())
}

async fn create_hold(state: &AppState, payload: Value) -> Result<Response, ApiError> {
    let req: HoldRequest = parse_body(payload)?;

    let now = Utc::now().naive_utc();
    let outcome = holds::create_hold(
        state.store.as_ref(),
        req.tenant_id,
        req.time_slot,
        req.party_size,
        now,
        &state.config.booking,
    )
    .await
    .map_err(|e| {
        tracing::error!("hold: {:?}", e);
        ApiError::HoldFailed(e.to_string())
    })?;

    Ok(Json(HoldResponse {
        success: true,
        hold_id: outcome.hold.id,
        expires_at: outcome.hold.expires_at,
        table_identifiers: outcome.table_identifiers,
    })
    .into_response())
}

async fn confirm_reservation(state: &AppState, payload: Value) -> Result<Response, ApiError> {
    let req: ConfirmRequest = parse_body(payload)?;

    let guest = confirm::GuestDetails {
        first_name: req.guest_details.first_name,
        last_name: req.guest_details.last_name,
        email: req.guest_details.email,
        phone: req.guest_details.phone,
        special_requests: req.guest_details.special_requests,
    };

    let now = Utc::now().naive_utc();
    let (booking, created) = confirm::find_or_create_booking(
        state.store.as_ref(),
        req.tenant_id,
        req.time_slot,
        guest,
        req.party_size,
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("confirm: {:?}", e);
        ApiError::ConfirmationFailed(e)
    })?;

    if !created {
        tracing::info!(
            "confirm: returning existing booking {} for duplicate (tenant, email, time)",
            booking.id
        );
    }

    let confirmation_number = booking.confirmation_number();
    Ok(Json(ConfirmResponse {
        success: true,
        reservation_id: booking.id,
        confirmation_number,
        status: booking.status.clone(),
        summary: ConfirmSummary {
            date: booking.booking_time.date(),
            time: booking.booking_time.format("%H:%M").to_string(),
            party_size: booking.party_size,
            table_info: "Table assigned on arrival".to_string(),
            deposit_required: booking.deposit_required,
        },
    })
    .into_response())
}
