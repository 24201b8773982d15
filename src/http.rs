use crate::availability::AvailabilityStore;
use crate::backend::StorageBackend;
use crate::bookings::BookingStore;
use crate::configuration::Configuration;
use crate::engine::BookingEngine;
use crate::error::BookingError;
use crate::format;
use crate::types::{Booking, Slot};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRequest {
    date: String,
    start_time: String,
    end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PublishRequest {
    slots: Vec<SlotRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PublishResponse {
    token: String,
    share_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingRequest {
    date: Option<String>,
    time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DateOption {
    date: String,
    display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TimeOption {
    time: String,
    display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingPageResponse {
    dates: Vec<DateOption>,
    bookings: Vec<Booking>,
}

pub fn create_app<S: StorageBackend, C: Configuration>(storage: S, configuration: C) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        availability: AvailabilityStore::new(storage.clone()),
        bookings: BookingStore::new(storage),
        share_origin: configuration.share_origin(),
    };

    Router::new()
        .route("/availability", post(publish_availability))
        .route("/book/:token", get(get_booking_page).post(book_slot))
        .route("/book/:token/times/:date", get(get_time_slots))
        .route("/book/:token/clear", post(clear_bookings))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
}

fn error_response(err: BookingError) -> (StatusCode, String) {
    let status = match err {
        BookingError::NotFound => StatusCode::NOT_FOUND,
        BookingError::AlreadyBooked => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

fn parse_slot(request: &SlotRequest) -> Result<Slot, BookingError> {
    let date = format::parse_date(&request.date)?;
    if !format::is_future_or_today(date) {
        return Err(BookingError::DateInPast);
    }
    let start_time = format::parse_time(&request.start_time)?;
    let end_time = format::parse_time(&request.end_time)?;
    Slot::new(date, start_time, end_time)
}

async fn publish_availability<S: StorageBackend>(
    State(state): State<AppState<S>>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, (StatusCode, String)> {
    let mut slots = Vec::new();
    for entry in &request.slots {
        slots.push(parse_slot(entry).map_err(error_response)?);
    }

    let token = state.availability.publish(slots).map_err(error_response)?;
    let share_link = format!("{}/book/{}", state.share_origin, token);
    info!(%token, "Availability published");

    Ok(Json(PublishResponse { token, share_link }))
}

async fn get_booking_page<S: StorageBackend>(
    State(state): State<AppState<S>>,
    Path(token): Path<String>,
) -> Result<Json<BookingPageResponse>, (StatusCode, String)> {
    let engine = BookingEngine::open(state.availability.clone(), state.bookings.clone(), &token)
        .map_err(error_response)?;

    let dates = engine
        .offerable_dates()
        .into_iter()
        .map(|date| DateOption {
            date: date.to_string(),
            display: format::format_date(date),
        })
        .collect();
    let bookings = state.bookings.read_all(&token);

    Ok(Json(BookingPageResponse { dates, bookings }))
}

async fn get_time_slots<S: StorageBackend>(
    State(state): State<AppState<S>>,
    Path((token, date)): Path<(String, String)>,
) -> Result<Json<Vec<TimeOption>>, (StatusCode, String)> {
    let engine = BookingEngine::open(state.availability.clone(), state.bookings.clone(), &token)
        .map_err(error_response)?;
    let date = format::parse_date(&date).map_err(error_response)?;

    let times = engine
        .offerable_times(date)
        .into_iter()
        .map(|time| TimeOption {
            time: time.format("%H:%M").to_string(),
            display: format::format_time(time),
        })
        .collect();

    Ok(Json(times))
}

async fn book_slot<S: StorageBackend>(
    State(state): State<AppState<S>>,
    Path(token): Path<String>,
    Json(request): Json<BookingRequest>,
) -> (StatusCode, String) {
    let mut engine =
        match BookingEngine::open(state.availability.clone(), state.bookings.clone(), &token) {
            Ok(engine) => engine,
            Err(err) => return error_response(err),
        };

    let result = (|| {
        let date = request.date.as_deref().ok_or(BookingError::MissingSelection)?;
        let time = request.time.as_deref().ok_or(BookingError::MissingSelection)?;
        let date = format::parse_date(date)?;
        let time = format::parse_time(time)?;
        engine.select_date(date)?;
        engine.select_time(time)?;
        engine.confirm_booking()
    })();

    match result {
        Ok(booking) => {
            info!(%token, "Slot booked");
            (
                StatusCode::OK,
                format!(
                    "Booked {} at {}",
                    format::format_date(booking.date),
                    format::format_time(booking.time)
                ),
            )
        }
        Err(err) => error_response(err),
    }
}

async fn clear_bookings<S: StorageBackend>(
    State(state): State<AppState<S>>,
    Path(token): Path<String>,
) -> (StatusCode, String) {
    state.bookings.clear(&token);
    (StatusCode::OK, "All bookings cleared".to_string())
}

async fn not_found() -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        BookingError::NotFound.to_string(),
    )
}
