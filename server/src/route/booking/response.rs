use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::BookingDto;
use kernel::prelude::entity::{BookingStatus, Paged};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    id: Uuid,
    car_id: Uuid,
    booked_by: String,
    added_by: String,
    total_price: i64,
    #[serde(with = "time::serde::rfc3339")]
    date_booked: OffsetDateTime,
    status: BookingStatus,
}

impl From<BookingDto> for BookingResponse {
    fn from(value: BookingDto) -> Self {
        Self {
            id: value.id,
            car_id: value.car_id,
            booked_by: value.booked_by,
            added_by: value.added_by,
            total_price: value.total_price,
            date_booked: value.date_booked,
            status: value.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPageResponse {
    success: bool,
    items: Vec<BookingResponse>,
    total_count: i64,
    total_pages: i64,
    current_page: u32,
}

impl IntoResponse for BookingPageResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Paged<BookingDto>> for Presenter {
    type To = BookingPageResponse;
    fn emit(&self, input: Paged<BookingDto>) -> Self::To {
        let total_count = input.total_count();
        let total_pages = input.total_pages();
        let current_page = u32::from(input.current_page());
        BookingPageResponse {
            success: true,
            items: input
                .into_items()
                .into_iter()
                .map(BookingResponse::from)
                .collect(),
            total_count,
            total_pages,
            current_page,
        }
    }
}

impl Exhaust<Option<Uuid>> for Presenter {
    type To = Option<CreatedResponse>;
    fn emit(&self, input: Option<Uuid>) -> Self::To {
        input.map(|id| CreatedResponse { id })
    }
}

impl Exhaust<Option<()>> for Presenter {
    type To = Option<StatusCode>;
    fn emit(&self, input: Option<()>) -> Self::To {
        input.map(|()| StatusCode::NO_CONTENT)
    }
}
