use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::CarDto;
use kernel::prelude::entity::Paged;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    id: Uuid,
    name: String,
    #[serde(rename = "type")]
    category: String,
    location: String,
    price: i64,
    description: String,
    added_by: String,
    #[serde(with = "time::serde::rfc3339")]
    date_added: OffsetDateTime,
    rent_count: i32,
}

impl From<CarDto> for CarResponse {
    fn from(value: CarDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            location: value.location,
            price: value.price,
            description: value.description,
            added_by: value.added_by,
            date_added: value.date_added,
            rent_count: value.rent_count,
        }
    }
}

impl IntoResponse for CarResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
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

/// Envelope shared by every paginated listing read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPageResponse {
    success: bool,
    items: Vec<CarResponse>,
    total_count: i64,
    total_pages: i64,
    current_page: u32,
}

impl IntoResponse for CarPageResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Paged<CarDto>> for Presenter {
    type To = CarPageResponse;
    fn emit(&self, input: Paged<CarDto>) -> Self::To {
        let total_count = input.total_count();
        let total_pages = input.total_pages();
        let current_page = u32::from(input.current_page());
        CarPageResponse {
            success: true,
            items: input
                .into_items()
                .into_iter()
                .map(CarResponse::from)
                .collect(),
            total_count,
            total_pages,
            current_page,
        }
    }
}

impl Exhaust<Uuid> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse { id: input }
    }
}

impl Exhaust<Option<CarDto>> for Presenter {
    type To = Option<CarResponse>;
    fn emit(&self, input: Option<CarDto>) -> Self::To {
        input.map(CarResponse::from)
    }
}

impl Exhaust<Vec<CarDto>> for Presenter {
    type To = Json<Vec<CarResponse>>;
    fn emit(&self, input: Vec<CarDto>) -> Self::To {
        Json::from(input.into_iter().map(CarResponse::from).collect::<Vec<_>>())
    }
}

impl Exhaust<Option<()>> for Presenter {
    type To = Option<StatusCode>;
    fn emit(&self, input: Option<()>) -> Self::To {
        input.map(|()| StatusCode::NO_CONTENT)
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
