use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateBookingDto, GetBookingsDto, GetRequestsDto, UpdateBookingStatusDto,
};
use kernel::prelude::entity::{BookingStatus, PageNumber, PageSize, SortKey, UserEmail};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    car_id: Uuid,
    booked_by: String,
    total_price: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    status: BookingStatus,
}

/// Renter-side listing, scoped to `booked_by`.
#[derive(Debug)]
pub struct GetBookingsRequest {
    renter: UserEmail,
    query: PageQuery,
}

impl GetBookingsRequest {
    pub fn new(renter: UserEmail, query: PageQuery) -> Self {
        Self { renter, query }
    }
}

/// Owner-side listing of incoming requests, scoped to `added_by`.
#[derive(Debug)]
pub struct GetRequestsRequest {
    owner: UserEmail,
    query: PageQuery,
}

impl GetRequestsRequest {
    pub fn new(owner: UserEmail, query: PageQuery) -> Self {
        Self { owner, query }
    }
}

pub struct Transformer;

impl Intake<GetBookingsRequest> for Transformer {
    type To = GetBookingsDto;
    fn emit(&self, input: GetBookingsRequest) -> Self::To {
        GetBookingsDto {
            renter: input.renter,
            page: PageNumber::lenient(input.query.page.as_deref()),
            limit: PageSize::lenient(input.query.limit.as_deref(), PageSize::BOOKING),
            sort: SortKey::lenient(input.query.sort.as_deref()),
        }
    }
}

impl Intake<GetRequestsRequest> for Transformer {
    type To = GetRequestsDto;
    fn emit(&self, input: GetRequestsRequest) -> Self::To {
        GetRequestsDto {
            owner: input.owner,
            page: PageNumber::lenient(input.query.page.as_deref()),
            limit: PageSize::lenient(input.query.limit.as_deref(), PageSize::BOOKING),
            sort: SortKey::lenient(input.query.sort.as_deref()),
        }
    }
}

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookingDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookingDto {
            car_id: input.car_id,
            booked_by: input.booked_by,
            total_price: input.total_price,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateBookingStatusDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookingStatusDto {
            id,
            status: input.status,
        }
    }
}
