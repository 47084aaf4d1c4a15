use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    Booking, BookingStatus, DestructBooking, PageNumber, PageSize, SortKey, UserEmail,
};

#[derive(Debug, Clone)]
pub struct BookingDto {
    pub id: Uuid,
    pub car_id: Uuid,
    pub booked_by: String,
    pub added_by: String,
    pub total_price: i64,
    pub date_booked: OffsetDateTime,
    pub status: BookingStatus,
}

impl From<Booking> for BookingDto {
    fn from(value: Booking) -> Self {
        let DestructBooking {
            id,
            car_id,
            booked_by,
            added_by,
            total_price,
            date_booked,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            car_id: car_id.into(),
            booked_by: booked_by.into(),
            added_by: added_by.into(),
            total_price: total_price.into(),
            date_booked: date_booked.into(),
            status,
        }
    }
}

pub struct GetBookingsDto {
    pub renter: UserEmail,
    pub page: PageNumber,
    pub limit: PageSize,
    pub sort: SortKey,
}

pub struct GetRequestsDto {
    pub owner: UserEmail,
    pub page: PageNumber,
    pub limit: PageSize,
    pub sort: SortKey,
}

pub struct CreateBookingDto {
    pub car_id: Uuid,
    pub booked_by: String,
    pub total_price: i64,
}

pub struct UpdateBookingStatusDto {
    pub id: Uuid,
    pub status: BookingStatus,
}
