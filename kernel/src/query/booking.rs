use crate::entity::{Booking, BookingId, PageWindow, SortKey, UserEmail};
use crate::KernelError;

/// Ownership scope for bookings. Renter-side endpoints filter on `booked_by`,
/// owner-side request listings on `added_by`. Bookings have no text search.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    booked_by: Option<UserEmail>,
    added_by: Option<UserEmail>,
}

impl BookingFilter {
    pub fn by_renter(renter: UserEmail) -> Self {
        Self {
            booked_by: Some(renter),
            added_by: None,
        }
    }

    pub fn by_owner(owner: UserEmail) -> Self {
        Self {
            booked_by: None,
            added_by: Some(owner),
        }
    }

    pub fn booked_by(&self) -> Option<&UserEmail> {
        self.booked_by.as_ref()
    }

    pub fn added_by(&self) -> Option<&UserEmail> {
        self.added_by.as_ref()
    }
}

#[async_trait::async_trait]
pub trait BookingQuery<Connection: Send>: 'static + Sync + Send {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;

    async fn count(
        &self,
        con: &mut Connection,
        filter: &BookingFilter,
    ) -> error_stack::Result<i64, KernelError>;

    async fn find_page(
        &self,
        con: &mut Connection,
        filter: &BookingFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;
}

pub trait DependOnBookingQuery<Connection: Send>: 'static + Sync + Send {
    type BookingQuery: BookingQuery<Connection>;
    fn booking_query(&self) -> &Self::BookingQuery;
}
