use crate::entity::{Booking, BookingId, BookingStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingModifier<Connection: Send>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError>;

    async fn update_status(
        &self,
        con: &mut Connection,
        id: &BookingId,
        status: BookingStatus,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookingModifier<Connection: Send>: 'static + Sync + Send {
    type BookingModifier: BookingModifier<Connection>;
    fn booking_modifier(&self) -> &Self::BookingModifier;
}
