use crate::entity::{Car, CarId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CarModifier<Connection: Send>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        car: &Car,
    ) -> error_stack::Result<(), KernelError>;

    /// Owner-editable fields only; `added_by`, `date_added` and `rent_count`
    /// stay as stored.
    async fn update(
        &self,
        con: &mut Connection,
        car: &Car,
    ) -> error_stack::Result<(), KernelError>;

    async fn delete(
        &self,
        con: &mut Connection,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError>;

    /// Single-step counter bump used by the booking flow, exactly once per
    /// inserted booking.
    async fn increment_rent_count(
        &self,
        con: &mut Connection,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCarModifier<Connection: Send>: 'static + Sync + Send {
    type CarModifier: CarModifier<Connection>;
    fn car_modifier(&self) -> &Self::CarModifier;
}
