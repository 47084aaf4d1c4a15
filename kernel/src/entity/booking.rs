mod id;
mod status;

pub use self::{id::*, status::*};
use crate::entity::car::CarId;
use crate::entity::common::{CreatedAt, Price, UserEmail};

/// A reservation of a listing by a renter. `car_id` is a weak reference: it
/// is carried as opaque data and never dereferenced when listing bookings.
/// `added_by` duplicates the listing owner at booking time so owner-side
/// queries need no join. Bookings are never deleted; only `status` moves.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Booking {
    id: BookingId,
    car_id: CarId,
    booked_by: UserEmail,
    added_by: UserEmail,
    total_price: Price,
    date_booked: CreatedAt<Booking>,
    status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: BookingId,
        car_id: CarId,
        booked_by: UserEmail,
        added_by: UserEmail,
        total_price: Price,
        date_booked: CreatedAt<Booking>,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            car_id,
            booked_by,
            added_by,
            total_price,
            date_booked,
            status,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn car_id(&self) -> &CarId {
        &self.car_id
    }

    pub fn booked_by(&self) -> &UserEmail {
        &self.booked_by
    }

    pub fn added_by(&self) -> &UserEmail {
        &self.added_by
    }

    pub fn total_price(&self) -> &Price {
        &self.total_price
    }

    pub fn date_booked(&self) -> &CreatedAt<Booking> {
        &self.date_booked
    }

    pub fn status(&self) -> &BookingStatus {
        &self.status
    }

    pub fn into_destruct(self) -> DestructBooking {
        DestructBooking {
            id: self.id,
            car_id: self.car_id,
            booked_by: self.booked_by,
            added_by: self.added_by,
            total_price: self.total_price,
            date_booked: self.date_booked,
            status: self.status,
        }
    }

    pub fn reconstruct(self, f: impl FnOnce(&mut DestructBooking)) -> Self {
        let mut destruct = self.into_destruct();
        f(&mut destruct);
        destruct.freeze()
    }
}

pub struct DestructBooking {
    pub id: BookingId,
    pub car_id: CarId,
    pub booked_by: UserEmail,
    pub added_by: UserEmail,
    pub total_price: Price,
    pub date_booked: CreatedAt<Booking>,
    pub status: BookingStatus,
}

impl DestructBooking {
    pub fn freeze(self) -> Booking {
        Booking {
            id: self.id,
            car_id: self.car_id,
            booked_by: self.booked_by,
            added_by: self.added_by,
            total_price: self.total_price,
            date_booked: self.date_booked,
            status: self.status,
        }
    }
}
