mod category;
mod description;
mod id;
mod location;
mod name;
mod rent_count;

pub use self::{category::*, description::*, id::*, location::*, name::*, rent_count::*};
use crate::entity::common::{CreatedAt, Price, UserEmail};

/// A rentable vehicle listing. `date_added`, `added_by` and `rent_count` are
/// never touched by owner updates; the counter moves only through the booking
/// flow.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Car {
    id: CarId,
    name: CarName,
    category: CarCategory,
    location: Location,
    price: Price,
    description: Description,
    added_by: UserEmail,
    date_added: CreatedAt<Car>,
    rent_count: RentCount,
}

impl Car {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CarId,
        name: CarName,
        category: CarCategory,
        location: Location,
        price: Price,
        description: Description,
        added_by: UserEmail,
        date_added: CreatedAt<Car>,
        rent_count: RentCount,
    ) -> Self {
        Self {
            id,
            name,
            category,
            location,
            price,
            description,
            added_by,
            date_added,
            rent_count,
        }
    }

    pub fn id(&self) -> &CarId {
        &self.id
    }

    pub fn name(&self) -> &CarName {
        &self.name
    }

    pub fn category(&self) -> &CarCategory {
        &self.category
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn added_by(&self) -> &UserEmail {
        &self.added_by
    }

    pub fn date_added(&self) -> &CreatedAt<Car> {
        &self.date_added
    }

    pub fn rent_count(&self) -> &RentCount {
        &self.rent_count
    }

    pub fn into_destruct(self) -> DestructCar {
        DestructCar {
            id: self.id,
            name: self.name,
            category: self.category,
            location: self.location,
            price: self.price,
            description: self.description,
            added_by: self.added_by,
            date_added: self.date_added,
            rent_count: self.rent_count,
        }
    }

    pub fn reconstruct(self, f: impl FnOnce(&mut DestructCar)) -> Self {
        let mut destruct = self.into_destruct();
        f(&mut destruct);
        destruct.freeze()
    }
}

pub struct DestructCar {
    pub id: CarId,
    pub name: CarName,
    pub category: CarCategory,
    pub location: Location,
    pub price: Price,
    pub description: Description,
    pub added_by: UserEmail,
    pub date_added: CreatedAt<Car>,
    pub rent_count: RentCount,
}

impl DestructCar {
    pub fn freeze(self) -> Car {
        Car {
            id: self.id,
            name: self.name,
            category: self.category,
            location: self.location,
            price: self.price,
            description: self.description,
            added_by: self.added_by,
            date_added: self.date_added,
            rent_count: self.rent_count,
        }
    }
}
