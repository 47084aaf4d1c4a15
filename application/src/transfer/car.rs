use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    Car, DestructCar, PageNumber, PageSize, SearchTerm, SortKey, UserEmail,
};

#[derive(Debug, Clone)]
pub struct CarDto {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub location: String,
    pub price: i64,
    pub description: String,
    pub added_by: String,
    pub date_added: OffsetDateTime,
    pub rent_count: i32,
}

impl From<Car> for CarDto {
    fn from(value: Car) -> Self {
        let DestructCar {
            id,
            name,
            category,
            location,
            price,
            description,
            added_by,
            date_added,
            rent_count,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            location: location.into(),
            price: price.into(),
            description: description.into(),
            added_by: added_by.into(),
            date_added: date_added.into(),
            rent_count: rent_count.into(),
        }
    }
}

pub struct GetCarDto {
    pub id: Uuid,
}

pub struct GetAllCarsDto {
    pub page: PageNumber,
    pub limit: PageSize,
    pub sort: SortKey,
    pub search: Option<SearchTerm>,
}

pub struct GetMyCarsDto {
    pub owner: UserEmail,
    pub page: PageNumber,
    pub limit: PageSize,
    pub sort: SortKey,
}

pub struct CreateCarDto {
    pub name: String,
    pub category: String,
    pub location: String,
    pub price: i64,
    pub description: String,
    pub added_by: String,
}

pub struct UpdateCarDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
}

pub struct DeleteCarDto {
    pub id: Uuid,
}
