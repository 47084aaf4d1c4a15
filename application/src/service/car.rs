use uuid::Uuid;

use kernel::interface::database::{DependOnDatabaseConnection, QueryDatabaseConnection};
use kernel::interface::query::{CarFilter, CarQuery, DependOnCarQuery};
use kernel::interface::update::{CarModifier, DependOnCarModifier};
use kernel::prelude::entity::{
    Car, CarCategory, CarId, CarName, CreatedAt, Description, Location, PageSize, PageWindow,
    Paged, Price, RentCount, SortKey, UserEmail,
};
use kernel::KernelError;

use crate::transfer::{
    CarDto, CreateCarDto, DeleteCarDto, GetAllCarsDto, GetCarDto, GetMyCarsDto, UpdateCarDto,
};

/// Shared resolver body for every paginated listing read: count the filtered
/// set, fetch one bounded page of it, assemble the envelope. The two reads
/// are deliberately not transactional with respect to each other; a write
/// landing between them can skew `total_count` against the page and that is
/// accepted.
async fn resolve_cars<Connection, Query>(
    query: &Query,
    con: &mut Connection,
    filter: CarFilter,
    sort: SortKey,
    window: PageWindow,
) -> error_stack::Result<Paged<CarDto>, KernelError>
where
    Connection: Send,
    Query: CarQuery<Connection>,
{
    let total_count = query.count(con, &filter).await?;
    let cars = query.find_page(con, &filter, sort, &window).await?;
    Ok(Paged::assemble(cars, total_count, &window).map(CarDto::from))
}

#[async_trait::async_trait]
pub trait GetCarService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnCarQuery<Connection>
{
    async fn get_car(&self, dto: GetCarDto) -> error_stack::Result<Option<CarDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let id = CarId::new(dto.id);
        let found = self.car_query().find_by_id(&mut con, &id).await?;
        Ok(found.map(CarDto::from))
    }

    async fn get_all_cars(
        &self,
        dto: GetAllCarsDto,
    ) -> error_stack::Result<Paged<CarDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let filter = CarFilter::new(None, dto.search);
        let window = PageWindow::new(dto.page, dto.limit);
        resolve_cars(self.car_query(), &mut con, filter, dto.sort, window).await
    }

    async fn get_my_cars(
        &self,
        dto: GetMyCarsDto,
    ) -> error_stack::Result<Paged<CarDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let filter = CarFilter::owned_by(dto.owner);
        let window = PageWindow::new(dto.page, dto.limit);
        resolve_cars(self.car_query(), &mut con, filter, dto.sort, window).await
    }

    async fn get_recent_cars(&self) -> error_stack::Result<Vec<CarDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let cars = self
            .car_query()
            .find_recent(&mut con, PageSize::new(8u32))
            .await?;
        Ok(cars.into_iter().map(CarDto::from).collect())
    }
}

impl<Connection: 'static + Send, T> GetCarService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnCarQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateCarService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnCarModifier<Connection>
{
    async fn create_car(&self, dto: CreateCarDto) -> error_stack::Result<Uuid, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let id = Uuid::new_v4();
        let car = Car::new(
            CarId::new(id),
            CarName::new(dto.name),
            CarCategory::new(dto.category),
            Location::new(dto.location),
            Price::new(dto.price),
            Description::new(dto.description),
            UserEmail::new(dto.added_by),
            CreatedAt::now(),
            RentCount::default(),
        );
        self.car_modifier().create(&mut con, &car).await?;

        Ok(id)
    }
}

impl<Connection: 'static + Send, T> CreateCarService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnCarModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateCarService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnCarQuery<Connection>
    + DependOnCarModifier<Connection>
{
    async fn update_car(&self, dto: UpdateCarDto) -> error_stack::Result<Option<()>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let id = CarId::new(dto.id);
        let Some(car) = self.car_query().find_by_id(&mut con, &id).await? else {
            return Ok(None);
        };
        let car = car.reconstruct(|c| {
            if let Some(name) = dto.name {
                c.name = CarName::new(name);
            }
            if let Some(category) = dto.category {
                c.category = CarCategory::new(category);
            }
            if let Some(location) = dto.location {
                c.location = Location::new(location);
            }
            if let Some(price) = dto.price {
                c.price = Price::new(price);
            }
            if let Some(description) = dto.description {
                c.description = Description::new(description);
            }
        });
        self.car_modifier().update(&mut con, &car).await?;

        Ok(Some(()))
    }
}

impl<Connection: 'static + Send, T> UpdateCarService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnCarQuery<Connection>
        + DependOnCarModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteCarService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnCarModifier<Connection>
{
    async fn delete_car(&self, dto: DeleteCarDto) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;
        let id = CarId::new(dto.id);
        self.car_modifier().delete(&mut con, &id).await?;
        Ok(())
    }
}

impl<Connection: 'static + Send, T> DeleteCarService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnCarModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{PageNumber, PageSize, SearchTerm, SortKey};
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::service::{CreateCarService, GetCarService, UpdateCarService};
    use crate::testing::MemoryDatabase;
    use crate::transfer::{CreateCarDto, GetAllCarsDto, GetCarDto, GetMyCarsDto, UpdateCarDto};

    fn listing(name: &str, price: i64, owner: &str) -> CreateCarDto {
        CreateCarDto {
            name: name.to_string(),
            category: "SUV".to_string(),
            location: "Dhaka".to_string(),
            price,
            description: String::new(),
            added_by: owner.to_string(),
        }
    }

    fn page_one(limit: u32, sort: SortKey, search: Option<&str>) -> GetAllCarsDto {
        GetAllCarsDto {
            page: PageNumber::new(1u32),
            limit: PageSize::new(limit),
            sort,
            search: search.and_then(SearchTerm::new),
        }
    }

    async fn seed_seven(db: &MemoryDatabase) {
        // Creation order is the recency order: car-7 is the newest.
        for n in 1..=7 {
            db.create_car(listing(&format!("car-{n}"), n * 100, "owner@example.com"))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn seven_listings_three_per_page() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        seed_seven(&db).await;

        let page = db.get_all_cars(page_one(3, SortKey::Newest, None)).await?;
        assert_eq!(page.total_count(), 7);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(u32::from(page.current_page()), 1);
        let names: Vec<_> = page.items().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["car-7", "car-6", "car-5"]);

        let last = db
            .get_all_cars(GetAllCarsDto {
                page: PageNumber::new(3u32),
                ..page_one(3, SortKey::Newest, None)
            })
            .await?;
        assert_eq!(last.items().len(), 1);
        assert_eq!(last.items()[0].name, "car-1");
        Ok(())
    }

    #[tokio::test]
    async fn page_beyond_the_end_is_empty_not_an_error() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        seed_seven(&db).await;

        let page = db
            .get_all_cars(GetAllCarsDto {
                page: PageNumber::new(9u32),
                ..page_one(3, SortKey::Newest, None)
            })
            .await?;
        assert!(page.items().is_empty());
        assert_eq!(page.total_count(), 7);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(u32::from(page.current_page()), 9);
        Ok(())
    }

    #[tokio::test]
    async fn empty_result_has_zero_pages() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let page = db.get_all_cars(page_one(3, SortKey::Newest, None)).await?;
        assert!(page.items().is_empty());
        assert_eq!(page.total_count(), 0);
        assert_eq!(page.total_pages(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn newest_and_oldest_are_reverse_orderings() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        seed_seven(&db).await;

        let newest = db.get_all_cars(page_one(7, SortKey::Newest, None)).await?;
        let oldest = db.get_all_cars(page_one(7, SortKey::Oldest, None)).await?;
        let mut reversed: Vec<_> = oldest.items().iter().map(|c| c.name.clone()).collect();
        reversed.reverse();
        let forward: Vec<_> = newest.items().iter().map(|c| c.name.clone()).collect();
        assert_eq!(forward, reversed);
        Ok(())
    }

    #[tokio::test]
    async fn price_sorts_are_reverse_orderings() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        seed_seven(&db).await;

        let low = db.get_all_cars(page_one(7, SortKey::PriceLow, None)).await?;
        let high = db
            .get_all_cars(page_one(7, SortKey::PriceHigh, None))
            .await?;
        let prices_low: Vec<_> = low.items().iter().map(|c| c.price).collect();
        let mut prices_high: Vec<_> = high.items().iter().map(|c| c.price).collect();
        prices_high.reverse();
        assert_eq!(prices_low, prices_high);
        assert!(prices_low.windows(2).all(|w| w[0] <= w[1]));
        Ok(())
    }

    #[tokio::test]
    async fn blank_search_equals_no_search() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        seed_seven(&db).await;

        let plain = db.get_all_cars(page_one(7, SortKey::Newest, None)).await?;
        let blank = db
            .get_all_cars(page_one(7, SortKey::Newest, Some("   ")))
            .await?;
        let a: Vec<_> = plain.items().iter().map(|c| c.id).collect();
        let b: Vec<_> = blank.items().iter().map(|c| c.id).collect();
        assert_eq!(a, b);
        assert_eq!(plain.total_count(), blank.total_count());
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        db.create_car(listing("Toyota Premio", 100, "a@example.com"))
            .await
            .unwrap();
        db.create_car(listing("Honda Civic", 200, "a@example.com"))
            .await
            .unwrap();

        let page = db
            .get_all_cars(page_one(7, SortKey::Newest, Some("premio")))
            .await?;
        assert_eq!(page.total_count(), 1);
        assert_eq!(page.items()[0].name, "Toyota Premio");

        // Category matches too: both seeded listings are SUVs.
        let by_category = db
            .get_all_cars(page_one(7, SortKey::Newest, Some("suv")))
            .await?;
        assert_eq!(by_category.total_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn my_cars_only_sees_the_owner_scope() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        db.create_car(listing("mine", 100, "me@example.com"))
            .await
            .unwrap();
        db.create_car(listing("theirs", 200, "other@example.com"))
            .await
            .unwrap();

        let page = db
            .get_my_cars(GetMyCarsDto {
                owner: kernel::prelude::entity::UserEmail::new("me@example.com"),
                page: PageNumber::new(1u32),
                limit: PageSize::LISTING,
                sort: SortKey::Newest,
            })
            .await?;
        assert_eq!(page.total_count(), 1);
        assert_eq!(page.items()[0].name, "mine");
        Ok(())
    }

    #[tokio::test]
    async fn update_touches_only_submitted_fields() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let id = db
            .create_car(listing("before", 100, "me@example.com"))
            .await?;

        let updated = db
            .update_car(UpdateCarDto {
                id,
                name: Some("after".to_string()),
                category: None,
                location: None,
                price: Some(250),
                description: None,
            })
            .await?;
        assert_eq!(updated, Some(()));

        let car = db.get_car(GetCarDto { id }).await?.unwrap();
        assert_eq!(car.name, "after");
        assert_eq!(car.price, 250);
        assert_eq!(car.category, "SUV");
        assert_eq!(car.added_by, "me@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_car_is_none() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let updated = db
            .update_car(UpdateCarDto {
                id: Uuid::new_v4(),
                name: Some("ghost".to_string()),
                category: None,
                location: None,
                price: None,
                description: None,
            })
            .await?;
        assert_eq!(updated, None);
        Ok(())
    }
}
