use uuid::Uuid;

use kernel::interface::database::{DependOnDatabaseConnection, QueryDatabaseConnection};
use kernel::interface::query::{
    BookingFilter, BookingQuery, CarQuery, DependOnBookingQuery, DependOnCarQuery,
};
use kernel::interface::update::{
    BookingModifier, CarModifier, DependOnBookingModifier, DependOnCarModifier,
};
use kernel::prelude::entity::{
    Booking, BookingId, BookingStatus, CarId, CreatedAt, PageWindow, Paged, Price, UserEmail,
};
use kernel::KernelError;

use crate::transfer::{
    BookingDto, CreateBookingDto, GetBookingsDto, GetRequestsDto, UpdateBookingStatusDto,
};

#[async_trait::async_trait]
pub trait GetBookingService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookingQuery<Connection>
{
    async fn get_bookings(
        &self,
        dto: GetBookingsDto,
    ) -> error_stack::Result<Paged<BookingDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let filter = BookingFilter::by_renter(dto.renter);
        let window = PageWindow::new(dto.page, dto.limit);
        let total_count = self.booking_query().count(&mut con, &filter).await?;
        let bookings = self
            .booking_query()
            .find_page(&mut con, &filter, dto.sort, &window)
            .await?;
        Ok(Paged::assemble(bookings, total_count, &window).map(BookingDto::from))
    }

    async fn get_requests(
        &self,
        dto: GetRequestsDto,
    ) -> error_stack::Result<Paged<BookingDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let filter = BookingFilter::by_owner(dto.owner);
        let window = PageWindow::new(dto.page, dto.limit);
        let total_count = self.booking_query().count(&mut con, &filter).await?;
        let bookings = self
            .booking_query()
            .find_page(&mut con, &filter, dto.sort, &window)
            .await?;
        Ok(Paged::assemble(bookings, total_count, &window).map(BookingDto::from))
    }
}

impl<Connection: 'static + Send, T> GetBookingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookingQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateBookingService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnCarQuery<Connection>
    + DependOnCarModifier<Connection>
    + DependOnBookingModifier<Connection>
{
    /// Records a booking against an existing listing. The rent counter bump
    /// is best-effort: once the booking row is in, a failed counter update
    /// must not take the booking down with it.
    async fn create_booking(
        &self,
        dto: CreateBookingDto,
    ) -> error_stack::Result<Option<Uuid>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let car_id = CarId::new(dto.car_id);
        let Some(car) = self.car_query().find_by_id(&mut con, &car_id).await? else {
            return Ok(None);
        };

        let id = Uuid::new_v4();
        let booking = Booking::new(
            BookingId::new(id),
            car_id.clone(),
            UserEmail::new(dto.booked_by),
            car.added_by().clone(),
            Price::new(dto.total_price),
            CreatedAt::now(),
            BookingStatus::Pending,
        );
        self.booking_modifier().create(&mut con, &booking).await?;

        if let Err(report) = self
            .car_modifier()
            .increment_rent_count(&mut con, &car_id)
            .await
        {
            tracing::warn!(car = %dto.car_id, "rent counter update failed after booking insert: {report:?}");
        }

        Ok(Some(id))
    }
}

impl<Connection: 'static + Send, T> CreateBookingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnCarQuery<Connection>
        + DependOnCarModifier<Connection>
        + DependOnBookingModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateBookingService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookingQuery<Connection>
    + DependOnBookingModifier<Connection>
{
    async fn update_booking_status(
        &self,
        dto: UpdateBookingStatusDto,
    ) -> error_stack::Result<Option<()>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let id = BookingId::new(dto.id);
        if self
            .booking_query()
            .find_by_id(&mut con, &id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        self.booking_modifier()
            .update_status(&mut con, &id, dto.status)
            .await?;

        Ok(Some(()))
    }
}

impl<Connection: 'static + Send, T> UpdateBookingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookingQuery<Connection>
        + DependOnBookingModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{BookingStatus, PageNumber, PageSize, SortKey, UserEmail};
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::service::{
        CreateBookingService, CreateCarService, GetBookingService, GetCarService,
        UpdateBookingService,
    };
    use crate::testing::MemoryDatabase;
    use crate::transfer::{
        CreateBookingDto, CreateCarDto, GetBookingsDto, GetCarDto, GetRequestsDto,
        UpdateBookingStatusDto,
    };

    async fn seed_car(db: &MemoryDatabase, owner: &str) -> Uuid {
        db.create_car(CreateCarDto {
            name: "Axio".to_string(),
            category: "Sedan".to_string(),
            location: "Sylhet".to_string(),
            price: 90,
            description: String::new(),
            added_by: owner.to_string(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn booking_copies_owner_and_starts_pending() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let car_id = seed_car(&db, "owner@example.com").await;

        let booked = db
            .create_booking(CreateBookingDto {
                car_id,
                booked_by: "renter@example.com".to_string(),
                total_price: 270,
            })
            .await?;
        assert!(booked.is_some());

        let page = db
            .get_bookings(GetBookingsDto {
                renter: UserEmail::new("renter@example.com"),
                page: PageNumber::new(1u32),
                limit: PageSize::BOOKING,
                sort: SortKey::Newest,
            })
            .await?;
        assert_eq!(page.total_count(), 1);
        let booking = &page.items()[0];
        assert_eq!(booking.added_by, "owner@example.com");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, 270);
        Ok(())
    }

    #[tokio::test]
    async fn booking_bumps_the_rent_counter() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let car_id = seed_car(&db, "owner@example.com").await;

        db.create_booking(CreateBookingDto {
            car_id,
            booked_by: "renter@example.com".to_string(),
            total_price: 270,
        })
        .await?;

        let car = db.get_car(GetCarDto { id: car_id }).await?.unwrap();
        assert_eq!(car.rent_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn counter_failure_does_not_void_the_booking() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let car_id = seed_car(&db, "owner@example.com").await;
        db.fail_next_increment();

        let booked = db
            .create_booking(CreateBookingDto {
                car_id,
                booked_by: "renter@example.com".to_string(),
                total_price: 270,
            })
            .await?;
        assert!(booked.is_some());

        let page = db
            .get_bookings(GetBookingsDto {
                renter: UserEmail::new("renter@example.com"),
                page: PageNumber::new(1u32),
                limit: PageSize::BOOKING,
                sort: SortKey::Newest,
            })
            .await?;
        assert_eq!(page.total_count(), 1);

        let car = db.get_car(GetCarDto { id: car_id }).await?.unwrap();
        assert_eq!(car.rent_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn booking_a_missing_car_is_none() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let booked = db
            .create_booking(CreateBookingDto {
                car_id: Uuid::new_v4(),
                booked_by: "renter@example.com".to_string(),
                total_price: 270,
            })
            .await?;
        assert_eq!(booked, None);
        Ok(())
    }

    #[tokio::test]
    async fn booking_sorts_use_booking_recency_and_total_price() -> error_stack::Result<(), KernelError>
    {
        let db = MemoryDatabase::default();
        let car_id = seed_car(&db, "owner@example.com").await;

        // Creation order is the recency order: the 100 booking is the newest.
        for price in [300, 100] {
            db.create_booking(CreateBookingDto {
                car_id,
                booked_by: "renter@example.com".to_string(),
                total_price: price,
            })
            .await?;
        }

        let listing = |sort| GetBookingsDto {
            renter: UserEmail::new("renter@example.com"),
            page: PageNumber::new(1u32),
            limit: PageSize::BOOKING,
            sort,
        };

        let newest = db.get_bookings(listing(SortKey::Newest)).await?;
        let prices: Vec<_> = newest.items().iter().map(|b| b.total_price).collect();
        assert_eq!(prices, [100, 300]);

        let cheap_first = db.get_bookings(listing(SortKey::PriceLow)).await?;
        let prices: Vec<_> = cheap_first.items().iter().map(|b| b.total_price).collect();
        assert_eq!(prices, [100, 300]);

        let dear_first = db.get_bookings(listing(SortKey::PriceHigh)).await?;
        let prices: Vec<_> = dear_first.items().iter().map(|b| b.total_price).collect();
        assert_eq!(prices, [300, 100]);
        Ok(())
    }

    #[tokio::test]
    async fn requests_scope_to_the_listing_owner() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let mine = seed_car(&db, "owner@example.com").await;
        let other = seed_car(&db, "someone-else@example.com").await;

        for car_id in [mine, other] {
            db.create_booking(CreateBookingDto {
                car_id,
                booked_by: "renter@example.com".to_string(),
                total_price: 90,
            })
            .await?;
        }

        let requests = db
            .get_requests(GetRequestsDto {
                owner: UserEmail::new("owner@example.com"),
                page: PageNumber::new(1u32),
                limit: PageSize::BOOKING,
                sort: SortKey::Newest,
            })
            .await?;
        assert_eq!(requests.total_count(), 1);
        assert_eq!(requests.items()[0].car_id, mine);
        Ok(())
    }

    #[tokio::test]
    async fn status_update_round_trips() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let car_id = seed_car(&db, "owner@example.com").await;
        let id = db
            .create_booking(CreateBookingDto {
                car_id,
                booked_by: "renter@example.com".to_string(),
                total_price: 90,
            })
            .await?
            .unwrap();

        let updated = db
            .update_booking_status(UpdateBookingStatusDto {
                id,
                status: BookingStatus::Confirmed,
            })
            .await?;
        assert_eq!(updated, Some(()));

        let page = db
            .get_bookings(GetBookingsDto {
                renter: UserEmail::new("renter@example.com"),
                page: PageNumber::new(1u32),
                limit: PageSize::BOOKING,
                sort: SortKey::Newest,
            })
            .await?;
        assert_eq!(page.items()[0].status, BookingStatus::Confirmed);
        Ok(())
    }

    #[tokio::test]
    async fn status_update_of_missing_booking_is_none() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::default();
        let updated = db
            .update_booking_status(UpdateBookingStatusDto {
                id: Uuid::new_v4(),
                status: BookingStatus::Rejected,
            })
            .await?;
        assert_eq!(updated, None);
        Ok(())
    }
}
