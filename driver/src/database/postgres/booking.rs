use std::str::FromStr;

use error_stack::Report;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{BookingFilter, BookingQuery, DependOnBookingQuery};
use kernel::interface::update::{BookingModifier, DependOnBookingModifier};
use kernel::prelude::entity::{
    Booking, BookingId, BookingStatus, CarId, CreatedAt, PageWindow, Price, SortDirection,
    SortField, SortKey, UserEmail,
};
use kernel::KernelError;

use crate::database::postgres::PostgresDatabase;
use crate::error::ConvertError;

pub struct PostgresBookingRepository;

#[async_trait::async_trait]
impl BookingQuery<PoolConnection<Postgres>> for PostgresBookingRepository {
    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_by_id(con, id).await
    }

    async fn count(
        &self,
        con: &mut PoolConnection<Postgres>,
        filter: &BookingFilter,
    ) -> error_stack::Result<i64, KernelError> {
        PgBookingInternal::count(con, filter).await
    }

    async fn find_page(
        &self,
        con: &mut PoolConnection<Postgres>,
        filter: &BookingFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_page(con, filter, sort, window).await
    }
}

#[async_trait::async_trait]
impl BookingModifier<PoolConnection<Postgres>> for PostgresBookingRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::create(con, booking).await
    }

    async fn update_status(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookingId,
        status: BookingStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::update_status(con, id, status).await
    }
}

impl DependOnBookingQuery<PoolConnection<Postgres>> for PostgresDatabase {
    type BookingQuery = PostgresBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &PostgresBookingRepository
    }
}

impl DependOnBookingModifier<PoolConnection<Postgres>> for PostgresDatabase {
    type BookingModifier = PostgresBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &PostgresBookingRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    car_id: Uuid,
    booked_by: String,
    added_by: String,
    total_price: i64,
    date_booked: OffsetDateTime,
    status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = Report<KernelError>;
    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let status = BookingStatus::from_str(&value.status).map_err(Report::new)?;
        Ok(Booking::new(
            BookingId::new(value.id),
            CarId::new(value.car_id),
            UserEmail::new(value.booked_by),
            UserEmail::new(value.added_by),
            Price::new(value.total_price),
            CreatedAt::new(value.date_booked),
            status,
        ))
    }
}

fn order_clause(sort: SortKey) -> &'static str {
    match sort.ordering() {
        (SortField::Recency, SortDirection::Descending) => "date_booked DESC",
        (SortField::Recency, SortDirection::Ascending) => "date_booked ASC",
        (SortField::Price, SortDirection::Ascending) => "total_price ASC",
        (SortField::Price, SortDirection::Descending) => "total_price DESC",
    }
}

pub(in crate::database) struct PgBookingInternal;

impl PgBookingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(
            // language=postgresql
            r#"
            SELECT id, car_id, booked_by, added_by, total_price, date_booked, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Booking::try_from).transpose()
    }

    async fn count(
        con: &mut PgConnection,
        filter: &BookingFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let total = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM bookings
            WHERE ($1::text IS NULL OR booked_by = $1)
              AND ($2::text IS NULL OR added_by = $2)
            "#,
        )
        .bind(filter.booked_by().map(AsRef::as_ref))
        .bind(filter.added_by().map(AsRef::as_ref))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(total)
    }

    async fn find_page(
        con: &mut PgConnection,
        filter: &BookingFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let sql = format!(
            // language=postgresql
            r#"
            SELECT id, car_id, booked_by, added_by, total_price, date_booked, status
            FROM bookings
            WHERE ($1::text IS NULL OR booked_by = $1)
              AND ($2::text IS NULL OR added_by = $2)
            ORDER BY {}, id
            LIMIT $3 OFFSET $4
            "#,
            order_clause(sort)
        );
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(filter.booked_by().map(AsRef::as_ref))
            .bind(filter.added_by().map(AsRef::as_ref))
            .bind(window.limit())
            .bind(window.skip())
            .fetch_all(con)
            .await
            .convert_error()?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO bookings (id, car_id, booked_by, added_by, total_price, date_booked, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.car_id().as_ref())
        .bind(booking.booked_by().as_ref())
        .bind(booking.added_by().as_ref())
        .bind(booking.total_price().as_ref())
        .bind(booking.date_booked().as_ref())
        .bind(booking.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update_status(
        con: &mut PgConnection,
        id: &BookingId,
        status: BookingStatus,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(status.as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
