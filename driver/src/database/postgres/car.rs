use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{CarFilter, CarQuery, DependOnCarQuery};
use kernel::interface::update::{CarModifier, DependOnCarModifier};
use kernel::prelude::entity::{
    Car, CarCategory, CarId, CarName, CreatedAt, Description, Location, PageSize, PageWindow,
    Price, RentCount, SortDirection, SortField, SortKey, UserEmail,
};
use kernel::KernelError;

use crate::database::postgres::PostgresDatabase;
use crate::error::ConvertError;

pub struct PostgresCarRepository;

#[async_trait::async_trait]
impl CarQuery<PoolConnection<Postgres>> for PostgresCarRepository {
    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        PgCarInternal::find_by_id(con, id).await
    }

    async fn count(
        &self,
        con: &mut PoolConnection<Postgres>,
        filter: &CarFilter,
    ) -> error_stack::Result<i64, KernelError> {
        PgCarInternal::count(con, filter).await
    }

    async fn find_page(
        &self,
        con: &mut PoolConnection<Postgres>,
        filter: &CarFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        PgCarInternal::find_page(con, filter, sort, window).await
    }

    async fn find_recent(
        &self,
        con: &mut PoolConnection<Postgres>,
        limit: PageSize,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        PgCarInternal::find_recent(con, limit).await
    }
}

#[async_trait::async_trait]
impl CarModifier<PoolConnection<Postgres>> for PostgresCarRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::create(con, car).await
    }

    async fn update(
        &self,
        con: &mut PoolConnection<Postgres>,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::update(con, car).await
    }

    async fn delete(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::delete(con, id).await
    }

    async fn increment_rent_count(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::increment_rent_count(con, id).await
    }
}

impl DependOnCarQuery<PoolConnection<Postgres>> for PostgresDatabase {
    type CarQuery = PostgresCarRepository;
    fn car_query(&self) -> &Self::CarQuery {
        &PostgresCarRepository
    }
}

impl DependOnCarModifier<PoolConnection<Postgres>> for PostgresDatabase {
    type CarModifier = PostgresCarRepository;
    fn car_modifier(&self) -> &Self::CarModifier {
        &PostgresCarRepository
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    name: String,
    category: String,
    location: String,
    price: i64,
    description: String,
    added_by: String,
    date_added: OffsetDateTime,
    rent_count: i32,
}

impl From<CarRow> for Car {
    fn from(value: CarRow) -> Self {
        Car::new(
            CarId::new(value.id),
            CarName::new(value.name),
            CarCategory::new(value.category),
            Location::new(value.location),
            Price::new(value.price),
            Description::new(value.description),
            UserEmail::new(value.added_by),
            CreatedAt::new(value.date_added),
            RentCount::new(value.rent_count),
        )
    }
}

/// ILIKE pattern for a substring match. LIKE metacharacters in the raw term
/// are literals as far as the caller is concerned.
pub(in crate::database) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn order_clause(sort: SortKey) -> &'static str {
    match sort.ordering() {
        (SortField::Recency, SortDirection::Descending) => "date_added DESC",
        (SortField::Recency, SortDirection::Ascending) => "date_added ASC",
        (SortField::Price, SortDirection::Ascending) => "price ASC",
        (SortField::Price, SortDirection::Descending) => "price DESC",
    }
}

pub(in crate::database) struct PgCarInternal;

impl PgCarInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        let row = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT id, name, category, location, price, description, added_by, date_added, rent_count
            FROM cars
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(Car::from);
        Ok(found)
    }

    async fn count(
        con: &mut PgConnection,
        filter: &CarFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let total = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM cars
            WHERE ($1::text IS NULL OR added_by = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR category ILIKE $2 OR location ILIKE $2)
            "#,
        )
        .bind(filter.owner().map(AsRef::as_ref))
        .bind(filter.search().map(|term| like_pattern(term.as_ref())))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(total)
    }

    async fn find_page(
        con: &mut PgConnection,
        filter: &CarFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        // The sort column cannot be bound, so the clause is interpolated from
        // a fixed set. `id` breaks ties to keep pages disjoint.
        let sql = format!(
            // language=postgresql
            r#"
            SELECT id, name, category, location, price, description, added_by, date_added, rent_count
            FROM cars
            WHERE ($1::text IS NULL OR added_by = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR category ILIKE $2 OR location ILIKE $2)
            ORDER BY {}, id
            LIMIT $3 OFFSET $4
            "#,
            order_clause(sort)
        );
        let rows = sqlx::query_as::<_, CarRow>(&sql)
            .bind(filter.owner().map(AsRef::as_ref))
            .bind(filter.search().map(|term| like_pattern(term.as_ref())))
            .bind(window.limit())
            .bind(window.skip())
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn find_recent(
        con: &mut PgConnection,
        limit: PageSize,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        let rows = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT id, name, category, location, price, description, added_by, date_added, rent_count
            FROM cars
            ORDER BY date_added DESC, id
            LIMIT $1
            "#,
        )
        .bind(i64::from(u32::from(limit)))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn create(con: &mut PgConnection, car: &Car) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO cars (id, name, category, location, price, description, added_by, date_added, rent_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(car.id().as_ref())
        .bind(car.name().as_ref())
        .bind(car.category().as_ref())
        .bind(car.location().as_ref())
        .bind(car.price().as_ref())
        .bind(car.description().as_ref())
        .bind(car.added_by().as_ref())
        .bind(car.date_added().as_ref())
        .bind(car.rent_count().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, car: &Car) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE cars
            SET name = $2, category = $3, location = $4, price = $5, description = $6
            WHERE id = $1
            "#,
        )
        .bind(car.id().as_ref())
        .bind(car.name().as_ref())
        .bind(car.category().as_ref())
        .bind(car.location().as_ref())
        .bind(car.price().as_ref())
        .bind(car.description().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, id: &CarId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM cars
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn increment_rent_count(
        con: &mut PgConnection,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE cars
            SET rent_count = rent_count + 1
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
