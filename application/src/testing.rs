//! In-memory store used by the service tests. Mirrors the persistence
//! contracts closely enough to exercise filtering, ordering and the
//! booking/counter flow without a running database.

use std::sync::{Arc, Mutex};

use error_stack::Report;

use kernel::interface::database::QueryDatabaseConnection;
use kernel::interface::query::{BookingFilter, BookingQuery, CarFilter, CarQuery};
use kernel::interface::query::{DependOnBookingQuery, DependOnCarQuery};
use kernel::interface::update::{
    BookingModifier, CarModifier, DependOnBookingModifier, DependOnCarModifier,
};
use kernel::prelude::entity::{
    Booking, BookingId, BookingStatus, Car, CarId, PageSize, PageWindow, SortDirection, SortField,
    SortKey,
};
use kernel::KernelError;

pub type MemoryConnection = Arc<Mutex<MemoryState>>;

#[derive(Debug, Default)]
pub struct MemoryState {
    cars: Vec<Car>,
    bookings: Vec<Booking>,
    fail_next_increment: bool,
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    state: MemoryConnection,
}

impl MemoryDatabase {
    /// Makes the next rent counter update fail, simulating the counter write
    /// going down after the booking insert already succeeded.
    pub fn fail_next_increment(&self) {
        self.state.lock().unwrap().fail_next_increment = true;
    }
}

#[async_trait::async_trait]
impl QueryDatabaseConnection<MemoryConnection> for MemoryDatabase {
    async fn transact(&self) -> error_stack::Result<MemoryConnection, KernelError> {
        Ok(Arc::clone(&self.state))
    }
}

pub struct MemoryCarRepository;
pub struct MemoryBookingRepository;

fn matches_car(car: &Car, filter: &CarFilter) -> bool {
    let owner_ok = filter.owner().map_or(true, |owner| car.added_by() == owner);
    let search_ok = filter.search().map_or(true, |term| {
        let needle = term.as_ref().to_lowercase();
        [
            car.name().as_ref(),
            car.category().as_ref(),
            car.location().as_ref(),
        ]
        .iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
    });
    owner_ok && search_ok
}

fn matches_booking(booking: &Booking, filter: &BookingFilter) -> bool {
    filter
        .booked_by()
        .map_or(true, |renter| booking.booked_by() == renter)
        && filter
            .added_by()
            .map_or(true, |owner| booking.added_by() == owner)
}

// Ties sort by insertion order, reversed together with the key when the
// direction is descending.
fn sort_cars(cars: &mut Vec<(usize, Car)>, sort: SortKey) {
    let (field, direction) = sort.ordering();
    match field {
        SortField::Recency => cars.sort_by_key(|(pos, car)| (*car.date_added().as_ref(), *pos)),
        SortField::Price => cars.sort_by_key(|(pos, car)| (*car.price(), *pos)),
    }
    if direction == SortDirection::Descending {
        cars.reverse();
    }
}

fn sort_bookings(bookings: &mut Vec<(usize, Booking)>, sort: SortKey) {
    let (field, direction) = sort.ordering();
    match field {
        SortField::Recency => {
            bookings.sort_by_key(|(pos, booking)| (*booking.date_booked().as_ref(), *pos))
        }
        SortField::Price => {
            bookings.sort_by_key(|(pos, booking)| (*booking.total_price(), *pos))
        }
    }
    if direction == SortDirection::Descending {
        bookings.reverse();
    }
}

fn window_slice<T>(sorted: Vec<(usize, T)>, window: &PageWindow) -> Vec<T> {
    sorted
        .into_iter()
        .map(|(_, item)| item)
        .skip(window.skip() as usize)
        .take(window.limit() as usize)
        .collect()
}

#[async_trait::async_trait]
impl CarQuery<MemoryConnection> for MemoryCarRepository {
    async fn find_by_id(
        &self,
        con: &mut MemoryConnection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        let state = con.lock().unwrap();
        Ok(state.cars.iter().find(|car| car.id() == id).cloned())
    }

    async fn count(
        &self,
        con: &mut MemoryConnection,
        filter: &CarFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let state = con.lock().unwrap();
        Ok(state.cars.iter().filter(|car| matches_car(car, filter)).count() as i64)
    }

    async fn find_page(
        &self,
        con: &mut MemoryConnection,
        filter: &CarFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        let state = con.lock().unwrap();
        let mut matched: Vec<_> = state
            .cars
            .iter()
            .enumerate()
            .filter(|(_, car)| matches_car(car, filter))
            .map(|(pos, car)| (pos, car.clone()))
            .collect();
        sort_cars(&mut matched, sort);
        Ok(window_slice(matched, window))
    }

    async fn find_recent(
        &self,
        con: &mut MemoryConnection,
        limit: PageSize,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        let state = con.lock().unwrap();
        let mut all: Vec<_> = state.cars.iter().cloned().enumerate().collect();
        sort_cars(&mut all, SortKey::Newest);
        Ok(all
            .into_iter()
            .map(|(_, car)| car)
            .take(u32::from(limit) as usize)
            .collect())
    }
}

#[async_trait::async_trait]
impl CarModifier<MemoryConnection> for MemoryCarRepository {
    async fn create(
        &self,
        con: &mut MemoryConnection,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = con.lock().unwrap();
        state.cars.push(car.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryConnection,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = con.lock().unwrap();
        if let Some(stored) = state.cars.iter_mut().find(|stored| stored.id() == car.id()) {
            *stored = stored.clone().reconstruct(|c| {
                c.name = car.name().clone();
                c.category = car.category().clone();
                c.location = car.location().clone();
                c.price = *car.price();
                c.description = car.description().clone();
            });
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryConnection,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = con.lock().unwrap();
        state.cars.retain(|car| car.id() != id);
        Ok(())
    }

    async fn increment_rent_count(
        &self,
        con: &mut MemoryConnection,
        id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = con.lock().unwrap();
        if state.fail_next_increment {
            state.fail_next_increment = false;
            return Err(Report::new(KernelError::Internal)
                .attach_printable("rent counter update failed"));
        }
        if let Some(stored) = state.cars.iter_mut().find(|car| car.id() == id) {
            *stored = stored
                .clone()
                .reconstruct(|c| c.rent_count = c.rent_count.incremented());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingQuery<MemoryConnection> for MemoryBookingRepository {
    async fn find_by_id(
        &self,
        con: &mut MemoryConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let state = con.lock().unwrap();
        Ok(state
            .bookings
            .iter()
            .find(|booking| booking.id() == id)
            .cloned())
    }

    async fn count(
        &self,
        con: &mut MemoryConnection,
        filter: &BookingFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let state = con.lock().unwrap();
        Ok(state
            .bookings
            .iter()
            .filter(|booking| matches_booking(booking, filter))
            .count() as i64)
    }

    async fn find_page(
        &self,
        con: &mut MemoryConnection,
        filter: &BookingFilter,
        sort: SortKey,
        window: &PageWindow,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let state = con.lock().unwrap();
        let mut matched: Vec<_> = state
            .bookings
            .iter()
            .enumerate()
            .filter(|(_, booking)| matches_booking(booking, filter))
            .map(|(pos, booking)| (pos, booking.clone()))
            .collect();
        sort_bookings(&mut matched, sort);
        Ok(window_slice(matched, window))
    }
}

#[async_trait::async_trait]
impl BookingModifier<MemoryConnection> for MemoryBookingRepository {
    async fn create(
        &self,
        con: &mut MemoryConnection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = con.lock().unwrap();
        state.bookings.push(booking.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        con: &mut MemoryConnection,
        id: &BookingId,
        status: BookingStatus,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = con.lock().unwrap();
        if let Some(stored) = state
            .bookings
            .iter_mut()
            .find(|booking| booking.id() == id)
        {
            *stored = stored.clone().reconstruct(|b| b.status = status);
        }
        Ok(())
    }
}

impl DependOnCarQuery<MemoryConnection> for MemoryDatabase {
    type CarQuery = MemoryCarRepository;
    fn car_query(&self) -> &Self::CarQuery {
        &MemoryCarRepository
    }
}

impl DependOnCarModifier<MemoryConnection> for MemoryDatabase {
    type CarModifier = MemoryCarRepository;
    fn car_modifier(&self) -> &Self::CarModifier {
        &MemoryCarRepository
    }
}

impl DependOnBookingQuery<MemoryConnection> for MemoryDatabase {
    type BookingQuery = MemoryBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &MemoryBookingRepository
    }
}

impl DependOnBookingModifier<MemoryConnection> for MemoryDatabase {
    type BookingModifier = MemoryBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &MemoryBookingRepository
    }
}
