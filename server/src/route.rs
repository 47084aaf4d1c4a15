mod booking;
mod car;
mod session;

pub use self::{booking::BookingRouter, car::CarRouter, session::SessionRouter};
