mod booking;
mod car;

pub use self::{booking::*, car::*};
