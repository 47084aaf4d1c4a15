mod booking;
mod car;
mod common;

pub use self::{booking::*, car::*, common::*};
