mod email;
mod page;
mod price;
mod search;
mod sort;
mod time;

pub use self::{email::*, page::*, price::*, search::*, sort::*, time::*};
