//! Route handlers, grouped by resource.

pub mod books;
pub mod covers;
pub mod import;
pub mod series;
pub mod status;
pub mod uploads;
