mod date;
mod euro;

pub use date::Date;
pub use euro::{Euro, ParseEuroError};
