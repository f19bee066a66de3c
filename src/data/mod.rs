mod cache;
mod parse;

pub use cache::{DataError, Dataset, DatasetCache};
pub use parse::{parse_number, NumberError};
