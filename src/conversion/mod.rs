use rust_decimal::Decimal;
use thiserror::Error;

pub mod mapper;
pub mod rounding;


pub use mapper::convert_trades;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read trade book: {0}")]
    InputRead(csv::Error),
    #[error("trade book row does not match the expected columns: {0}")]
    Schema(csv::Error),
    #[error("trade date {value:?} is not a YYYY-MM-DD date")]
    DateFormat {
        value: String,
        source: chrono::ParseError,
    },
    #[error("rounding increment must be positive, got {0}")]
    Increment(Decimal),
    #[error("failed to write activities: {0}")]
    OutputWrite(csv::Error),
}
