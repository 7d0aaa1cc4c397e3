use std::fs::File;
use std::io::{Read, Write};

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::conversion::mapper::Action;
use crate::conversion::ConvertError;

/// One row of a Zerodha trade book export. Columns beyond these are ignored.
#[derive(Debug, Deserialize)]
pub struct TradeRecord {
    pub trade_date: String,
    pub symbol: String,
    pub trade_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub trade_id: String,
    pub order_id: String,
}

/// One Ghostfolio activity row. Field order is the output column order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub code: String,
    pub data_source: String,
    pub currency: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub action: Action,
    pub fee: Decimal,
    pub note: String,
}

const ACTIVITY_HEADER: [&str; 9] = [
    "Date",
    "Code",
    "DataSource",
    "Currency",
    "Price",
    "Quantity",
    "Action",
    "Fee",
    "Note",
];

pub fn read_trades(file_path: &str) -> Result<Vec<TradeRecord>, ConvertError> {
    let file = File::open(file_path).map_err(|err| ConvertError::InputRead(err.into()))?;
    read_trades_from(file)
}

pub fn read_trades_from(reader: impl Read) -> Result<Vec<TradeRecord>, ConvertError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut trades = Vec::new();
    for record in csv_reader.deserialize::<TradeRecord>() {
        trades.push(record.map_err(classify_read_error)?);
    }

    debug!("read {} trade records", trades.len());
    Ok(trades)
}

/// Rows that are valid CSV but do not match the expected columns are schema
/// errors; anything below that (I/O, malformed CSV) is a read error.
fn classify_read_error(err: csv::Error) -> ConvertError {
    if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) {
        ConvertError::Schema(err)
    } else {
        ConvertError::InputRead(err)
    }
}

pub fn write_activities(file_path: &str, activities: &[ActivityRecord]) -> Result<(), ConvertError> {
    let file = File::create(file_path).map_err(|err| ConvertError::OutputWrite(err.into()))?;
    write_activities_to(file, activities)
}

pub fn write_activities_to(
    writer: impl Write,
    activities: &[ActivityRecord],
) -> Result<(), ConvertError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // Written explicitly so a conversion with zero rows still gets a header.
    csv_writer
        .write_record(ACTIVITY_HEADER)
        .map_err(ConvertError::OutputWrite)?;

    for activity in activities {
        csv_writer.serialize(activity).map_err(ConvertError::OutputWrite)?;
    }

    csv_writer
        .flush()
        .map_err(|err| ConvertError::OutputWrite(err.into()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::conversion::convert_trades;

    const TRADE_BOOK: &str = "\
trade_date,symbol,trade_type,quantity,price,trade_id,order_id
2023-05-10,TCS,buy,10,3456.70,T1,O1
2023-05-11,INFY,sell,5,1500.00,T2,O2
";

    #[test]
    fn test_read_trade_book() -> Result<()> {
        let trades = read_trades_from(TRADE_BOOK.as_bytes())?;

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].trade_date, "2023-05-10");
        assert_eq!(trades[0].symbol, "TCS");
        assert_eq!(trades[0].quantity, dec!(10));
        assert_eq!(trades[0].price, dec!(3456.70));
        assert_eq!(trades[1].trade_type, "sell");
        assert_eq!(trades[1].order_id, "O2");

        Ok(())
    }

    #[test]
    fn test_read_ignores_extra_columns() -> Result<()> {
        let input = "\
trade_date,symbol,trade_type,quantity,price,trade_id,order_id,exchange
2023-05-10,TCS,buy,1,100,T1,O1,NSE
";
        let trades = read_trades_from(input.as_bytes())?;

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].symbol, "TCS");

        Ok(())
    }

    #[test]
    fn test_read_missing_column_is_a_schema_error() {
        let input = "\
trade_date,symbol,trade_type,quantity,price,trade_id
2023-05-10,TCS,buy,1,100,T1
";
        let result = read_trades_from(input.as_bytes());

        assert!(matches!(result, Err(ConvertError::Schema(_))));
    }

    #[test]
    fn test_read_header_only_yields_no_trades() -> Result<()> {
        let input = "trade_date,symbol,trade_type,quantity,price,trade_id,order_id\n";

        assert!(read_trades_from(input.as_bytes())?.is_empty());

        Ok(())
    }

    #[test]
    fn test_write_header_even_without_activities() -> Result<()> {
        let mut out = Vec::new();
        write_activities_to(&mut out, &[])?;

        assert_eq!(
            String::from_utf8(out)?,
            "Date,Code,DataSource,Currency,Price,Quantity,Action,Fee,Note\n"
        );

        Ok(())
    }

    #[test]
    fn test_write_converted_trade_book() -> Result<()> {
        let trades = read_trades_from(TRADE_BOOK.as_bytes())?;
        let activities = convert_trades(&trades)?;

        let mut out = Vec::new();
        write_activities_to(&mut out, &activities)?;

        let expected = "\
Date,Code,DataSource,Currency,Price,Quantity,Action,Fee,Note
2023-05-10,TCS.NS,YAHOO,INR,3456.70,10,BUY,33.00,\"Trade ID: T1, Order ID: O1, Total: ₹34567.00, Rounded: ₹34600.00\"
2023-05-11,INFY.NS,YAHOO,INR,1500.00,5,SELL,0.00,\"Trade ID: T2, Order ID: O2, Total: ₹7500.00, Rounded: ₹7500.00\"
";
        assert_eq!(String::from_utf8(out)?, expected);

        Ok(())
    }
}
