use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use super::rounding::{calculate_fee, round_up_to_nearest, FEE_ROUND_INCREMENT};
use super::ConvertError;
use crate::data::{ActivityRecord, TradeRecord};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MARKET_SUFFIX: &str = ".NS";
const DATA_SOURCE: &str = "YAHOO";
const CURRENCY: &str = "INR";

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Unknown,
}

impl Action {
    /// Trade types are matched case-insensitively. Anything that is not a
    /// buy or a sell passes through as `Unknown`.
    fn from_trade_type(trade_type: &str) -> Action {
        match trade_type.to_lowercase().as_str() {
            "buy" => Action::Buy,
            "sell" => Action::Sell,
            other => {
                debug!("unmapped trade type {other:?}");
                Action::Unknown
            },
        }
    }
}

/// Convert a whole trade book, preserving row order. The first row that
/// fails aborts the conversion.
pub fn convert_trades(trades: &[TradeRecord]) -> Result<Vec<ActivityRecord>, ConvertError> {
    trades.iter().map(map_trade).collect()
}

/// Map one trade book row to one Ghostfolio activity.
///
/// The trade date is re-parsed rather than copied, so a date that is not
/// `YYYY-MM-DD` fails the conversion. The total and rounded amounts shown in
/// the note are computed with the same fixed increment the fee uses.
pub fn map_trade(trade: &TradeRecord) -> Result<ActivityRecord, ConvertError> {
    let date = NaiveDate::parse_from_str(&trade.trade_date, DATE_FORMAT).map_err(|source| {
        ConvertError::DateFormat {
            value: trade.trade_date.clone(),
            source,
        }
    })?;

    let fee = calculate_fee(trade.quantity, trade.price)?;

    let total_amount = trade.quantity * trade.price;
    let rounded_amount = round_up_to_nearest(total_amount, FEE_ROUND_INCREMENT)?;

    Ok(ActivityRecord {
        date,
        code: format!("{}{}", trade.symbol, MARKET_SUFFIX),
        data_source: DATA_SOURCE.to_string(),
        currency: CURRENCY.to_string(),
        price: trade.price,
        quantity: trade.quantity,
        action: Action::from_trade_type(&trade.trade_type),
        fee,
        note: format!(
            "Trade ID: {}, Order ID: {}, Total: ₹{:.2}, Rounded: ₹{:.2}",
            trade.trade_id, trade.order_id, total_amount, rounded_amount
        ),
    })
}
