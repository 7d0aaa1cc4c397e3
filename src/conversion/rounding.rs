use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ConvertError;

/// Increment the fee derivation rounds trade totals up to.
pub const FEE_ROUND_INCREMENT: Decimal = dec!(100);

const FEE_PRECISION: u32 = 2;

/// Smallest multiple of `increment` that is greater than or equal to
/// `amount`. The increment must be positive.
pub fn round_up_to_nearest(amount: Decimal, increment: Decimal) -> Result<Decimal, ConvertError> {
    if increment <= Decimal::ZERO {
        return Err(ConvertError::Increment(increment));
    }

    Ok((amount / increment).ceil() * increment)
}

/// The fee of a trade is the gap between its total amount rounded up to the
/// nearest 100 and the actual total, to two decimal places (ties round half
/// to even).
pub fn calculate_fee(quantity: Decimal, price: Decimal) -> Result<Decimal, ConvertError> {
    let actual_amount = quantity * price;
    let rounded_amount = round_up_to_nearest(actual_amount, FEE_ROUND_INCREMENT)?;

    let mut fee = (rounded_amount - actual_amount).round_dp(FEE_PRECISION);
    fee.rescale(FEE_PRECISION);

    Ok(fee)
}
