//! Monetary types for rate and amount representation.

use rust_decimal::Decimal;

/// Annualized rate (APR) as a fraction, represented as a Decimal for precision.
pub type Rate = Decimal;

/// Capital amount represented as a Decimal for precision.
///
/// Amounts cross the catalog boundary string-encoded; `Decimal`'s serde
/// representation preserves that without floating-point loss.
pub type Amount = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rate_and_amount_are_decimal() {
        let rate: Rate = dec!(0.045);
        let amount: Amount = dec!(1000);

        assert_eq!(rate * amount, dec!(45.000));
    }

    #[test]
    fn amount_serializes_as_string() {
        let amount: Amount = dec!(600.50);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"600.50\"");
    }
}
