//! Pricing
//!
//! The offer-pricing rules, per line item:
//!
//! - no offer: `unit price * quantity`
//! - buy one get one free: one unit is charged per whole pair, and an odd
//!   remaining unit is charged at full price. Holds exactly for every
//!   quantity.
//! - bulk: below the threshold the list price applies; at or above it ALL
//!   units are charged at the configured discounted unit price.
//!
//! All arithmetic is exact, in integer minor units.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::offers::Offer;

/// Errors that can occur while pricing a line or a basket.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Price arithmetic exceeded the range of minor units.
    #[error("price arithmetic overflowed minor units")]
    Overflow,

    /// A bulk offer price is in a different currency to the item it prices.
    #[error("bulk offer currency {0} does not match item currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Charges `quantity` units at the given unit price.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication exceeds the
/// range of minor units.
pub fn full_price<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the offer-adjusted subtotal for one line item.
///
/// `offer` is the offer in effect for the line's product code, if any; a
/// line with no offer is charged at full price.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the subtotal exceeds the range of minor
///   units.
/// - [`PricingError::CurrencyMismatch`]: a bulk offer's discounted price is
///   in a different currency to the item.
pub fn offer_subtotal<'a>(
    offer: Option<&Offer<'a>>,
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    match offer {
        None => full_price(unit_price, quantity),
        Some(Offer::Bogof) => {
            let charged = quantity / 2 + quantity % 2;

            full_price(unit_price, charged)
        }
        Some(Offer::Bulk {
            threshold,
            unit_price: bulk_price,
        }) => {
            if quantity < *threshold {
                return full_price(unit_price, quantity);
            }

            if bulk_price.currency() != unit_price.currency() {
                return Err(PricingError::CurrencyMismatch(
                    bulk_price.currency().iso_alpha_code,
                    unit_price.currency().iso_alpha_code,
                ));
            }

            full_price(bulk_price, quantity)
        }
    }
}

/// Renders an amount of minor units as a plain fixed-point decimal string.
///
/// `exponent` gives the number of fractional digits (2 for pence/cents, so
/// 1934 renders as `"19.34"` and 0 as `"0.00"`). Never exponential, no
/// currency symbol, no thousands separators.
pub fn format_minor(minor: i64, exponent: u32) -> String {
    if exponent == 0 {
        return minor.to_string();
    }

    let scale = 10_u64.pow(exponent);
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let whole = abs / scale;
    let frac = abs % scale;
    let width = exponent as usize;

    format!("{sign}{whole}.{frac:0width$}")
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn bulk(threshold: u32, minor: i64) -> Offer<'static> {
        Offer::Bulk {
            threshold,
            unit_price: Money::from_minor(minor, GBP),
        }
    }

    #[test]
    fn no_offer_charges_full_price() -> TestResult {
        let subtotal = offer_subtotal(None, &Money::from_minor(4200, GBP), 3)?;

        assert_eq!(subtotal, Money::from_minor(12600, GBP));

        Ok(())
    }

    #[test]
    fn bogof_charges_one_unit_per_pair() -> TestResult {
        let price = Money::from_minor(311, GBP);

        assert_eq!(
            offer_subtotal(Some(&Offer::Bogof), &price, 1)?,
            Money::from_minor(311, GBP)
        );
        assert_eq!(
            offer_subtotal(Some(&Offer::Bogof), &price, 2)?,
            Money::from_minor(311, GBP)
        );
        assert_eq!(
            offer_subtotal(Some(&Offer::Bogof), &price, 3)?,
            Money::from_minor(622, GBP)
        );
        assert_eq!(
            offer_subtotal(Some(&Offer::Bogof), &price, 4)?,
            Money::from_minor(622, GBP)
        );

        Ok(())
    }

    #[test]
    fn bogof_each_additional_pair_adds_one_unit_price() -> TestResult {
        // subtotal(p, q + 2) == subtotal(p, q) + p, for every quantity
        let price = Money::from_minor(311, GBP);

        for quantity in 0..=9 {
            let base = offer_subtotal(Some(&Offer::Bogof), &price, quantity)?;
            let paired = offer_subtotal(Some(&Offer::Bogof), &price, quantity + 2)?;

            assert_eq!(
                paired,
                base.add(price)?,
                "pair property failed at quantity {quantity}"
            );
        }

        Ok(())
    }

    #[test]
    fn bogof_zero_quantity_is_free() -> TestResult {
        let subtotal = offer_subtotal(Some(&Offer::Bogof), &Money::from_minor(311, GBP), 0)?;

        assert_eq!(subtotal, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn bulk_below_threshold_charges_list_price() -> TestResult {
        let offer = bulk(3, 450);
        let price = Money::from_minor(500, GBP);

        assert_eq!(
            offer_subtotal(Some(&offer), &price, 1)?,
            Money::from_minor(500, GBP)
        );
        assert_eq!(
            offer_subtotal(Some(&offer), &price, 2)?,
            Money::from_minor(1000, GBP)
        );

        Ok(())
    }

    #[test]
    fn bulk_at_threshold_reprices_all_units() -> TestResult {
        // Every unit is re-priced at the threshold, not just the units
        // beyond it.
        let offer = bulk(3, 450);
        let price = Money::from_minor(500, GBP);

        assert_eq!(
            offer_subtotal(Some(&offer), &price, 3)?,
            Money::from_minor(1350, GBP)
        );
        assert_eq!(
            offer_subtotal(Some(&offer), &price, 4)?,
            Money::from_minor(1800, GBP)
        );

        Ok(())
    }

    #[test]
    fn bulk_currency_mismatch_errors() {
        let offer = Offer::Bulk {
            threshold: 3,
            unit_price: Money::from_minor(450, USD),
        };

        let result = offer_subtotal(Some(&offer), &Money::from_minor(500, GBP), 3);

        assert_eq!(
            result,
            Err(PricingError::CurrencyMismatch(
                USD.iso_alpha_code,
                GBP.iso_alpha_code
            ))
        );
    }

    #[test]
    fn full_price_overflow_errors() {
        let result = full_price(&Money::from_minor(i64::MAX, GBP), 2);

        assert_eq!(result, Err(PricingError::Overflow));
    }

    #[test]
    fn format_minor_renders_two_decimals() {
        assert_eq!(format_minor(0, 2), "0.00");
        assert_eq!(format_minor(5, 2), "0.05");
        assert_eq!(format_minor(1934, 2), "19.34");
        assert_eq!(format_minor(4200, 2), "42.00");
        assert_eq!(format_minor(-1934, 2), "-19.34");
    }

    #[test]
    fn format_minor_handles_other_exponents() {
        assert_eq!(format_minor(1934, 0), "1934");
        assert_eq!(format_minor(1934, 3), "1.934");
    }
}
