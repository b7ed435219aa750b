//! Basket

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::LineItem,
    offers::PricingRules,
    pricing::{PricingError, format_minor, full_price, offer_subtotal},
    products::Product,
};

/// Errors related to basket mutation or lookups.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// An item was added without a product code.
    #[error("item has an empty product code")]
    EmptyProductCode,

    /// An item carries a negative unit price (product code).
    #[error("item {0} has a negative unit price")]
    NegativeUnitPrice(String),

    /// An item's currency differs from the basket currency (code, item currency, basket currency).
    #[error("item {0} has currency {1}, but basket has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// No line item exists for the product code.
    #[error("no line item for product code {0}")]
    LineNotFound(String),
}

/// Basket
///
/// Aggregates added products into one line item per distinct product code
/// and prices each line under the offer in effect for its code. The rule
/// set is supplied at construction and never mutated by the basket.
#[derive(Debug)]
pub struct Basket<'a> {
    rules: PricingRules<'a>,
    lines: FxHashMap<String, LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Basket<'a> {
    /// Creates an empty basket with no offers in effect.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_rules(PricingRules::new(), currency)
    }

    /// Creates an empty basket with the given pricing rules.
    #[must_use]
    pub fn with_rules(rules: PricingRules<'a>, currency: &'static Currency) -> Self {
        Basket {
            rules,
            lines: FxHashMap::default(),
            currency,
        }
    }

    /// Adds one unit of the given product to the basket.
    ///
    /// A product whose code is already present increments that line's
    /// quantity; the stored name and unit price keep their first-occurrence
    /// values. Otherwise a new line starts at quantity 1.
    ///
    /// # Errors
    ///
    /// - [`BasketError::EmptyProductCode`]: the product has no code.
    /// - [`BasketError::NegativeUnitPrice`]: the unit price is negative.
    /// - [`BasketError::CurrencyMismatch`]: the unit price is in a
    ///   different currency to the basket.
    pub fn add(&mut self, product: &Product<'a>) -> Result<(), BasketError> {
        if product.code.is_empty() {
            return Err(BasketError::EmptyProductCode);
        }

        if product.price.to_minor_units() < 0 {
            return Err(BasketError::NegativeUnitPrice(product.code.clone()));
        }

        let item_currency = product.price.currency();

        if item_currency != self.currency {
            return Err(BasketError::CurrencyMismatch(
                product.code.clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.lines.get_mut(&product.code) {
            line.merge_one();
        } else {
            self.lines
                .insert(product.code.clone(), LineItem::from(product));
        }

        Ok(())
    }

    /// Calculates the offer-adjusted total, rendered as a fixed-point
    /// decimal string with the currency's number of fractional digits
    /// (`"0.00"`, `"19.34"`); no symbol, no separators.
    ///
    /// Pure with respect to basket state: repeated calls without
    /// intervening [`add`](Basket::add)s return the same string.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if price arithmetic overflows or an offer
    /// carries a mismatched currency; a well-formed basket never hits
    /// either.
    pub fn total(&self) -> Result<String, PricingError> {
        let total = self.total_money()?;

        Ok(format_minor(total.to_minor_units(), self.currency.exponent))
    }

    /// Calculates the offer-adjusted total as money.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if price arithmetic overflows or an offer
    /// carries a mismatched currency.
    pub fn total_money(&self) -> Result<Money<'a, Currency>, PricingError> {
        self.lines
            .values()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                let subtotal = offer_subtotal(
                    self.rules.offer_for(line.code()),
                    line.unit_price(),
                    line.quantity(),
                )?;

                Ok(acc.add(subtotal)?)
            })
    }

    /// Calculates the total before any offers are applied.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if price arithmetic overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        self.lines
            .values()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                let line_total = full_price(line.unit_price(), line.quantity())?;

                Ok(acc.add(line_total)?)
            })
    }

    /// Gets the line item for a product code.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::LineNotFound`] if no unit of the product has
    /// been added.
    pub fn line(&self, code: &str) -> Result<&LineItem<'a>, BasketError> {
        self.lines
            .get(code)
            .ok_or_else(|| BasketError::LineNotFound(code.to_string()))
    }

    /// Iterates over the line items in the basket, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.values()
    }

    /// Gets the number of distinct products in the basket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the basket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Gets the currency of the basket.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Gets the pricing rules the basket was constructed with.
    pub fn rules(&self) -> &PricingRules<'a> {
        &self.rules
    }
}
