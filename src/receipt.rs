//! Receipt

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    basket::Basket,
    pricing::{PricingError, full_price, offer_subtotal},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error pricing a line or the basket total.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error writing the rendered receipt.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// One priced line on a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine<'a> {
    code: String,
    name: String,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    full_total: Money<'a, Currency>,
    line_total: Money<'a, Currency>,
}

impl<'a> ReceiptLine<'a> {
    /// Returns the product code for the line.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name for the line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of units on the line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the price of a single unit.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the offer-adjusted total for the line.
    pub fn line_total(&self) -> &Money<'a, Currency> {
        &self.line_total
    }

    /// Returns whether an offer reduced this line below full price.
    pub fn discounted(&self) -> bool {
        self.line_total.to_minor_units() < self.full_total.to_minor_units()
    }

    /// Calculates the amount the line saved against full price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.full_total.sub(self.line_total)
    }
}

/// Final receipt for a priced basket.
///
/// Lines are ordered by product code so repeated renders of the same basket
/// are identical.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 8]>,
    subtotal: Money<'a, Currency>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Builds a receipt by pricing every line of the basket.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line or the total cannot be priced.
    pub fn from_basket(basket: &Basket<'a>) -> Result<Self, ReceiptError> {
        let mut lines: SmallVec<[ReceiptLine<'a>; 8]> = basket
            .iter()
            .map(|line| {
                let full_total = full_price(line.unit_price(), line.quantity())?;
                let line_total = offer_subtotal(
                    basket.rules().offer_for(line.code()),
                    line.unit_price(),
                    line.quantity(),
                )?;

                Ok(ReceiptLine {
                    code: line.code().to_string(),
                    name: line.name().to_string(),
                    quantity: line.quantity(),
                    unit_price: *line.unit_price(),
                    full_total,
                    line_total,
                })
            })
            .collect::<Result<_, PricingError>>()?;

        lines.sort_unstable_by(|a, b| a.code.cmp(&b.code));

        Ok(Receipt {
            lines,
            subtotal: basket.subtotal()?,
            total: basket.total_money()?,
            currency: basket.currency(),
        })
    }

    /// Receipt lines, ordered by product code.
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Total cost before any offers.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount payable after offers.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Calculates the amount saved by the offers in effect.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the receipt as a table with a summary block.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a money calculation fails or the
    /// output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Code", "Item", "Qty", "Unit Price", "Line Total", "Savings"]);

        for line in &self.lines {
            let savings = if line.discounted() {
                format!("{}", line.savings()?)
            } else {
                String::new()
            };

            builder.push_record([
                line.code().to_string(),
                line.name().to_string(),
                line.quantity().to_string(),
                format!("{}", line.unit_price()),
                format!("{}", line.line_total()),
                savings,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::sharp());
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out)?;
        writeln!(out, "Subtotal: {}", self.subtotal)?;
        writeln!(out, "Savings:  {}", self.savings()?)?;
        writeln!(out, "Total:    {}", self.total)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{
        offers::{Offer, PricingRules},
        products::Product,
    };

    use super::*;

    fn classic_basket() -> Result<Basket<'static>, crate::basket::BasketError> {
        let mut rules = PricingRules::new();

        rules.insert("FR1", Offer::Bogof);

        let mut basket = Basket::with_rules(rules, GBP);
        let fruit_tea = Product::new("FR1", "Fruit Tea", Money::from_minor(311, GBP));
        let coffee = Product::new("CF1", "Coffee", Money::from_minor(1123, GBP));

        basket.add(&fruit_tea)?;
        basket.add(&fruit_tea)?;
        basket.add(&coffee)?;

        Ok(basket)
    }

    #[test]
    fn from_basket_orders_lines_by_code() -> TestResult {
        let basket = classic_basket()?;
        let receipt = Receipt::from_basket(&basket)?;

        let codes: Vec<&str> = receipt.lines().iter().map(ReceiptLine::code).collect();

        assert_eq!(codes, vec!["CF1", "FR1"]);

        Ok(())
    }

    #[test]
    fn receipt_totals_and_savings() -> TestResult {
        let basket = classic_basket()?;
        let receipt = Receipt::from_basket(&basket)?;

        // Two fruit teas under BOGOF charge as one; coffee is full price.
        assert_eq!(receipt.subtotal(), Money::from_minor(1745, GBP));
        assert_eq!(receipt.total(), Money::from_minor(1434, GBP));
        assert_eq!(receipt.savings()?, Money::from_minor(311, GBP));

        Ok(())
    }

    #[test]
    fn discounted_flag_marks_offer_lines_only() -> TestResult {
        let basket = classic_basket()?;
        let receipt = Receipt::from_basket(&basket)?;

        let flags: Vec<bool> = receipt
            .lines()
            .iter()
            .map(ReceiptLine::discounted)
            .collect();

        assert_eq!(flags, vec![false, true]);

        Ok(())
    }

    #[test]
    fn write_to_renders_table_and_summary() -> TestResult {
        let basket = classic_basket()?;
        let receipt = Receipt::from_basket(&basket)?;

        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Fruit Tea"), "missing line item row");
        assert!(rendered.contains("Coffee"), "missing line item row");
        assert!(rendered.contains("Total:"), "missing summary block");

        Ok(())
    }

    #[test]
    fn empty_basket_renders_empty_receipt() -> TestResult {
        let basket = Basket::new(GBP);
        let receipt = Receipt::from_basket(&basket)?;

        assert!(receipt.lines().is_empty());
        assert_eq!(receipt.total(), Money::from_minor(0, GBP));
        assert_eq!(receipt.savings()?, Money::from_minor(0, GBP));

        Ok(())
    }
}
