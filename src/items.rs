//! Items

use rusty_money::{Money, iso::Currency};

use crate::products::Product;

/// One distinct product inside a basket.
///
/// The basket owns the quantity counter: a line item starts at quantity 1
/// and grows by one for every repeated addition of the same product code.
/// The stored name and unit price keep their first-occurrence values.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    code: String,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item with quantity 1.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Returns the product code of the line item.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name of the line item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the line item.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the number of units of this product in the basket.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Records one more unit of this product.
    pub fn merge_one(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}

impl<'a> From<&Product<'a>> for LineItem<'a> {
    fn from(product: &Product<'a>) -> Self {
        LineItem::new(product.code.clone(), product.name.clone(), product.price)
    }
}
