//! Products

use rusty_money::{Money, iso::Currency};

/// A product as handed to the checkout: an opaque code, a display name and
/// a unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product code, the unique key within a basket
    pub code: String,

    /// Display name (not used in calculation)
    pub name: String,

    /// Price for a single unit
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Creates a new product.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
        }
    }
}
