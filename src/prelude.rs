//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    fixtures::{Fixture, FixtureError},
    items::LineItem,
    offers::{Offer, PricingRules},
    pricing::{PricingError, format_minor, full_price, offer_subtotal},
    products::Product,
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
