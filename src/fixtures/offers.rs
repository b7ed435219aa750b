//! Offer Fixtures

use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    offers::Offer,
};

/// Quantity threshold applied when a bulk offer fixture omits one.
pub const DEFAULT_BULK_THRESHOLD: u32 = 3;

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Map of product code -> offer fixture
    pub offers: FxHashMap<String, OfferFixture>,
}

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferFixture {
    /// Buy one get one free
    Bogof,

    /// Bulk re-pricing at a quantity threshold
    Bulk {
        /// Quantity threshold; 3 when omitted
        threshold: Option<u32>,

        /// Discounted unit price (e.g., "4.50 GBP"), required
        unit_price: Option<String>,
    },

    /// Any offer kind this build does not recognise.
    ///
    /// Maps to "no offer": the product stays at full price.
    #[serde(other)]
    Unknown,
}

impl OfferFixture {
    /// Convert to an [`Offer`]; `Ok(None)` means no offer goes into effect.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidOffer`] if a bulk offer omits its
    /// discounted unit price or supplies a negative one.
    pub fn try_into_offer(self, code: &str) -> Result<Option<Offer<'static>>, FixtureError> {
        match self {
            OfferFixture::Bogof => Ok(Some(Offer::Bogof)),
            OfferFixture::Bulk {
                threshold,
                unit_price,
            } => {
                let raw = unit_price.ok_or_else(|| {
                    FixtureError::InvalidOffer(format!("bulk offer for {code} has no unit_price"))
                })?;

                let (minor_units, currency) = parse_price(&raw)?;

                if minor_units < 0 {
                    return Err(FixtureError::InvalidOffer(format!(
                        "bulk offer for {code} has a negative unit_price"
                    )));
                }

                Ok(Some(Offer::Bulk {
                    threshold: threshold.unwrap_or(DEFAULT_BULK_THRESHOLD),
                    unit_price: Money::from_minor(minor_units, currency),
                }))
            }
            OfferFixture::Unknown => Ok(None),
        }
    }
}
