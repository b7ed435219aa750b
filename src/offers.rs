//! Offers
//!
//! A product code carries at most one offer. The bulk discounted unit price
//! is part of the offer configuration, per product, so the rule set is
//! self-contained; a code with no entry in [`PricingRules`] is charged at
//! full price.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

/// Offer enum
#[derive(Debug, Clone, PartialEq)]
pub enum Offer<'a> {
    /// Buy one, get one free: every second unit of the product is free.
    Bogof,

    /// Bulk re-pricing: once the quantity reaches `threshold`, ALL units of
    /// the product are charged at `unit_price` instead of the list price,
    /// not just the units beyond the threshold.
    Bulk {
        /// Quantity at which the discounted unit price kicks in
        threshold: u32,

        /// Discounted price per unit once the threshold is met
        unit_price: Money<'a, Currency>,
    },
}

/// Mapping from product code to the offer in effect for that product.
#[derive(Debug, Clone, Default)]
pub struct PricingRules<'a> {
    offers: FxHashMap<String, Offer<'a>>,
}

impl<'a> PricingRules<'a> {
    /// Creates an empty rule set; every product is charged at full price.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts an offer in effect for the given product code, replacing any
    /// previous offer for that code.
    pub fn insert(&mut self, code: impl Into<String>, offer: Offer<'a>) -> &mut Self {
        self.offers.insert(code.into(), offer);
        self
    }

    /// Returns the offer in effect for the given product code, if any.
    pub fn offer_for(&self, code: &str) -> Option<&Offer<'a>> {
        self.offers.get(code)
    }

    /// Returns the number of product codes with an offer in effect.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Checks whether any offers are in effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl<'a> FromIterator<(String, Offer<'a>)> for PricingRules<'a> {
    fn from_iter<I: IntoIterator<Item = (String, Offer<'a>)>>(iter: I) -> Self {
        Self {
            offers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;

    use super::*;

    #[test]
    fn empty_rules_have_no_offers() {
        let rules = PricingRules::new();

        assert!(rules.is_empty());
        assert_eq!(rules.offer_for("FR1"), None);
    }

    #[test]
    fn insert_and_lookup_by_code() {
        let mut rules = PricingRules::new();

        rules.insert("FR1", Offer::Bogof).insert(
            "SR1",
            Offer::Bulk {
                threshold: 3,
                unit_price: Money::from_minor(450, GBP),
            },
        );

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.offer_for("FR1"), Some(&Offer::Bogof));
        assert!(matches!(
            rules.offer_for("SR1"),
            Some(Offer::Bulk { threshold: 3, .. })
        ));
        assert_eq!(rules.offer_for("CF1"), None);
    }

    #[test]
    fn insert_replaces_previous_offer() {
        let mut rules = PricingRules::new();

        rules.insert("FR1", Offer::Bogof);
        rules.insert(
            "FR1",
            Offer::Bulk {
                threshold: 2,
                unit_price: Money::from_minor(300, GBP),
            },
        );

        assert_eq!(rules.len(), 1);
        assert!(matches!(
            rules.offer_for("FR1"),
            Some(Offer::Bulk { threshold: 2, .. })
        ));
    }

    #[test]
    fn rules_collect_from_iterator() {
        let rules: PricingRules<'_> = [("FR1".to_string(), Offer::Bogof)].into_iter().collect();

        assert_eq!(rules.offer_for("FR1"), Some(&Offer::Bogof));
    }
}
