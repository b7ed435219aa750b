//! Fixtures
//!
//! YAML fixture sets under `./fixtures/{products,baskets,offers}/<name>.yml`
//! describing a product catalogue, an ordered list of additions to replay,
//! and the offers in effect. Used by the integration tests and the checkout
//! demo.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    basket::{Basket, BasketError},
    fixtures::{baskets::BasketFixture, offers::OffersFixture, products::ProductsFixture},
    offers::PricingRules,
    products::Product,
};

pub mod baskets;
pub mod offers;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid offer configuration
    #[error("Invalid offer configuration: {0}")]
    InvalidOffer(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// No basket contents loaded
    #[error("No basket contents loaded; cannot create basket")]
    NoItems,

    /// Not enough additions in the basket fixture
    #[error("Not enough additions in fixture, available: {available}, requested: {requested}")]
    NotEnoughItems {
        /// Number of additions defined in the fixture
        available: usize,
        /// Number of additions requested
        requested: usize,
    },

    /// Basket mutation error
    #[error("Failed to build basket: {0}")]
    Basket(#[from] BasketError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Product catalogue keyed by product code
    products: FxHashMap<String, Product<'a>>,

    /// Product codes to add, in order (duplicates merge into quantity)
    adds: Vec<String>,

    /// Offers in effect
    rules: PricingRules<'a>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            adds: Vec::new(),
            rules: PricingRules::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (code, product_fixture) in fixture.products {
            // Parse to get currency first (before creating the Product)
            let (_minor_units, currency) = products::parse_price(&product_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product = product_fixture.into_product(&code)?;

            self.products.insert(code, product);
        }

        Ok(self)
    }

    /// Load basket contents from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a listed
    /// product code has no catalogue entry.
    pub fn load_basket(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("baskets").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: BasketFixture = serde_norway::from_str(&contents)?;

        for code in &fixture.items {
            if !self.products.contains_key(code) {
                return Err(FixtureError::ProductNotFound(code.clone()));
            }
        }

        self.adds = fixture.items;

        Ok(self)
    }

    /// Load offers from a YAML fixture file
    ///
    /// Unknown offer kinds are skipped: the product stays at full price.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// offer's configuration is invalid.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("offers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OffersFixture = serde_norway::from_str(&contents)?;

        for (code, offer_fixture) in fixture.offers {
            if let Some(offer) = offer_fixture.try_into_offer(&code)? {
                self.rules.insert(code, offer);
            }
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, basket contents and offers
    /// with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_basket(name)?
            .load_offers(name)?;

        Ok(fixture)
    }

    /// Get a product by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, code: &str) -> Result<&Product<'a>, FixtureError> {
        self.products
            .get(code)
            .ok_or_else(|| FixtureError::ProductNotFound(code.to_string()))
    }

    /// Get the product codes replayed into the basket, in order
    pub fn adds(&self) -> &[String] {
        &self.adds
    }

    /// Get the offers in effect
    pub fn rules(&self) -> &PricingRules<'a> {
        &self.rules
    }

    /// Create a basket by replaying the loaded additions
    ///
    /// `n` limits the replay to the first `n` additions.
    ///
    /// # Errors
    ///
    /// Returns an error if no products or additions are loaded, if more
    /// additions are requested than the fixture defines, or if an addition
    /// is rejected by the basket.
    pub fn basket(&self, n: Option<usize>) -> Result<Basket<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        if self.adds.is_empty() {
            return Err(FixtureError::NoItems);
        }

        if let Some(n) = n
            && n > self.adds.len()
        {
            return Err(FixtureError::NotEnoughItems {
                requested: n,
                available: self.adds.len(),
            });
        }

        let mut basket = Basket::with_rules(self.rules.clone(), currency);

        for code in self.adds.iter().take(n.unwrap_or(self.adds.len())) {
            let product = self.product(code)?;

            basket.add(product)?;
        }

        Ok(basket)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
