//! Basket Fixtures

use serde::Deserialize;

/// Wrapper for basket contents in YAML
#[derive(Debug, Deserialize)]
pub struct BasketFixture {
    /// Product codes in the order they are added to the basket; repeated
    /// codes merge into one line with a higher quantity
    pub items: Vec<String>,
}
