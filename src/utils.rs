//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct CheckoutDemoArgs {
    /// Number of additions to replay from the basket fixture
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Fixture set to use for the products, basket contents and offers
    #[clap(short, long, default_value = "classic")]
    pub fixture: String,
}
