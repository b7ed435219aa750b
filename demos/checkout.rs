//! Checkout Example
//!
//! Replays a basket fixture through the pricing rules and prints the
//! itemised receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to limit how many additions are replayed

use std::io;

use anyhow::Result;
use clap::Parser;

use tally::{fixtures::Fixture, receipt::Receipt, utils::CheckoutDemoArgs};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CheckoutDemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let basket = fixture.basket(args.n)?;
    let receipt = Receipt::from_basket(&basket)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    println!("\nTotal due: {}", basket.total()?);

    Ok(())
}
