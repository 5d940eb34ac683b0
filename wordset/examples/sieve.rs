//! Primes up to a bound with the Sieve of Eratosthenes.
//!
//!     cargo run -p wordset --example sieve -- 100
//!
//! Set `RUST_LOG=wordset=trace` to watch the window reallocate.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wordset::Set;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let max: usize = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 50,
    };

    let mut sieve = Set::from_range(2..=max);
    let mut primes = Set::new();
    while let Some(p) = sieve.pop_min() {
        primes.insert(p);
        let mut n = p.saturating_mul(2);
        while n <= max {
            sieve.remove(n);
            n += p;
        }
    }

    info!(max, count = primes.len(), "sieve done");
    println!("{primes}");
    Ok(())
}
