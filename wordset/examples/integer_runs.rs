//! Counts runs in random sets.
//!
//! Generates sets `R(i)`, `i = 1..=n`, with `2 * i * step` random draws from
//! `0..i * step`, and prints how many runs of at least three consecutive
//! integers each one holds. One set is reused across rounds; its capacity is
//! sized up front for the largest round.
//!
//!     cargo run -p wordset --example integer_runs -- 10 5

use std::env;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wordset::Set;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let step: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(10);
    let rounds: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5);

    let mut rng = StdRng::seed_from_u64(0x2545_f491_4f6c_dd1d);
    let mut set = Set::with_capacity(rounds * step);
    info!(words = set.capacity_words(), "capacity hint");

    println!("{:>8} {:>8} {:>8}", "Max", "Size", "Runs");
    for i in 1..=rounds {
        set.clear();

        // About 86% of 0..max ends up populated.
        let max = i * step;
        for _ in 0..2 * max {
            set.insert(rng.random_range(0..max));
        }

        let runs = set.runs().filter(|run| run.end() - run.start() >= 2).count();
        debug!(round = i, words = set.capacity_words(), "round done");

        print!("{:>8} {:>8} {:>8}", max, set.len(), runs);
        if max <= 32 {
            print!("    {set}");
        }
        println!();
    }

    Ok(())
}
