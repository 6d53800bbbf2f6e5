use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prime_sieves::{Algorithm, ParallelSieve, PrimeBuffer};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Time the prime sieves against each other on [2, N].
#[derive(Parser, Debug)]
#[command(name = "prime-sieves", version, about)]
struct Cli {
    /// Upper bound, inclusive
    n: u64,

    /// Also run the O(n^2) naive sieve
    #[arg(long)]
    naive: bool,

    /// Only run these algorithms (repeatable)
    #[arg(short, long = "algorithm", value_enum)]
    algorithms: Vec<Algorithm>,

    /// Worker threads for the parallel sieve
    #[arg(short, long, env = "PRIME_SIEVES_WORKERS")]
    workers: Option<usize>,

    /// How many primes to print from the result
    #[arg(long, default_value_t = 100)]
    show: usize,

    /// Check every result against the linear sieve
    #[arg(long)]
    verify: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.n < 2 {
        println!("No primes less than 2.");
        return Ok(());
    }

    let parallel = match cli.workers {
        Some(workers) => ParallelSieve::default().with_workers(workers),
        None => ParallelSieve::default(),
    };
    debug!(?parallel, "configured parallel sieve");

    println!("Search Primes in [2, {}]", cli.n);
    println!("{}", "-".repeat(60));

    let mut results = Vec::new();
    for algorithm in Algorithm::ALL {
        if !selected(&cli, algorithm) {
            println!("{:<28} Skipped (disabled)", label(algorithm));
            continue;
        }
        let start = Instant::now();
        let primes = match algorithm {
            Algorithm::Parallel => parallel.sieve(cli.n),
            _ => algorithm.sieve(cli.n),
        }
        .with_context(|| format!("{} sieve failed for n = {}", algorithm, cli.n))?;
        let elapsed = start.elapsed();
        println!("{:<28}{:6} ms", label(algorithm), elapsed.as_millis());
        info!(%algorithm, count = primes.len(), ?elapsed, "sieve finished");
        results.push((algorithm, primes));
    }

    println!("{}", "-".repeat(60));

    let reference = match results
        .iter()
        .find(|(algorithm, _)| *algorithm == Algorithm::Linear)
    {
        Some((_, primes)) => primes.clone(),
        None => Algorithm::Linear.sieve(cli.n)?,
    };

    if cli.verify {
        verify(&reference, &results)?;
    }

    print_primes(&reference, cli.show);
    Ok(())
}

fn selected(cli: &Cli, algorithm: Algorithm) -> bool {
    if cli.algorithms.is_empty() {
        algorithm != Algorithm::Naive || cli.naive
    } else {
        cli.algorithms.contains(&algorithm)
    }
}

fn label(algorithm: Algorithm) -> String {
    let label = match algorithm {
        Algorithm::Naive => "Naive Prime Sieve",
        Algorithm::OptimizedNaive => "Optimized Naive Prime Sieve",
        Algorithm::Parallel => "Parallel Prime Sieve",
        Algorithm::Eratosthenes => "Eratosthenes Sieve",
        Algorithm::Linear => "Linear Sieve",
    };
    format!("{}:", label)
}

fn verify(reference: &PrimeBuffer, results: &[(Algorithm, PrimeBuffer)]) -> Result<()> {
    for (algorithm, primes) in results {
        if primes.len() != reference.len() {
            bail!(
                "{} found {} primes, linear sieve found {}",
                algorithm,
                primes.len(),
                reference.len()
            );
        }
        if let Some(index) = primes.iter().zip(reference.iter()).position(|(a, b)| a != b) {
            bail!(
                "{} differs from linear sieve at index {}: {} vs {}",
                algorithm,
                index,
                primes[index],
                reference[index]
            );
        }
        println!("{} matches linear sieve", algorithm);
    }
    Ok(())
}

fn print_primes(primes: &PrimeBuffer, show: usize) {
    let sample = &primes[..show.min(primes.len())];
    println!();
    println!("First {} primes:", sample.len());
    for row in sample.chunks(10) {
        let row = row
            .iter()
            .map(|p| format!("{:6}", p))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", row);
    }
}
