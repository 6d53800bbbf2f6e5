use tracing::{debug, instrument};

use crate::buffer::PrimeBuffer;
use crate::error::{table_len, Result};

/// Linear (Euler) sieve: strike every composite exactly once, by its smallest prime factor
///
/// min_prime[i] holds the smallest prime factor of i, or 0 while i hasn't been reached by any
/// product. Walking i upward, an i still at 0 is prime. Then i is multiplied by each prime p found
/// so far, smallest first, recording p as the smallest factor of i * p. The walk stops at the
/// first p dividing i: past it, i * p' has min_prime[i] < p' as its smallest factor, and that
/// composite gets struck later as (i * p' / min_prime[i]) * min_prime[i]. Total work is O(n).
///
/// The primes found so far are the output buffer itself, read by index while it grows. Entries
/// are only ever appended, never changed, so everything below primes.len() is stable.
#[instrument(level = "debug")]
pub fn linear(n: u64) -> Result<PrimeBuffer> {
    if n < 2 {
        return PrimeBuffer::new();
    }

    let min_prime = min_prime_table(n)?;
    let mut primes = PrimeBuffer::new()?;
    sieve_into(&mut primes, min_prime)?;
    debug!(count = primes.len(), "linear sieve done");
    Ok(primes)
}

/// Smallest prime factor of every integer in [0, n], with 0 for 0 and 1.
pub fn smallest_prime_factors(n: u64) -> Result<Vec<u64>> {
    let mut min_prime = min_prime_table(n)?;
    if n >= 2 {
        let mut primes = PrimeBuffer::new()?;
        min_prime = sieve_into(&mut primes, min_prime)?;
    }
    Ok(min_prime)
}

fn min_prime_table(n: u64) -> Result<Vec<u64>> {
    let len = table_len(n)?;
    let mut min_prime = Vec::new();
    min_prime.try_reserve_exact(len)?;
    min_prime.resize(len, 0);
    Ok(min_prime)
}

fn sieve_into(primes: &mut PrimeBuffer, mut min_prime: Vec<u64>) -> Result<Vec<u64>> {
    let n = (min_prime.len() - 1) as u64;
    for i in 2..=n {
        if min_prime[i as usize] == 0 {
            min_prime[i as usize] = i;
            primes.push(i)?;
        }
        for index in 0..primes.len() {
            let p = primes[index];
            if p > n / i {
                break;
            }
            min_prime[(i * p) as usize] = p;
            if i % p == 0 {
                break;
            }
        }
    }
    Ok(min_prime)
}
