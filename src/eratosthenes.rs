use tracing::{debug, instrument};

use crate::bit_vec::BitVec;
use crate::buffer::PrimeBuffer;
use crate::error::{table_len, Result};

/// Sieve of Eratosthenes over a marker array covering [0, n]
///
/// Every index starts marked prime except 0 and 1. For each i with i * i <= n still marked, strike
/// the multiples of i from i * i upward: anything smaller is a multiple of a smaller prime and
/// was struck already. What's left marked are the primes, read off in ascending order.
///
/// The marker array is a BitVec, one bit per index, and is dropped once the primes are read out.
/// O(n log log n) time and O(n) bits.
///
/// Usage:
///
///     use prime_sieves::eratosthenes;
///
///     assert_eq!(vec![2, 3, 5, 7, 11, 13, 17, 19], eratosthenes(20).unwrap().into_vec());
#[instrument(level = "debug")]
pub fn eratosthenes(n: u64) -> Result<PrimeBuffer> {
    if n < 2 {
        return PrimeBuffer::new();
    }

    let mut is_prime = BitVec::new(table_len(n)?)?;
    is_prime.unset(0);
    is_prime.unset(1);

    let n = is_prime.len() - 1;
    let mut i = 2;
    while i <= n / i {
        if is_prime.get(i) {
            let mut multiple = i * i;
            while multiple <= n {
                is_prime.unset(multiple);
                multiple += i;
            }
        }
        i += 1;
    }

    let mut primes = PrimeBuffer::new()?;
    for p in is_prime {
        primes.push(p as u64)?;
    }
    debug!(count = primes.len(), "eratosthenes sieve done");
    Ok(primes)
}
