use tracing::{debug, instrument};

use crate::buffer::PrimeBuffer;
use crate::error::Result;

/// Test n against every candidate factor in [2, n).
#[inline]
pub fn is_prime_naive(n: u64) -> bool {
    n >= 2 && (2..n).all(|j| n % j != 0)
}

/// Test n against candidate factors j with j * j <= n.
///
/// Any factor above sqrt(n) pairs with a cofactor below sqrt(n), which we'd have found first.
/// The bound is written as j <= n / j so it can't overflow for n near u64::MAX.
#[inline]
pub fn is_prime_bounded(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut j = 2;
    while j <= n / j {
        if n % j == 0 {
            return false;
        }
        j += 1;
    }
    true
}

/// Trial division by every smaller integer. O(n^2), the reference the faster sieves are checked
/// against.
#[instrument(level = "debug")]
pub fn naive(n: u64) -> Result<PrimeBuffer> {
    let mut primes = PrimeBuffer::new()?;
    for i in 2..=n {
        if is_prime_naive(i) {
            primes.push(i)?;
        }
    }
    debug!(count = primes.len(), "naive sieve done");
    Ok(primes)
}

/// Trial division bounded by sqrt(i). Same output as naive for every n.
#[instrument(level = "debug")]
pub fn optimized_naive(n: u64) -> Result<PrimeBuffer> {
    let mut primes = PrimeBuffer::new()?;
    push_bounded(2..=n, &mut primes)?;
    debug!(count = primes.len(), "optimized naive sieve done");
    Ok(primes)
}

/// Push every prime among candidates onto primes, in the order candidates yields them.
pub(crate) fn push_bounded<I>(candidates: I, primes: &mut PrimeBuffer) -> Result<()>
where
    I: Iterator<Item = u64>,
{
    for i in candidates {
        if is_prime_bounded(i) {
            primes.push(i)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_prime_naive_correct() {
        assert!(!is_prime_naive(0));
        assert!(!is_prime_naive(1));
        assert!(is_prime_naive(2));
        assert!(is_prime_naive(3));
        assert!(!is_prime_naive(4));
        assert!(is_prime_naive(97));
        assert!(!is_prime_naive(91));
    }

    #[test]
    fn is_prime_bounded_correct() {
        assert!(!is_prime_bounded(0));
        assert!(!is_prime_bounded(1));
        assert!(is_prime_bounded(2));
        assert!(is_prime_bounded(3));
        assert!(!is_prime_bounded(4));
        assert!(!is_prime_bounded(25));
        assert!(!is_prime_bounded(49));
        assert!(is_prime_bounded(7919));
        assert!(!is_prime_bounded(7917));
    }

    #[test]
    fn is_prime_bounded_squares_of_primes() {
        for p in [2u64, 3, 5, 7, 11, 13, 65_521] {
            assert!(!is_prime_bounded(p * p));
        }
    }

    #[test]
    fn is_prime_bounded_agrees_with_naive() {
        for n in 0..2000 {
            assert_eq!(is_prime_naive(n), is_prime_bounded(n), "n = {}", n);
        }
    }

    #[test]
    fn is_prime_bounded_no_overflow_near_max() {
        // Both have small factors, so the loop exits early without j * j overflowing.
        assert!(!is_prime_bounded(u64::MAX - 1));
        assert!(!is_prime_bounded(u64::MAX));
    }

    #[test]
    fn naive_correct() {
        assert_eq!(vec![0u64; 0], naive(0).unwrap().into_vec());
        assert_eq!(vec![0u64; 0], naive(1).unwrap().into_vec());
        assert_eq!(vec![2], naive(2).unwrap().into_vec());
        assert_eq!(vec![2, 3], naive(3).unwrap().into_vec());
        assert_eq!(
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29],
            naive(30).unwrap().into_vec()
        );
    }

    #[test]
    fn optimized_naive_correct() {
        assert_eq!(vec![0u64; 0], optimized_naive(0).unwrap().into_vec());
        assert_eq!(vec![0u64; 0], optimized_naive(1).unwrap().into_vec());
        assert_eq!(vec![2], optimized_naive(2).unwrap().into_vec());
        assert_eq!(vec![2, 3], optimized_naive(3).unwrap().into_vec());
        assert_eq!(
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29],
            optimized_naive(30).unwrap().into_vec()
        );
    }

    #[test]
    fn optimized_naive_matches_naive() {
        for n in [0, 1, 2, 3, 4, 10, 100, 1000] {
            assert_eq!(naive(n).unwrap(), optimized_naive(n).unwrap(), "n = {}", n);
        }
    }
}
