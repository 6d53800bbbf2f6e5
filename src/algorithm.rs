use std::fmt;
use std::str;

use crate::buffer::PrimeBuffer;
use crate::eratosthenes::eratosthenes;
use crate::error::Result;
use crate::linear::linear;
use crate::parallel::parallel;
use crate::trial_division::{naive, optimized_naive};

/// The five prime sieves, selectable at runtime.
///
/// Every variant returns exactly the primes in [2, n], ascending, and an empty buffer for n < 2.
///
///     use prime_sieves::Algorithm;
///
///     for algorithm in Algorithm::ALL {
///         assert_eq!(vec![2, 3, 5, 7], algorithm.sieve(10).unwrap().into_vec());
///     }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    Naive,
    OptimizedNaive,
    Parallel,
    Eratosthenes,
    Linear,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Naive,
        Algorithm::OptimizedNaive,
        Algorithm::Parallel,
        Algorithm::Eratosthenes,
        Algorithm::Linear,
    ];

    pub fn sieve(self, n: u64) -> Result<PrimeBuffer> {
        match self {
            Algorithm::Naive => naive(n),
            Algorithm::OptimizedNaive => optimized_naive(n),
            Algorithm::Parallel => parallel(n),
            Algorithm::Eratosthenes => eratosthenes(n),
            Algorithm::Linear => linear(n),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::OptimizedNaive => "optimized-naive",
            Algorithm::Parallel => "parallel",
            Algorithm::Eratosthenes => "eratosthenes",
            Algorithm::Linear => "linear",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm `{0}`")]
pub struct UnknownAlgorithm(String);

impl str::FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> std::result::Result<Algorithm, UnknownAlgorithm> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}
