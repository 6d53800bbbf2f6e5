// Internal modules
mod algorithm;
mod bit_vec;
mod buffer;
mod eratosthenes;
mod error;
mod k_way_merge;
mod linear;
mod parallel;
mod trial_division;

pub use algorithm::{Algorithm, UnknownAlgorithm};
pub use buffer::PrimeBuffer;
pub use eratosthenes::eratosthenes;
pub use error::{Result, SieveError};
pub use k_way_merge::KWayMerge;
pub use linear::{linear, smallest_prime_factors};
pub use parallel::{parallel, ParallelSieve};
pub use trial_division::{is_prime_bounded, is_prime_naive, naive, optimized_naive};
