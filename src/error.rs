use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SieveError>;

#[derive(Debug, Error)]
pub enum SieveError {
    #[error("failed to allocate sieve storage: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("bound {0} is too large to index on this platform")]
    BoundTooLarge(u64),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Length of a table indexed 0..=n.
pub(crate) fn table_len(n: u64) -> Result<usize> {
    usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or(SieveError::BoundTooLarge(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_len_correct() {
        assert_eq!(1, table_len(0).unwrap());
        assert_eq!(31, table_len(30).unwrap());
        assert!(matches!(
            table_len(u64::MAX),
            Err(SieveError::BoundTooLarge(u64::MAX))
        ));
    }
}
