use std::ops;
use std::slice;
use std::vec;

use crate::error::Result;

/// Growable buffer of primes, written by every sieve and handed to the caller on return.
///
/// Capacity starts at INITIAL_CAPACITY and doubles whenever a push would overflow it, so pushes
/// are amortized O(1). Capacity never shrinks while the buffer lives. Unlike a bare Vec, every
/// allocation goes through try_reserve and running out of memory comes back as an error instead
/// of aborting the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeBuffer {
    primes: Vec<u64>,
}

impl PrimeBuffer {
    pub const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Result<PrimeBuffer> {
        PrimeBuffer::with_capacity(PrimeBuffer::INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<PrimeBuffer> {
        let mut buffer = PrimeBuffer { primes: Vec::new() };
        buffer.reserve(capacity.max(1))?;
        Ok(buffer)
    }

    /// Grow capacity to at least new_capacity, keeping existing elements. Never shrinks.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.primes.capacity() {
            self.primes.try_reserve_exact(new_capacity - self.primes.len())?;
        }
        Ok(())
    }

    pub fn push(&mut self, p: u64) -> Result<()> {
        if self.primes.len() == self.primes.capacity() {
            let doubled = self.primes.capacity().saturating_mul(2);
            self.reserve(doubled.max(PrimeBuffer::INITIAL_CAPACITY))?;
        }
        self.primes.push(p);
        Ok(())
    }

    /// Append every element of other after the existing ones, growing at most once.
    pub fn extend_from_slice(&mut self, other: &[u64]) -> Result<()> {
        let needed = self.primes.len() + other.len();
        if needed > self.primes.capacity() {
            self.reserve(needed.max(self.primes.capacity().saturating_mul(2)))?;
        }
        self.primes.extend_from_slice(other);
        Ok(())
    }

    /// Release the storage. Consuming self rules out any later use of the buffer.
    pub fn free(self) {
        drop(self.primes);
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.primes.capacity()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.primes
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.primes
    }
}

impl ops::Deref for PrimeBuffer {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.primes
    }
}

impl From<PrimeBuffer> for Vec<u64> {
    fn from(buffer: PrimeBuffer) -> Vec<u64> {
        buffer.primes
    }
}

impl IntoIterator for PrimeBuffer {
    type Item = u64;
    type IntoIter = vec::IntoIter<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.into_iter()
    }
}

impl<'a> IntoIterator for &'a PrimeBuffer {
    type Item = &'a u64;
    type IntoIter = slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_empty() {
        let buffer = PrimeBuffer::new().unwrap();
        assert!(buffer.is_empty());
        assert_eq!(0, buffer.len());
        assert!(buffer.capacity() >= PrimeBuffer::INITIAL_CAPACITY);
    }

    #[test]
    fn zero_capacity_still_allocates() {
        let buffer = PrimeBuffer::with_capacity(0).unwrap();
        assert!(buffer.capacity() >= 1);
    }

    #[test]
    fn push_past_capacity_keeps_order() {
        let mut buffer = PrimeBuffer::new().unwrap();
        let mut capacity = buffer.capacity();
        for value in 0..1000 {
            buffer.push(value).unwrap();
            assert!(buffer.len() <= buffer.capacity());
            assert!(buffer.capacity() >= capacity);
            capacity = buffer.capacity();
        }
        assert_eq!(1000, buffer.len());
        assert_eq!((0..1000).collect::<Vec<u64>>(), buffer.into_vec());
    }

    #[test]
    fn push_doubles_capacity() {
        let mut buffer = PrimeBuffer::with_capacity(4).unwrap();
        let initial = buffer.capacity();
        for value in 0..=initial as u64 {
            buffer.push(value).unwrap();
        }
        assert!(buffer.capacity() >= 2 * initial);
    }

    #[test]
    fn reserve_never_shrinks() {
        let mut buffer = PrimeBuffer::with_capacity(64).unwrap();
        buffer.push(2).unwrap();
        buffer.push(3).unwrap();
        let capacity = buffer.capacity();

        buffer.reserve(8).unwrap();
        assert_eq!(capacity, buffer.capacity());

        buffer.reserve(200).unwrap();
        assert!(buffer.capacity() >= 200);
        assert_eq!(vec![2, 3], buffer.as_slice().to_vec());
    }

    #[test]
    fn extend_from_slice_appends() {
        let mut buffer = PrimeBuffer::new().unwrap();
        buffer.push(2).unwrap();
        buffer.extend_from_slice(&[3, 5, 7]).unwrap();
        buffer.extend_from_slice(&(11..100).collect::<Vec<_>>()).unwrap();
        assert_eq!(93, buffer.len());
        assert_eq!(&[2, 3, 5, 7, 11], &buffer[..5]);
        assert_eq!(Some(&99), buffer.last());
    }
}
