use crate::error::Result;

pub fn ceil_div(numerator: usize, denominator: usize) -> usize {
    numerator / denominator + (numerator % denominator != 0) as usize
}

/// Fixed-length array of flags packed 64 to a word, all set on creation.
///
/// In Rust a bool is represented with a single byte. Keeping a vector of bits saves eight times
/// the memory compared to a vector of bools of the same length, at the cost of a shift and a mask
/// per access.
///
/// Iterating a BitVec yields the indices of its set bits in ascending order, skipping whole zero
/// words at a time.
pub struct BitVec {
    words: Vec<u64>,
    len: usize,
    word_index: usize,
    bit_index: usize,
}

impl Iterator for BitVec {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let word = self.words.get(self.word_index)?;
            let masked_word = word & BitVec::at_or_above(self.bit_index);
            match BitVec::find_first_set(masked_word) {
                Some(bit_index) => {
                    let result = (self.word_index << BitVec::SHIFT) + bit_index;
                    if bit_index + 1 == BitVec::WORD_BITS {
                        self.word_index += 1;
                        self.bit_index = 0;
                    } else {
                        self.bit_index = bit_index + 1;
                    }
                    return Some(result);
                }
                None => {
                    self.word_index += 1;
                    self.bit_index = 0;
                }
            }
        }
    }
}

impl BitVec {
    const WORD_BITS: usize = 64;
    const SHIFT: usize = 6;
    const MASK: usize = 0b11_1111;
    const ONES: u64 = u64::MAX;

    pub fn new(len: usize) -> Result<BitVec> {
        let word_len = ceil_div(len, BitVec::WORD_BITS);
        let mut words = Vec::new();
        words.try_reserve_exact(word_len)?;
        words.resize(word_len, BitVec::ONES);
        // Clear the padding past len so iteration never yields an out of range index.
        if let Some(last) = words.get_mut(len >> BitVec::SHIFT) {
            *last &= !BitVec::at_or_above(len & BitVec::MASK);
        }

        Ok(BitVec {
            words,
            len,
            word_index: 0,
            bit_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.words[index >> BitVec::SHIFT] & (1 << (index & BitVec::MASK)) != 0
    }

    #[inline]
    pub fn unset(&mut self, index: usize) {
        self.words[index >> BitVec::SHIFT] &= !(1 << (index & BitVec::MASK))
    }

    #[inline]
    fn at_or_above(bit_index: usize) -> u64 {
        BitVec::ONES << bit_index
    }

    /// Find the first set bit in word. This index is equal to the number of word's trailing zeros.
    fn find_first_set(word: u64) -> Option<usize> {
        if word == 0 {
            return None;
        }
        Some(word.trailing_zeros() as usize)
    }
}
