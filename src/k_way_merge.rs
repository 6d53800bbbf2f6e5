use std::cmp;
use std::mem;

/// Merge k ascending iterators into a single ascending iterator, using a loser tournament tree.
///
/// The parallel sieve hands each worker's private, ascending buffer of primes to one of these, so
/// the merged output is ascending no matter which worker finished first.
///
/// A BinaryHeap would pay O(log(k)) on pop and again on push. The loser tree pays once: after the
/// winner is taken, only the games on the path from the winner's leaf to the root get replayed.
///
/// ```text
///                                     winner
///                                    losers[0]
///                losers[1]                               losers[2]
///      losers[3]           losers[4]           losers[5]           losers[6]
///  sources[0] sources[1] sources[2] sources[3] sources[4]
///  first_leaf = 7
/// ```
///
/// Leaves without a source play as exhausted and always lose.
pub struct KWayMerge<T, I>
where
    T: Ord + Copy,
    I: Iterator<Item = T>,
{
    sources: Vec<I>,
    first_leaf: usize,
    winner: Entry<T>,
    losers: Vec<Entry<T>>,
}

impl<T, I> Iterator for KWayMerge<T, I>
where
    T: Ord + Copy,
    I: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (value, source) = self.winner.0.take()?;
        let refill = Entry::from_source(self.sources[source].next(), source);
        self.replay(refill, source);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.winner.0.is_some() as usize
            + self.losers.iter().filter(|entry| entry.0.is_some()).count();
        let (lower, upper) = self
            .sources
            .iter()
            .map(Iterator::size_hint)
            .fold((0usize, Some(0usize)), |(lower, upper), (l, u)| {
                (
                    lower.saturating_add(l),
                    upper.and_then(|upper| u.and_then(|u| upper.checked_add(u))),
                )
            });
        (
            lower.saturating_add(pending),
            upper.and_then(|upper| upper.checked_add(pending)),
        )
    }
}

impl<T, I> KWayMerge<T, I>
where
    T: Ord + Copy,
    I: Iterator<Item = T>,
{
    pub fn new(mut sources: Vec<I>) -> KWayMerge<T, I> {
        let first_leaf = KWayMerge::<T, I>::first_leaf(sources.len());
        let (winner, losers) = KWayMerge::play_tournament(first_leaf, &mut sources);

        KWayMerge {
            sources,
            first_leaf,
            winner,
            losers,
        }
    }

    /// Walk from source's leaf to the root, leaving the loser of each game behind.
    fn replay(&mut self, mut contender: Entry<T>, source: usize) {
        let mut index = source + self.first_leaf;
        while let Some(parent) = KWayMerge::<T, I>::parent(index) {
            let loser = &mut self.losers[parent];
            if *loser < contender {
                mem::swap(loser, &mut contender);
            }
            index = parent;
        }
        // Only called after self.winner was taken, so nothing is lost here.
        self.winner = contender;
    }

    fn play_tournament(first_leaf: usize, sources: &mut [I]) -> (Entry<T>, Vec<Entry<T>>) {
        let mut winners = vec![Entry(None); 2 * first_leaf + 1];
        for (source, iterator) in sources.iter_mut().enumerate() {
            winners[first_leaf + source] = Entry::from_source(iterator.next(), source);
        }

        let mut losers = vec![Entry(None); first_leaf];
        for game in (0..first_leaf).rev() {
            let left = winners[2 * game + 1];
            let right = winners[2 * game + 2];
            let (winner, loser) = if left < right {
                (left, right)
            } else {
                (right, left)
            };
            winners[game] = winner;
            losers[game] = loser;
        }

        (winners[0], losers)
    }

    /// Index of the first leaf in a complete binary tree with at least k leaves.
    fn first_leaf(k: usize) -> usize {
        k.max(1).next_power_of_two() - 1
    }
    fn parent(index: usize) -> Option<usize> {
        if index == 0 {
            return None;
        }
        Some((index - 1) / 2)
    }
}

/// A value tagged with the source it came from. Exhausted sources compare greater than any value.
#[derive(PartialEq, Eq, Copy, Clone)]
struct Entry<T: Ord + Copy>(Option<(T, usize)>);

impl<T: Ord + Copy> Entry<T> {
    fn from_source(value: Option<T>, source: usize) -> Entry<T> {
        Entry(value.map(|value| (value, source)))
    }
}

impl<T: Ord + Copy> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Entry<T>) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord + Copy> Ord for Entry<T> {
    fn cmp(&self, other: &Entry<T>) -> cmp::Ordering {
        match (self.0, other.0) {
            (Some(this), Some(that)) => this.cmp(&that),
            (Some(_), None) => cmp::Ordering::Less,
            (None, Some(_)) => cmp::Ordering::Greater,
            (None, None) => cmp::Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_way_merge_correct() {
        let sorted_array0 = vec![2, 3, 5, 7, 11];
        let sorted_array1 = vec![1, 1, 2, 3, 5, 8, 13];
        let sources = vec![sorted_array0.into_iter(), sorted_array1.into_iter()];

        let k_way_merge = KWayMerge::new(sources);
        assert_eq!(
            vec![1, 1, 2, 2, 3, 3, 5, 5, 7, 8, 11, 13],
            k_way_merge.collect::<Vec<_>>()
        );
    }

    #[test]
    fn k_way_merge_uneven_sources() {
        let sources = vec![
            vec![4, 9, 14],
            vec![],
            vec![0, 5, 10, 15, 20],
            vec![1],
            vec![3, 8],
        ];
        let k_way_merge = KWayMerge::new(sources.into_iter().map(Vec::into_iter).collect());
        assert_eq!(
            vec![0, 1, 3, 4, 5, 8, 9, 10, 14, 15, 20],
            k_way_merge.collect::<Vec<_>>()
        );
    }

    #[test]
    fn k_way_merge_degenerate() {
        let none: Vec<std::vec::IntoIter<u64>> = Vec::new();
        assert_eq!(vec![0u64; 0], KWayMerge::new(none).collect::<Vec<_>>());

        let one = vec![vec![2u64, 3, 5].into_iter()];
        assert_eq!(vec![2, 3, 5], KWayMerge::new(one).collect::<Vec<_>>());
    }

    #[test]
    fn k_way_merge_size_hint() {
        let sources = vec![vec![1, 4].into_iter(), vec![2, 3, 5].into_iter()];
        let mut k_way_merge = KWayMerge::new(sources);
        assert_eq!((5, Some(5)), k_way_merge.size_hint());
        k_way_merge.next();
        assert_eq!((4, Some(4)), k_way_merge.size_hint());
    }

    #[test]
    fn first_leaf_correct() {
        assert_eq!(0, KWayMerge::<u64, std::vec::IntoIter<u64>>::first_leaf(0));
        assert_eq!(0, KWayMerge::<u64, std::vec::IntoIter<u64>>::first_leaf(1));
        assert_eq!(1, KWayMerge::<u64, std::vec::IntoIter<u64>>::first_leaf(2));
        assert_eq!(7, KWayMerge::<u64, std::vec::IntoIter<u64>>::first_leaf(5));
        assert_eq!(7, KWayMerge::<u64, std::vec::IntoIter<u64>>::first_leaf(8));
    }
}
