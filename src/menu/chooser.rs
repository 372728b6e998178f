use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of every random decision the menu engine makes.
///
/// Production code uses [`RandomChooser`]; tests can supply an implementation
/// that returns fixed picks and permutations.
pub trait Chooser {
    /// Uniform index in `0..len`. Only called with `len > 0`.
    fn index(&mut self, len: usize) -> usize;

    /// Permutes `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Uniform count in `low..=high`. Callers clamp `high` first.
    fn count_between(&mut self, low: usize, high: usize) -> usize;

    fn pick_one<'a, T>(&mut self, pool: &'a [T]) -> Option<&'a T> {
        if pool.is_empty() {
            None
        } else {
            pool.get(self.index(pool.len()))
        }
    }
}

pub struct RandomChooser<R> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChooser<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn count_between(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return high;
        }
        self.rng.gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_one_empty_pool() {
        let mut chooser = RandomChooser::seeded(7);
        let empty: [u8; 0] = [];
        assert_eq!(chooser.pick_one(&empty), None);
    }

    #[test]
    fn test_pick_one_stays_in_pool() {
        let mut chooser = RandomChooser::seeded(7);
        let pool = ["a", "b", "c"];
        for _ in 0..50 {
            assert!(pool.contains(chooser.pick_one(&pool).unwrap()));
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut chooser = RandomChooser::seeded(11);
        let mut values: Vec<u32> = (0..20).collect();
        chooser.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_count_between_bounds() {
        let mut chooser = RandomChooser::seeded(3);
        for _ in 0..100 {
            let n = chooser.count_between(2, 4);
            assert!((2..=4).contains(&n));
        }
        assert_eq!(chooser.count_between(2, 1), 1);
        assert_eq!(chooser.count_between(3, 3), 3);
    }
}
