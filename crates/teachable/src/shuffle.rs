//! Seeded Fisher–Yates shuffling.
//!
//! Everywhere sample order must be reproducible (per-class shuffles, combined
//! train/validation shuffles) goes through this one function with an explicit
//! optional generator — never module-global random state.

use rand::rngs::StdRng;
use rand::Rng;

/// Produce a shuffled copy of `items` using Fisher–Yates.
///
/// Walks from the last index down to 1, drawing `j` uniformly from `[0, i]`
/// — from the seeded generator when one is given, from the thread generator
/// otherwise. With the same seed state and input order the result is
/// bit-for-bit reproducible. The input is never mutated; slices of length
/// 0 or 1 come back as an unchanged copy.
pub fn fisher_yates<T: Clone>(items: &[T], mut rng: Option<&mut StdRng>) -> Vec<T> {
    let mut shuffled = items.to_vec();
    if shuffled.len() <= 1 {
        return shuffled;
    }
    for i in (1..shuffled.len()).rev() {
        let j = match rng.as_deref_mut() {
            Some(rng) => rng.gen_range(0..=i),
            None => rand::thread_rng().gen_range(0..=i),
        };
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let items: Vec<u32> = (0..100).collect();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let shuffled_a = fisher_yates(&items, Some(&mut rng_a));
        let shuffled_b = fisher_yates(&items, Some(&mut rng_b));

        assert_eq!(shuffled_a, shuffled_b);
        assert_ne!(shuffled_a, items, "100 elements should not shuffle to identity");
    }

    #[test]
    fn test_different_seeds_differ() {
        let items: Vec<u32> = (0..100).collect();
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        assert_ne!(
            fisher_yates(&items, Some(&mut rng_a)),
            fisher_yates(&items, Some(&mut rng_b))
        );
    }

    #[test]
    fn test_result_is_a_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = fisher_yates(&items, Some(&mut rng));
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let items: Vec<u32> = (0..20).collect();
        let original = items.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let _ = fisher_yates(&items, Some(&mut rng));
        assert_eq!(items, original);
    }

    #[test]
    fn test_empty_and_singleton_unchanged() {
        let empty: Vec<u32> = vec![];
        assert_eq!(fisher_yates(&empty, None), empty);

        let one = vec![9u32];
        assert_eq!(fisher_yates(&one, None), one);
    }

    #[test]
    fn test_unseeded_shuffle_permutes() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = fisher_yates(&items, None);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }
}
