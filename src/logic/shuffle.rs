//! Random permutation with an injected random source.

use rand::seq::SliceRandom;
use rand::Rng;

/// Return a uniformly shuffled copy of `items` (Fisher–Yates); `items` is left untouched.
///
/// Reproducibility depends entirely on `rng`: pass a seeded generator to get the same
/// permutation every time.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
