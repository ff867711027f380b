use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Builder;

/// Uniformly shuffled `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut values: Vec<usize> = (0..n).collect();
    values.shuffle(rng);
    values
}

/// Random version 4 UUID in hyphenated form, e.g. `0f8fad5b-d9cb-469f-a165-70867728950e`.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.random())
        .into_uuid()
        .hyphenated()
        .to_string()
}
