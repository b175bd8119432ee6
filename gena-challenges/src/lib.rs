use ahash::RandomState;

macro_rules! conditional_pub {
    (fn $name:ident $($rest:tt)*) => {
        #[cfg(not(feature = "hide_verification"))]
        pub fn $name $($rest)*

        #[cfg(feature = "hide_verification")]
        fn $name $($rest)*
    };
}

/// Builds a deterministic hasher from a challenge seed, so that two runs over
/// the same challenge visit states in the same order.
pub fn seeded_hasher(seed: &[u8; 32]) -> RandomState {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(seed.chunks_exact(8)) {
        *word = chunk.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
    }
    RandomState::with_seeds(words[0], words[1], words[2], words[3])
}
pub type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

pub mod tower;
