//! Источники случайности для тасовки колоды.
//!
//! Раунд сам RNG не держит: `Poker::new_round_with` берёт любой
//! `RandomSource`, тасует им свежую колоду и дальше работает с ней.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::engine::RandomSource;

/// Боевой вариант: потоковый RNG ОС, каждая раздача непредсказуема.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }
}

/// Тасовка от seed: один и тот же seed даёт ту же последовательность колод.
///
/// Seed хранится, чтобы раздачу можно было переиграть по логу.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    seed: u64,
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
