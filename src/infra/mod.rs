//! Инфраструктурный слой вокруг покерного движка:
//! RNG-реализации для тасовки колоды.

pub mod rng;

pub use rng::*;
