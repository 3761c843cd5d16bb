//! Движок No-Limit Texas Hold'em.
//!
//! Слои:
//! - `domain` – фишки, карты, колода, игроки, конфиг стола;
//! - `eval` – оценка рук;
//! - `engine` – банк и сайд-поты, раунд, стол, менеджер столов;
//! - `infra` – RNG;
//! - `api` – формат для клиента и команды адаптера.
//!
//! Логгер библиотека не ставит: бэкенд для `log` выбирает приложение.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
