//! Покерный движок: ставки, переход стадий, сайд-поты, шоудаун.
//!
//! Высокоуровневые объекты: `Poker` (стол) и `Round` (одна раздача).
//! Основные операции раунда:
//!   - `deal` / `post_blinds` – начать раздачу
//!   - `current_player_and_actions` – кто ходит и что ему можно
//!   - `player_action` – применить действие
//!   - `reveal` / `distribute_winnings` – шоудаун и выплаты

pub mod actions;
pub mod errors;
pub mod hand_history;
pub mod poker;
pub mod pot;
pub mod round;
pub mod side_pots;
pub mod table_manager;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use poker::Poker;
pub use pot::Pot;
pub use round::{PotAward, RankedGroup, Round, Showdown};
pub use side_pots::{compute_side_pots, SidePot};
pub use table_manager::{ManagerError, TableManager};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
