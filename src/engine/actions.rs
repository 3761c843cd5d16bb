use core::fmt;
use core::mem::discriminant;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};

/// Тип действия игрока вместе с суммой.
///
/// Суммы `Bet`/`Raise` – это уровень ставки игрока на текущей стадии
/// (для `Bet` он совпадает с приростом). `Call` в списке легальных
/// действий несёт сумму к доплате, а в `last_action` – сколько реально внесено.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call(Chips),
    /// Bet на стадии, где ещё нет ставки.
    Bet(Chips),
    /// Raise существующей ставки.
    Raise(Chips),
    SmallBlind(Chips),
    BigBlind(Chips),
}

impl PlayerActionKind {
    /// Тот же вид действия, без учёта суммы.
    pub fn same_kind(&self, other: &PlayerActionKind) -> bool {
        discriminant(self) == discriminant(other)
    }

    pub fn amount(&self) -> Option<Chips> {
        match self {
            PlayerActionKind::Fold | PlayerActionKind::Check => None,
            PlayerActionKind::Call(a)
            | PlayerActionKind::Bet(a)
            | PlayerActionKind::Raise(a)
            | PlayerActionKind::SmallBlind(a)
            | PlayerActionKind::BigBlind(a) => Some(*a),
        }
    }

    /// Bet/Raise – агрессия, сбрасывает "походивших".
    pub fn is_aggressive(&self) -> bool {
        matches!(self, PlayerActionKind::Bet(_) | PlayerActionKind::Raise(_))
    }

    pub fn is_blind(&self) -> bool {
        matches!(self, PlayerActionKind::SmallBlind(_) | PlayerActionKind::BigBlind(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "FOLD",
            PlayerActionKind::Check => "CHECK",
            PlayerActionKind::Call(_) => "CALL",
            PlayerActionKind::Bet(_) => "BET",
            PlayerActionKind::Raise(_) => "RAISE",
            PlayerActionKind::SmallBlind(_) => "SMALL_BLIND",
            PlayerActionKind::BigBlind(_) => "BIG_BLIND",
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{} {}", self.name(), amount),
            None => f.write_str(self.name()),
        }
    }
}

/// Действие, записанное в историю стадии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub seat: SeatIndex,
    pub player_name: String,
    pub kind: PlayerActionKind,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.player_name, self.kind)
    }
}
