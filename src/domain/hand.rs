use core::fmt;

use serde::{Deserialize, Serialize};

/// Стадия раунда. Движется только вперёд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    RoundOver,
}

impl Stage {
    /// Четыре стадии со ставками (без терминальной).
    pub const BETTING: [Stage; 4] = [Stage::Preflop, Stage::Flop, Stage::Turn, Stage::River];

    /// Следующая стадия. У RoundOver следующей нет.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Preflop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::RoundOver),
            Stage::RoundOver => None,
        }
    }

    /// Сколько общих карт открывается при входе в эту стадию.
    pub fn cards_on_entry(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            Stage::Preflop | Stage::RoundOver => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Preflop => "PREFLOP",
            Stage::Flop => "FLOP",
            Stage::Turn => "TURN",
            Stage::River => "RIVER",
            Stage::RoundOver => "ROUND_OVER",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
