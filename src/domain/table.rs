use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::errors::EngineError;

/// Больше игроков колода не раздаст: 2 карты на игрока + 5 на борд.
pub const DECK_SEAT_LIMIT: usize = 22;

/// Конфиг стола: блайнды, вместимость, стартовый стек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Максимальное количество игроков за столом.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
    /// Стек, с которым садится игрок, если сумму не указали.
    #[serde(default = "default_stack")]
    pub default_stack: Chips,
}

fn default_max_players() -> usize {
    9
}

fn default_stack() -> Chips {
    Chips(1_000)
}

impl TableConfig {
    /// Конфиг по малому блайнду: большой блайнд = 2 × малый.
    pub fn with_small_blind(small_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind: Chips(small_blind.0.saturating_mul(2)),
            max_players: default_max_players(),
            default_stack: default_stack(),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.small_blind.is_zero() {
            return Err(EngineError::InvalidConfig("small_blind = 0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(EngineError::InvalidConfig(format!(
                "big_blind ({}) < small_blind ({})",
                self.big_blind, self.small_blind
            )));
        }
        if !(2..=DECK_SEAT_LIMIT).contains(&self.max_players) {
            return Err(EngineError::InvalidConfig(format!(
                "max_players = {} (допустимо 2..={DECK_SEAT_LIMIT})",
                self.max_players
            )));
        }
        Ok(())
    }

    /// Загрузить конфиг из JSON и сразу проверить.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let config: TableConfig =
            serde_json::from_str(raw).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::with_small_blind(Chips(10))
    }
}
