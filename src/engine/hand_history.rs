use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Stage;
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerAction;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Игрок получил карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Действие игрока (включая блайнды).
    PlayerActed(PlayerAction),

    /// Открыты общие карты на борде.
    BoardDealt { stage: Stage, cards: Vec<Card> },

    /// Переход на новую стадию.
    StageChanged { stage: Stage },

    /// Выплата из конкретного пота.
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        amount: Chips,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раунда плюс действия, разложенные по стадиям.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
    round_actions: BTreeMap<Stage, Vec<PlayerAction>>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let index = self.events.len() as u32;
        self.events.push(HandEvent { index, kind });
    }

    /// Записать действие в лог стадии и в общую историю.
    pub fn record_action(&mut self, stage: Stage, action: PlayerAction) {
        self.round_actions.entry(stage).or_default().push(action.clone());
        self.push(HandEventKind::PlayerActed(action));
    }

    pub fn actions(&self, stage: Stage) -> &[PlayerAction] {
        self.round_actions.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Текстовый лог: по стадиям, одно действие на строку.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (stage, actions) in &self.round_actions {
            if actions.is_empty() {
                continue;
            }
            out.push_str(stage.name());
            out.push('\n');
            for action in actions {
                out.push_str(&action.to_string());
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}
