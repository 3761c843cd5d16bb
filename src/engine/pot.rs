use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{Player, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::side_pots::{compute_side_pots, SidePot};

/// Банк раунда: общая сумма, вклады по игрокам и состояние ставок стадии.
///
/// Вклады живут весь раунд (через все стадии) – по ним считаются сайд-поты.
/// Всё, что про "текущую ставку", сбрасывается в `next_stage`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    total: Chips,
    contributions: BTreeMap<SeatIndex, Chips>,
    /// Кто последним поставил/рейзнул и до какого уровня.
    last_bet_or_raise: Option<(SeatIndex, Chips)>,
    /// Минимальный прирост следующего рейза.
    min_raise_increment: Chips,
    /// Минимальная ставка на стадии (большой блайнд).
    minimum_bet: Chips,
    betting_started: bool,
    /// Уровень последнего полного рейза. Короткий олл-ин его не двигает.
    last_full_raise: Chips,
    /// Структура сайд-потов на момент последнего олл-ина.
    side_pots: Vec<SidePot>,
}

impl Pot {
    pub fn new(minimum_bet: Chips) -> Self {
        Self {
            total: Chips::ZERO,
            contributions: BTreeMap::new(),
            last_bet_or_raise: None,
            min_raise_increment: minimum_bet,
            minimum_bet,
            betting_started: false,
            last_full_raise: Chips::ZERO,
            side_pots: Vec::new(),
        }
    }

    pub fn total(&self) -> Chips {
        self.total
    }

    pub fn contributions(&self) -> &BTreeMap<SeatIndex, Chips> {
        &self.contributions
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions.get(&seat).copied().unwrap_or(Chips::ZERO)
    }

    pub fn add(&mut self, seat: SeatIndex, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        *self.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
        self.total += amount;
        self.betting_started = true;
    }

    pub fn minimum_bet(&self) -> Chips {
        self.minimum_bet
    }

    pub fn min_raise_increment(&self) -> Chips {
        self.min_raise_increment
    }

    pub fn betting_started(&self) -> bool {
        self.betting_started
    }

    pub fn last_bet_or_raise(&self) -> Option<(SeatIndex, Chips)> {
        self.last_bet_or_raise
    }

    pub fn last_full_raise(&self) -> Chips {
        self.last_full_raise
    }

    /// Сколько всего нужно иметь в ставке на этой стадии, чтобы "уравнять".
    pub fn call_amount(&self) -> Chips {
        self.last_bet_or_raise.map_or(Chips::ZERO, |(_, amount)| amount)
    }

    /// Минимальный уровень, до которого можно рейзнуть.
    pub fn minimum_raise(&self) -> Chips {
        self.min_raise_increment + self.call_amount()
    }

    /// Проверка нового уровня ставки без изменения состояния.
    pub fn validate_bet_or_raise(&self, amount: Chips, all_in: bool) -> Result<(), EngineError> {
        if amount <= self.call_amount() {
            return Err(EngineError::InvalidAmount(amount));
        }
        let increment = amount - self.call_amount();
        if increment < self.min_raise_increment && !all_in {
            return Err(EngineError::InvalidRaise {
                amount,
                minimum: self.minimum_raise(),
            });
        }
        Ok(())
    }

    /// Новый уровень ставки стадии.
    ///
    /// Полный рейз двигает минимальный прирост и `last_full_raise`;
    /// короткий олл-ин поднимает только уровень для колла.
    pub fn set_last_bet_or_raise(
        &mut self,
        seat: SeatIndex,
        amount: Chips,
        all_in: bool,
    ) -> Result<(), EngineError> {
        self.validate_bet_or_raise(amount, all_in)?;

        let increment = amount - self.call_amount();
        if increment >= self.min_raise_increment {
            self.min_raise_increment = increment;
            self.last_full_raise = amount;
        }
        self.last_bet_or_raise = Some((seat, amount));
        self.betting_started = true;
        Ok(())
    }

    /// Большой блайнд открывает префлоп полным уровнем, даже если сам
    /// игрок смог поставить меньше.
    pub fn open_with_blind(&mut self, seat: SeatIndex, big_blind: Chips) {
        self.last_bet_or_raise = Some((seat, big_blind));
        self.min_raise_increment = big_blind.max(self.minimum_bet);
        self.last_full_raise = big_blind;
        self.betting_started = true;
    }

    /// Сайд-поты по текущим вкладам. `final_settlement = false` – только
    /// структура слоёв олл-инов, без остатка.
    pub fn split_pot(&self, players: &[Player], final_settlement: bool) -> Vec<SidePot> {
        compute_side_pots(&self.contributions, players, self.total, final_settlement)
    }

    /// Запомнить промежуточную структуру сайд-потов (при очередном олл-ине).
    pub fn record_side_pots(&mut self, players: &[Player]) {
        self.side_pots = self.split_pot(players, false);
    }

    pub fn side_pots(&self) -> &[SidePot] {
        &self.side_pots
    }

    /// Итоговые поты для раздачи выигрыша.
    pub fn final_pots(&self, players: &[Player]) -> Vec<SidePot> {
        self.split_pot(players, true)
    }

    /// Сброс между стадиями. Вклады остаются.
    pub fn next_stage(&mut self) {
        self.last_bet_or_raise = None;
        self.min_raise_increment = self.minimum_bet;
        self.betting_started = false;
        self.last_full_raise = Chips::ZERO;
    }
}
