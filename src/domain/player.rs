use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;

/// Статус игрока в контексте текущего раунда.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок в раздаче и может ходить.
    #[default]
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в олл-ине – больше не ходит до конца раунда.
    AllIn,
    /// Сидит за столом с пустым стеком, в раунде не участвует.
    SittingOut,
}

/// Состояние игрока, которое живёт ровно один раунд.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundProfile {
    /// Сколько поставлено на текущей стадии.
    pub bet: Chips,
    pub status: PlayerStatus,
    pub last_action: Option<PlayerActionKind>,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Лучшие 5 карт после шоудауна.
    pub best_hand: Option<[Card; 5]>,
}

impl RoundProfile {
    /// Сброс между стадиями: ставка и последнее действие.
    /// Фолд, олл-ин и карты остаются.
    pub fn next_stage(&mut self) {
        self.bet = Chips::ZERO;
        self.last_action = None;
    }
}

/// Игрок за столом. Между раундами сохраняется только стек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub stack: Chips,
    pub profile: RoundProfile,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            profile: RoundProfile::default(),
        }
    }

    pub fn current_round_bet(&self) -> Chips {
        self.profile.bet
    }

    pub fn status(&self) -> PlayerStatus {
        self.profile.status
    }

    pub fn folded(&self) -> bool {
        self.profile.status == PlayerStatus::Folded
    }

    pub fn all_in(&self) -> bool {
        self.profile.status == PlayerStatus::AllIn
    }

    pub fn sitting_out(&self) -> bool {
        self.profile.status == PlayerStatus::SittingOut
    }

    /// Претендует на банк: не сфолдил и участвует в раунде.
    pub fn in_hand(&self) -> bool {
        matches!(self.profile.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ещё делать ходы в этом раунде.
    pub fn can_act(&self) -> bool {
        self.profile.status == PlayerStatus::Active
    }

    pub fn last_action(&self) -> Option<&PlayerActionKind> {
        self.profile.last_action.as_ref()
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.profile.hole_cards
    }

    /// Сколько нужно доплатить до уровня `target`.
    pub fn amount_to_call(&self, target: Chips) -> Chips {
        target.saturating_sub(self.profile.bet)
    }

    /// Перенести фишки из стека в ставку текущей стадии.
    pub fn make_bet(&mut self, amount: Chips) -> Result<(), EngineError> {
        if amount > self.stack {
            return Err(EngineError::InvalidAmount(amount));
        }
        self.stack -= amount;
        self.profile.bet += amount;
        if self.stack.is_zero() && !amount.is_zero() {
            self.profile.status = PlayerStatus::AllIn;
        }
        Ok(())
    }

    /// Блайнд: ставится сколько есть, короткий стек уходит в олл-ин.
    fn post_blind(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.profile.bet += paid;
        if self.stack.is_zero() {
            self.profile.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn post_small_blind(&mut self, amount: Chips) -> Chips {
        let paid = self.post_blind(amount);
        self.profile.last_action = Some(PlayerActionKind::SmallBlind(paid));
        paid
    }

    pub fn post_big_blind(&mut self, amount: Chips) -> Chips {
        let paid = self.post_blind(amount);
        self.profile.last_action = Some(PlayerActionKind::BigBlind(paid));
        paid
    }

    /// Свежая ставка на стадии без ставок. Возвращает флаг олл-ина.
    pub fn bet(&mut self, amount: Chips) -> Result<bool, EngineError> {
        if amount.is_zero() || amount > self.stack {
            return Err(EngineError::InvalidAmount(amount));
        }
        self.make_bet(amount)?;
        self.profile.last_action = Some(PlayerActionKind::Bet(amount));
        Ok(self.all_in())
    }

    /// Уравнять до уровня `target`. Если стека не хватает – олл-ин на остаток.
    ///
    /// Возвращает (сколько реально доставлено, олл-ин ли).
    pub fn call(&mut self, target: Chips) -> Result<(Chips, bool), EngineError> {
        if target < self.profile.bet {
            return Err(EngineError::InvalidAmount(target));
        }
        let paid = self.amount_to_call(target).min(self.stack);
        self.make_bet(paid)?;
        self.profile.last_action = Some(PlayerActionKind::Call(paid));
        Ok((paid, self.all_in()))
    }

    /// Рейз до уровня `target` (сумма ставки на стадии, не прирост).
    ///
    /// Возвращает (сколько добавлено в банк, олл-ин ли).
    pub fn raise_bet(&mut self, target: Chips) -> Result<(Chips, bool), EngineError> {
        let added = target
            .checked_sub(self.profile.bet)
            .ok_or(EngineError::InvalidAmount(target))?;
        if added.is_zero() || added > self.stack {
            return Err(EngineError::InvalidAmount(target));
        }
        self.make_bet(added)?;
        self.profile.last_action = Some(PlayerActionKind::Raise(target));
        Ok((added, self.all_in()))
    }

    pub fn fold(&mut self) {
        self.profile.status = PlayerStatus::Folded;
        self.profile.last_action = Some(PlayerActionKind::Fold);
    }

    pub fn check(&mut self) {
        self.profile.last_action = Some(PlayerActionKind::Check);
    }

    /// Выигрыш банка.
    pub fn win(&mut self, amount: Chips) {
        self.stack += amount;
    }

    pub fn set_stack(&mut self, amount: Chips) {
        self.stack = amount;
    }

    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.profile.hole_cards = cards;
    }

    pub fn next_stage(&mut self) {
        self.profile.next_stage();
    }

    /// Новый раунд: чистый профиль. Пустой стек сидит без игры.
    pub fn reset(&mut self) {
        self.profile = RoundProfile::default();
        if self.stack.is_zero() {
            self.profile.status = PlayerStatus::SittingOut;
        }
    }
}
