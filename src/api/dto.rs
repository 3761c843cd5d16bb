use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Stage;
use crate::domain::player::{Player, PlayerStatus};
use crate::engine::{PlayerActionKind, Round, Showdown};

use super::errors::ApiError;

/// Тип действия в формате клиента.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Fold,
    Call,
    Raise,
    Check,
    Bet,
    SmallBlind,
    BigBlind,
}

/// Действие на проводе: `{"type": "RAISE", "amount": 40, "amountToCall": null}`.
///
/// Суммы со знаком: клиент может прислать что угодно, проверка – в `TryFrom`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionDto {
    #[serde(rename = "type")]
    pub kind: ActionType,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub amount_to_call: Option<i64>,
}

impl ActionDto {
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string(self)?)
    }

    fn with_amount(kind: ActionType, amount: Chips) -> Self {
        Self {
            kind,
            amount: Some(to_wire(amount)),
            amount_to_call: None,
        }
    }
}

fn to_wire(amount: Chips) -> i64 {
    i64::try_from(amount.0).unwrap_or(i64::MAX)
}

fn from_wire(amount: i64) -> Result<Chips, ApiError> {
    u64::try_from(amount)
        .map(Chips)
        .map_err(|_| ApiError::InvalidAmount(amount))
}

impl From<&PlayerActionKind> for ActionDto {
    fn from(action: &PlayerActionKind) -> Self {
        match action {
            PlayerActionKind::Fold => ActionDto {
                kind: ActionType::Fold,
                amount: None,
                amount_to_call: None,
            },
            PlayerActionKind::Check => ActionDto {
                kind: ActionType::Check,
                amount: None,
                amount_to_call: None,
            },
            PlayerActionKind::Call(to_call) => ActionDto {
                kind: ActionType::Call,
                amount: None,
                amount_to_call: Some(to_wire(*to_call)),
            },
            PlayerActionKind::Bet(amount) => ActionDto::with_amount(ActionType::Bet, *amount),
            PlayerActionKind::Raise(amount) => ActionDto::with_amount(ActionType::Raise, *amount),
            PlayerActionKind::SmallBlind(amount) => {
                ActionDto::with_amount(ActionType::SmallBlind, *amount)
            }
            PlayerActionKind::BigBlind(amount) => ActionDto::with_amount(ActionType::BigBlind, *amount),
        }
    }
}

impl TryFrom<ActionDto> for PlayerActionKind {
    type Error = ApiError;

    fn try_from(dto: ActionDto) -> Result<Self, Self::Error> {
        let required = |amount: Option<i64>| {
            amount
                .ok_or_else(|| ApiError::BadRequest(format!("{:?} без суммы", dto.kind)))
                .and_then(from_wire)
        };

        Ok(match dto.kind {
            ActionType::Fold => PlayerActionKind::Fold,
            ActionType::Check => PlayerActionKind::Check,
            ActionType::Call => PlayerActionKind::Call(from_wire(dto.amount_to_call.unwrap_or(0))?),
            ActionType::Bet => PlayerActionKind::Bet(required(dto.amount)?),
            ActionType::Raise => PlayerActionKind::Raise(required(dto.amount)?),
            ActionType::SmallBlind => PlayerActionKind::SmallBlind(required(dto.amount)?),
            ActionType::BigBlind => PlayerActionKind::BigBlind(required(dto.amount)?),
        })
    }
}

/// DTO игрока в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub status: PlayerStatus,
    /// Карманные карты – только для самого игрока или после вскрытия.
    pub hole_cards: Option<Vec<Card>>,
    pub last_action: Option<ActionDto>,
}

/// Чей ход и что ему можно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TurnDto {
    pub player: String,
    pub actions: Vec<ActionDto>,
}

/// Итог раунда для клиента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WinnerDto {
    pub players: Vec<String>,
    /// Выигрышная пятёрка. Нет, если все остальные сфолдили.
    pub hand: Option<Vec<Card>>,
    pub rank: Option<String>,
}

/// Полное состояние раунда глазами одного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDto {
    pub players: Vec<PlayerDto>,
    pub stage: Stage,
    pub pot: Chips,
    pub board: Vec<Card>,
    pub current_turn: Option<TurnDto>,
    pub winners: Option<WinnerDto>,
}

impl GameStateDto {
    pub fn to_json(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn build_player(player: &Player, visible: bool) -> PlayerDto {
    PlayerDto {
        name: player.name.clone(),
        stack: player.stack,
        bet: player.current_round_bet(),
        status: player.status(),
        hole_cards: visible.then(|| player.hole_cards().to_vec()),
        last_action: player.last_action().map(ActionDto::from),
    }
}

fn build_winners(round: &Round, showdown: &Showdown) -> WinnerDto {
    WinnerDto {
        players: showdown
            .winners
            .iter()
            .filter_map(|&seat| round.player(seat))
            .map(|p| p.name.clone())
            .collect(),
        hand: showdown.hand.map(|cards| cards.to_vec()),
        rank: showdown.label.clone(),
    }
}

/// Собрать состояние раунда для `viewer` (None – наблюдатель).
///
/// Чужие карты видны только после вскрытия, и только у не сфолдивших.
pub fn build_game_state(round: &Round, viewer: Option<&str>) -> GameStateDto {
    let showdown = round.showdown();
    let contested = showdown.is_some_and(|s| s.hand.is_some());

    let players = round
        .players()
        .iter()
        .map(|p| {
            let visible = viewer == Some(p.name.as_str()) || (contested && p.in_hand());
            build_player(p, visible)
        })
        .collect();

    let current_turn = round
        .current_player_and_actions()
        .ok()
        .map(|(player, actions)| TurnDto {
            player: player.name.clone(),
            actions: actions.iter().map(ActionDto::from).collect(),
        });

    GameStateDto {
        players,
        stage: round.stage(),
        pot: round.pot().total(),
        board: round.board().to_vec(),
        current_turn,
        winners: showdown.map(|s| build_winners(round, s)),
    }
}
