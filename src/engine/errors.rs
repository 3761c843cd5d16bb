use crate::domain::chips::Chips;
use crate::domain::hand::Stage;

use thiserror::Error;

/// Ошибки движка покера.
///
/// Любая ошибка возвращается до изменения состояния: действие либо
/// применилось целиком, либо не применилось вовсе.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Недопустимая сумма: {0}")]
    InvalidAmount(Chips),

    #[error("Рейз до {amount} меньше минимального ({minimum}) и это не олл-ин")]
    InvalidRaise { amount: Chips, minimum: Chips },

    #[error("Недопустимое действие: {0}")]
    InvalidAction(String),

    #[error("Раунд ещё не закончен")]
    RoundNotOver,

    #[error("Раунд уже закончен")]
    RoundOver,

    #[error("Недостаточно игроков для раунда: {0}")]
    InsufficientPlayers(usize),

    #[error("Блайнды ещё не поставлены")]
    BlindsNotPosted,

    #[error("Выигрыш уже распределён")]
    AlreadySettled,

    #[error("Нельзя перейти со стадии {from} на {to}")]
    InvalidStage { from: Stage, to: Stage },

    #[error("В колоде закончились карты")]
    DeckExhausted,

    #[error("Для оценки руки нужно 5–7 карт, получено {0}")]
    InvalidCardCount(usize),

    #[error("Не удалось разобрать карту: {0:?}")]
    InvalidCard(String),

    #[error("Игрок {0} не найден")]
    PlayerNotFound(String),

    #[error("Игрок {0} уже за столом")]
    DuplicatePlayer(String),

    #[error("Стол заполнен ({0} мест)")]
    TableFull(usize),

    #[error("Идёт раунд – состав стола менять нельзя")]
    RoundInProgress,

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(String),
}
