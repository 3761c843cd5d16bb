use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битый JSON, нет обязательного поля).
    #[error("некорректный запрос: {0}")]
    BadRequest(String),

    /// Отрицательная сумма в действии.
    #[error("недопустимая сумма: {0}")]
    InvalidAmount(i64),

    /// Стол не найден.
    #[error("стол {0} не найден")]
    TableNotFound(String),

    /// Стол с таким id уже есть.
    #[error("стол {0} уже существует")]
    TableExists(String),

    /// На столе нет раунда.
    #[error("на столе {0} нет активного раунда")]
    NoActiveRound(String),

    /// Ошибка движка (ставки, действия, состав стола).
    #[error("{0}")]
    EngineError(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineError(err.to_string())
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(room) => ApiError::TableNotFound(room),
            ManagerError::TableExists(room) => ApiError::TableExists(room),
            ManagerError::NoActiveRound(room) => ApiError::NoActiveRound(room),
            ManagerError::Engine(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
