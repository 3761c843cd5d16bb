use serde::{Deserialize, Serialize};

use crate::engine::{ManagerError, TableManager};

use super::dto::{build_game_state, GameStateDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Состояние раунда на столе глазами игрока (или наблюдателя).
    GameState { room: String, viewer: Option<String> },

    /// Список комнат (для лобби).
    ListRooms,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    GameState(GameStateDto),
    Rooms(Vec<String>),
}

pub fn run_query(manager: &TableManager, query: &Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GameState { room, viewer } => {
            game_state(manager, room, viewer.as_deref()).map(QueryResponse::GameState)
        }
        Query::ListRooms => {
            let mut rooms: Vec<String> = manager.rooms().map(str::to_string).collect();
            rooms.sort();
            Ok(QueryResponse::Rooms(rooms))
        }
    }
}

/// Состояние текущего раунда на столе.
pub fn game_state(manager: &TableManager, room: &str, viewer: Option<&str>) -> Result<GameStateDto, ApiError> {
    let round = manager
        .table(room)?
        .round()
        .ok_or_else(|| ManagerError::NoActiveRound(room.to_string()))?;
    Ok(build_game_state(round, viewer))
}
