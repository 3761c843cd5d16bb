use std::collections::HashMap;

use thiserror::Error;

use crate::domain::table::TableConfig;
use crate::engine::errors::EngineError;
use crate::engine::poker::Poker;

/// Ошибки уровня менеджера столов (над движком одного стола).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    /// Стол с таким ID не найден.
    #[error("стол {0} не найден")]
    TableNotFound(String),

    /// Стол с таким ID уже создан.
    #[error("стол {0} уже существует")]
    TableExists(String),

    /// На столе ещё не запущен раунд.
    #[error("на столе {0} нет активного раунда")]
    NoActiveRound(String),

    /// Проброшенная ошибка из движка.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Менеджер столов:
/// - хранит столы по id комнаты;
/// - создаёт и удаляет их явно, глобального состояния нет.
///
/// Мутации идут через `&mut self`; адаптер, который делит менеджер между
/// задачами, держит его под одним мьютексом.
#[derive(Debug, Default)]
pub struct TableManager {
    tables: HashMap<String, Poker>,
}

impl TableManager {
    /// Создать пустой менеджер.
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать стол под id комнаты.
    pub fn create_table(&mut self, room: &str, config: TableConfig) -> Result<&mut Poker, ManagerError> {
        if self.tables.contains_key(room) {
            return Err(ManagerError::TableExists(room.to_string()));
        }
        let poker = Poker::new(config)?;
        log::info!("table {room} created");
        Ok(self.tables.entry(room.to_string()).or_insert(poker))
    }

    /// Снять стол. Возвращает его последнее состояние.
    pub fn remove_table(&mut self, room: &str) -> Result<Poker, ManagerError> {
        let poker = self
            .tables
            .remove(room)
            .ok_or_else(|| ManagerError::TableNotFound(room.to_string()))?;
        log::info!("table {room} removed");
        Ok(poker)
    }

    /// Есть ли стол с таким id.
    pub fn has_table(&self, room: &str) -> bool {
        self.tables.contains_key(room)
    }

    pub fn table(&self, room: &str) -> Result<&Poker, ManagerError> {
        self.tables
            .get(room)
            .ok_or_else(|| ManagerError::TableNotFound(room.to_string()))
    }

    pub fn table_mut(&mut self, room: &str) -> Result<&mut Poker, ManagerError> {
        self.tables
            .get_mut(room)
            .ok_or_else(|| ManagerError::TableNotFound(room.to_string()))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
