//! Стол: ростер игроков, конфиг блайндов и текущий раунд.

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::player::Player;
use crate::domain::table::TableConfig;
use crate::engine::errors::EngineError;
use crate::engine::round::Round;
use crate::engine::RandomSource;
use crate::infra::rng::SystemRng;

/// Покерный стол.
///
/// Пока идёт раунд, игроки живут внутри `Round` (в порядке раунда),
/// после расчёта возвращаются в ростер в исходном порядке.
#[derive(Clone, Debug)]
pub struct Poker {
    config: TableConfig,
    players: Vec<Player>,
    /// Место малого блайнда в ростере для следующего раунда.
    small_blind_index: usize,
    round: Option<Round>,
}

impl Poker {
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            players: Vec::new(),
            small_blind_index: 0,
            round: None,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn small_blind_index(&self) -> usize {
        self.small_blind_index
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    /// Идёт ли сейчас нерассчитанный раунд.
    pub fn round_in_progress(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.is_settled())
    }

    /// Игроки в порядке ростера (во время раунда – со стеками из раунда).
    pub fn players(&self) -> Vec<&Player> {
        match &self.round {
            Some(round) => {
                let in_round = round.players();
                let n = in_round.len();
                let rotation = round.rotation();
                (0..n).map(|i| &in_round[(i + n - rotation) % n]).collect()
            }
            None => self.players.iter().collect(),
        }
    }

    pub fn player_count(&self) -> usize {
        match &self.round {
            Some(round) => round.players().len(),
            None => self.players.len(),
        }
    }

    /// Забрать игроков из рассчитанного раунда обратно в ростер.
    fn reclaim_players(&mut self) -> Result<(), EngineError> {
        if self.round_in_progress() {
            return Err(EngineError::RoundInProgress);
        }
        if let Some(round) = self.round.take() {
            self.players = round.into_players();
        }
        Ok(())
    }

    /// Посадить игрока. Стек `None` – стартовый стек из конфига.
    pub fn add_player(&mut self, name: &str, stack: Option<Chips>) -> Result<(), EngineError> {
        self.reclaim_players()?;

        if self.players.iter().any(|p| p.name == name) {
            return Err(EngineError::DuplicatePlayer(name.to_string()));
        }
        if self.players.len() >= self.config.max_players {
            return Err(EngineError::TableFull(self.config.max_players));
        }

        let stack = stack.unwrap_or(self.config.default_stack);
        self.players.push(Player::new(name, stack));
        log::debug!("player {name} joined with {stack}");
        Ok(())
    }

    /// Убрать игрока из ростера между раундами.
    pub fn remove_player(&mut self, name: &str) -> Result<Player, EngineError> {
        self.reclaim_players()?;

        let index = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| EngineError::PlayerNotFound(name.to_string()))?;
        let player = self.players.remove(index);

        if index < self.small_blind_index {
            self.small_blind_index -= 1;
        }
        if self.small_blind_index >= self.players.len() {
            self.small_blind_index = 0;
        }
        log::debug!("player {name} left the table");
        Ok(player)
    }

    /// Выставить всем одинаковый стек.
    pub fn set_stacks(&mut self, amount: Chips) -> Result<(), EngineError> {
        self.reclaim_players()?;
        for player in self.players.iter_mut() {
            player.set_stack(amount);
        }
        Ok(())
    }

    /// Новый раунд с перемешанной системным RNG колодой.
    pub fn new_round(&mut self) -> Result<&mut Round, EngineError> {
        self.new_round_with(&mut SystemRng)
    }

    pub fn new_round_with<R: RandomSource>(&mut self, rng: &mut R) -> Result<&mut Round, EngineError> {
        let deck = Deck::shuffled(rng);
        self.new_round_with_deck(deck)
    }

    /// Новый раунд с заданной колодой. Малый блайнд сдвигается на одно место.
    pub fn new_round_with_deck(&mut self, deck: Deck) -> Result<&mut Round, EngineError> {
        self.reclaim_players()?;

        let funded = self.players.iter().filter(|p| !p.stack.is_zero()).count();
        if funded < 2 {
            return Err(EngineError::InsufficientPlayers(funded));
        }

        let rotation = self.small_blind_index % self.players.len();
        let round = Round::rotated(self.players.clone(), rotation, &self.config, deck)?;
        self.players.clear();
        // Следующий малый блайнд – место после того, кто реально его поставил.
        let n = round.players().len();
        self.small_blind_index = (rotation + round.small_blind_seat() + 1) % n;

        log::info!(
            "new round: {} players, small blind {} ({}/{})",
            round.players().len(),
            round.small_blind_player().name,
            self.config.small_blind,
            self.config.big_blind
        );
        Ok(self.round.insert(round))
    }
}
