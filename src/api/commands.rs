use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::{ManagerError, PlayerActionKind, RandomSource, Round, TableManager};
use crate::infra::SystemRng;

use super::dto::{build_game_state, ActionDto, GameStateDto};
use super::errors::ApiError;

/// Команда к столу в комнате.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Сесть за стол. Без стека – стартовый стек из конфига.
    JoinTable {
        player_name: String,
        #[serde(default)]
        stack: Option<Chips>,
    },

    /// Запустить раунд: раздать карты и поставить блайнды.
    StartRound,

    /// Ход игрока. Ходит всегда текущий игрок, имя только сверяется.
    Act {
        player_name: String,
        action: ActionDto,
    },
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Игрок сел за стол.
    Seated { player_name: String, stack: Chips },

    /// Состояние раунда после команды (с итогом, если раунд закончился).
    State(GameStateDto),
}

/// Выполнить команду с системным RNG.
pub fn execute(manager: &mut TableManager, room: &str, command: Command) -> Result<CommandResponse, ApiError> {
    execute_with(manager, room, command, &mut SystemRng)
}

pub fn execute_with<R: RandomSource>(
    manager: &mut TableManager,
    room: &str,
    command: Command,
    rng: &mut R,
) -> Result<CommandResponse, ApiError> {
    let table = manager.table_mut(room)?;

    match command {
        Command::JoinTable { player_name, stack } => {
            table.add_player(&player_name, stack)?;
            let stack = stack.unwrap_or(table.config().default_stack);
            Ok(CommandResponse::Seated { player_name, stack })
        }

        Command::StartRound => {
            let round = table.new_round_with(rng)?;
            round.deal()?;
            round.post_blinds()?;
            finish_if_over(round)?;
            Ok(CommandResponse::State(build_game_state(round, None)))
        }

        Command::Act { player_name, action } => {
            let round = table
                .round_mut()
                .ok_or_else(|| ManagerError::NoActiveRound(room.to_string()))?;
            let action = PlayerActionKind::try_from(action)?;

            if let Err(err) = round.player_action_as(&player_name, action) {
                log::warn!("room {room}: action of {player_name} rejected: {err}");
                return Err(err.into());
            }

            finish_if_over(round)?;
            Ok(CommandResponse::State(build_game_state(round, Some(&player_name))))
        }
    }
}

/// Закончившийся раунд сразу вскрываем и рассчитываем.
fn finish_if_over(round: &mut Round) -> Result<(), ApiError> {
    if !round.betting_round_over() || round.is_settled() {
        return Ok(());
    }
    round.reveal()?;
    round.distribute_winnings()?;
    Ok(())
}
