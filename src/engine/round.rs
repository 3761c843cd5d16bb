//! Раунд – машина состояний одной раздачи.
//!
//! PREFLOP → FLOP → TURN → RIVER → ROUND_OVER, только вперёд.
//! Ходит всегда игрок под указателем `current`; имя из запроса лишь
//! сверяется с ним (`player_action_as`).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Stage;
use crate::domain::player::Player;
use crate::domain::table::TableConfig;
use crate::domain::SeatIndex;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::pot::Pot;
use crate::eval::{HandCategory, HandEvaluation, HandEvaluator, StandardEvaluator};

/// Игроки с одинаковой силой руки (делят банк).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedGroup {
    pub evaluation: HandEvaluation,
    pub seats: Vec<SeatIndex>,
}

/// Итог шоудауна. Без конкурентов (все сфолдили) рука не показывается.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Showdown {
    pub winners: Vec<SeatIndex>,
    pub hand: Option<[Card; 5]>,
    pub category: Option<HandCategory>,
    /// Название руки ("Full House", "Royal Flush", ...).
    pub label: Option<String>,
}

/// Выплата из одного пота.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub pot_index: usize,
    pub amount: Chips,
    /// (seat, сколько получил). Лишние фишки уже разнесены.
    pub shares: Vec<(SeatIndex, Chips)>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    /// Порядок раунда: ростер, сдвинутый на `rotation`.
    players: Vec<Player>,
    rotation: usize,
    pot: Pot,
    deck: Deck,
    board: Vec<Card>,
    stage: Stage,
    small_blind: Chips,
    big_blind: Chips,
    small_blind_seat: SeatIndex,
    big_blind_seat: SeatIndex,
    current: SeatIndex,
    /// Уравняли текущий уровень или в олл-ине.
    action_complete: BTreeSet<SeatIndex>,
    /// В порядке ухода в олл-ин.
    all_ins: Vec<SeatIndex>,
    history: HandHistory,
    /// Результат последнего `reveal`.
    showdown: Option<Showdown>,
    dealt: bool,
    blinds_posted: bool,
    settled: bool,
}

impl Round {
    /// Раунд для игроков в порядке: [малый блайнд, большой блайнд, ...].
    pub fn new(players: Vec<Player>, config: &TableConfig, deck: Deck) -> Result<Self, EngineError> {
        Self::rotated(players, 0, config, deck)
    }

    /// Раунд по ростеру, сдвинутому влево на `rotation` мест.
    pub(crate) fn rotated(
        mut players: Vec<Player>,
        rotation: usize,
        config: &TableConfig,
        deck: Deck,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let funded = players.iter().filter(|p| !p.stack.is_zero()).count();
        if funded < 2 {
            return Err(EngineError::InsufficientPlayers(funded));
        }

        let rotation = rotation % players.len();
        players.rotate_left(rotation);
        for player in players.iter_mut() {
            player.reset();
        }

        let mut round = Self {
            players,
            rotation,
            pot: Pot::new(config.big_blind),
            deck,
            board: Vec::new(),
            stage: Stage::Preflop,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            small_blind_seat: 0,
            big_blind_seat: 0,
            current: 0,
            action_complete: BTreeSet::new(),
            all_ins: Vec::new(),
            history: HandHistory::new(),
            showdown: None,
            dealt: false,
            blinds_posted: false,
            settled: false,
        };

        round.small_blind_seat = round.next_seat_from(0, |p| !p.sitting_out()).unwrap_or(0);
        round.big_blind_seat = round
            .next_seat_from(round.small_blind_seat + 1, |p| !p.sitting_out())
            .unwrap_or(0);
        round.current = round.small_blind_seat;

        Ok(round)
    }

    /// Вернуть игроков в порядке ростера (снять сдвиг).
    pub fn into_players(self) -> Vec<Player> {
        let mut players = self.players;
        players.rotate_right(self.rotation);
        players
    }

    // ----------------------------------------------------------------
    // Чтение состояния
    // ----------------------------------------------------------------

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn seat_of(&self, name: &str) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn small_blind_player(&self) -> &Player {
        &self.players[self.small_blind_seat]
    }

    pub fn big_blind_player(&self) -> &Player {
        &self.players[self.big_blind_seat]
    }

    /// На сколько мест сдвинут ростер стола.
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn small_blind_seat(&self) -> SeatIndex {
        self.small_blind_seat
    }

    pub fn big_blind_seat(&self) -> SeatIndex {
        self.big_blind_seat
    }

    pub fn current_seat(&self) -> SeatIndex {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn action_complete_seats(&self) -> &BTreeSet<SeatIndex> {
        &self.action_complete
    }

    pub fn all_in_seats(&self) -> &[SeatIndex] {
        &self.all_ins
    }

    /// Действия, записанные на стадии (включая блайнды на префлопе).
    pub fn actions(&self, stage: Stage) -> &[PlayerAction] {
        self.history.actions(stage)
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn showdown(&self) -> Option<&Showdown> {
        self.showdown.as_ref()
    }

    pub fn betting_round_over(&self) -> bool {
        self.stage == Stage::RoundOver
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn blinds_posted(&self) -> bool {
        self.blinds_posted
    }

    /// Ходить может только один игрок, и ему нечего доплачивать.
    fn lone_actor_is_covered(&self) -> bool {
        let call_level = self.pot.call_amount();
        let mut actors = self.players.iter().filter(|p| p.can_act());
        match (actors.next(), actors.next()) {
            (Some(player), None) => player.amount_to_call(call_level).is_zero(),
            _ => false,
        }
    }

    fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    fn can_act_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Первый seat начиная со `start` (включительно), по кругу, подходящий под `pred`.
    fn next_seat_from(&self, start: SeatIndex, pred: impl Fn(&Player) -> bool) -> Option<SeatIndex> {
        let n = self.players.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&seat| pred(&self.players[seat]))
    }

    // ----------------------------------------------------------------
    // Раздача и блайнды
    // ----------------------------------------------------------------

    /// Раздать по 2 карманные карты всем участникам, по кругу от малого блайнда.
    pub fn deal(&mut self) -> Result<(), EngineError> {
        if self.dealt {
            return Err(EngineError::InvalidAction("карты уже розданы".into()));
        }
        if self.betting_round_over() {
            return Err(EngineError::RoundOver);
        }

        let n = self.players.len();
        let order: Vec<SeatIndex> = (0..n)
            .map(|offset| (self.small_blind_seat + offset) % n)
            .filter(|&seat| !self.players[seat].sitting_out())
            .collect();
        if self.deck.len() < order.len() * 2 {
            return Err(EngineError::DeckExhausted);
        }

        let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(2); order.len()];
        for _ in 0..2 {
            for hand in hands.iter_mut() {
                hand.push(self.deck.draw_one()?);
            }
        }

        for (&seat, cards) in order.iter().zip(hands) {
            self.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: cards.clone(),
            });
            self.players[seat].set_cards(cards);
        }

        self.dealt = true;
        log::debug!("hole cards dealt to {} players", order.len());
        Ok(())
    }

    /// Поставить блайнды и передать ход первому после большого блайнда.
    pub fn post_blinds(&mut self) -> Result<(), EngineError> {
        if self.betting_round_over() {
            return Err(EngineError::RoundOver);
        }
        if !self.dealt {
            return Err(EngineError::InvalidAction("карты ещё не розданы".into()));
        }
        if self.blinds_posted || self.stage != Stage::Preflop {
            return Err(EngineError::InvalidAction("блайнды уже поставлены".into()));
        }

        let (sb, bb) = (self.small_blind_seat, self.big_blind_seat);

        let paid = self.players[sb].post_small_blind(self.small_blind);
        self.pot.add(sb, paid);
        self.after_commit(sb);

        let paid = self.players[bb].post_big_blind(self.big_blind);
        self.pot.add(bb, paid);
        self.pot.open_with_blind(bb, self.big_blind);
        self.after_commit(bb);

        self.blinds_posted = true;
        log::debug!(
            "blinds posted: {} {} / {} {}",
            self.players[sb].name,
            self.small_blind,
            self.players[bb].name,
            self.big_blind
        );

        self.resolve_after_action(bb)
    }

    /// Записать последнее действие игрока и учесть олл-ин.
    fn after_commit(&mut self, seat: SeatIndex) {
        if self.players[seat].all_in() && !self.all_ins.contains(&seat) {
            self.all_ins.push(seat);
            self.pot.record_side_pots(&self.players);
        }

        let Some(kind) = self.players[seat].last_action().cloned() else {
            return;
        };

        if kind.is_aggressive() {
            self.action_complete = self.in_hand_all_ins();
            self.action_complete.insert(seat);
        } else if matches!(kind, PlayerActionKind::Call(_) | PlayerActionKind::Check)
            || self.players[seat].all_in()
        {
            self.action_complete.insert(seat);
        }

        let action = PlayerAction {
            seat,
            player_name: self.players[seat].name.clone(),
            kind,
        };
        log::debug!("{} {}", self.stage, action);
        self.history.record_action(self.stage, action);
    }

    fn in_hand_all_ins(&self) -> BTreeSet<SeatIndex> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.all_in())
            .map(|(seat, _)| seat)
            .collect()
    }

    // ----------------------------------------------------------------
    // Ходы
    // ----------------------------------------------------------------

    /// Текущий игрок и его легальные действия.
    pub fn current_player_and_actions(&self) -> Result<(&Player, Vec<PlayerActionKind>), EngineError> {
        if self.betting_round_over() {
            return Err(EngineError::RoundOver);
        }
        if self.stage == Stage::Preflop && !self.blinds_posted {
            return Err(EngineError::BlindsNotPosted);
        }
        Ok((self.current_player(), self.legal_actions(self.current)))
    }

    fn legal_actions(&self, seat: SeatIndex) -> Vec<PlayerActionKind> {
        use PlayerActionKind::*;

        let player = &self.players[seat];
        let call_level = self.pot.call_amount();
        let to_call = player.amount_to_call(call_level);
        let opening_bet = self.pot.minimum_bet().min(player.stack);
        let raise_to = self
            .pot
            .minimum_raise()
            .min(player.current_round_bet() + player.stack);

        if !self.pot.betting_started() {
            return vec![Check, Bet(opening_bet)];
        }

        let big_blind_option = seat == self.big_blind_seat
            && self.stage == Stage::Preflop
            && matches!(player.last_action(), Some(BigBlind(_)));

        if to_call.is_zero() && big_blind_option {
            return vec![Check, Raise(raise_to)];
        }

        if !to_call.is_zero() {
            let mut actions = vec![Fold, Call(to_call)];
            // После короткого олл-ина тот, кто уже уравнял полный рейз, рейзить не может.
            // Пока полного бета на стадии не было, закрывать нечего.
            let full_raise = self.pot.last_full_raise();
            let reopened = full_raise.is_zero()
                || player.current_round_bet() != full_raise
                || player.last_action().is_some_and(PlayerActionKind::is_blind);
            if to_call < player.stack && reopened {
                actions.push(Raise(raise_to));
            }
            return actions;
        }

        if call_level.is_zero() {
            vec![Check, Bet(opening_bet)]
        } else {
            vec![Check, Raise(raise_to)]
        }
    }

    /// Применить действие текущего игрока.
    pub fn player_action(&mut self, action: PlayerActionKind) -> Result<(), EngineError> {
        if !self.dealt {
            return Err(EngineError::InvalidAction("карты ещё не розданы".into()));
        }
        let legal = self.current_player_and_actions()?.1;
        if !legal.iter().any(|a| a.same_kind(&action)) {
            return Err(EngineError::InvalidAction(format!(
                "{action} недоступно игроку {}",
                self.current_player().name
            )));
        }

        let seat = self.current;
        match action {
            PlayerActionKind::Fold => self.players[seat].fold(),
            PlayerActionKind::Check => self.players[seat].check(),
            PlayerActionKind::Call(_) => self.apply_call(seat)?,
            PlayerActionKind::Bet(amount) => self.apply_bet(seat, amount)?,
            PlayerActionKind::Raise(target) => self.apply_raise(seat, target)?,
            PlayerActionKind::SmallBlind(_) | PlayerActionKind::BigBlind(_) => {
                return Err(EngineError::InvalidAction("блайнды ставит только раунд".into()));
            }
        }

        self.after_commit(seat);
        self.resolve_after_action(seat)
    }

    /// То же, что `player_action`, но с проверкой, что ходит именно `name`.
    pub fn player_action_as(&mut self, name: &str, action: PlayerActionKind) -> Result<(), EngineError> {
        if self.betting_round_over() {
            return Err(EngineError::RoundOver);
        }
        let current = &self.current_player().name;
        if current != name {
            return Err(EngineError::InvalidAction(format!(
                "сейчас ход игрока {current}, а не {name}"
            )));
        }
        self.player_action(action)
    }

    fn apply_call(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        let (paid, _) = self.players[seat].call(self.pot.call_amount())?;
        self.pot.add(seat, paid);
        Ok(())
    }

    fn apply_bet(&mut self, seat: SeatIndex, amount: Chips) -> Result<(), EngineError> {
        let player = &self.players[seat];
        if amount.is_zero() || amount > player.stack {
            return Err(EngineError::InvalidAmount(amount));
        }
        let all_in = amount == player.stack;
        let level = player.current_round_bet() + amount;
        self.pot.validate_bet_or_raise(level, all_in)?;

        self.players[seat].bet(amount)?;
        self.pot.add(seat, amount);
        self.pot.set_last_bet_or_raise(seat, level, all_in)
    }

    fn apply_raise(&mut self, seat: SeatIndex, target: Chips) -> Result<(), EngineError> {
        let player = &self.players[seat];
        let added = target
            .checked_sub(player.current_round_bet())
            .ok_or(EngineError::InvalidAmount(target))?;
        if added.is_zero() || added > player.stack {
            return Err(EngineError::InvalidAmount(target));
        }
        let all_in = added == player.stack;
        self.pot.validate_bet_or_raise(target, all_in)?;

        self.players[seat].raise_bet(target)?;
        self.pot.add(seat, added);
        self.pot.set_last_bet_or_raise(seat, target, all_in)
    }

    /// Проверка окончания после хода игрока `seat`:
    /// один в игре → конец; все уравняли → следующая стадия; иначе ход дальше.
    fn resolve_after_action(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        if self.in_hand_count() <= 1 {
            self.stage = Stage::RoundOver;
            log::info!("round over: one player left");
            return Ok(());
        }

        let everyone_done = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_hand())
            .all(|(s, _)| self.action_complete.contains(&s));

        if everyone_done || self.can_act_count() == 0 || self.lone_actor_is_covered() {
            if self.can_act_count() <= 1 {
                // Ходить больше некому – докладываем борд до конца.
                return self.run_out();
            }
            return self.next_stage();
        }

        if let Some(next) = self.next_seat_from(seat + 1, Player::can_act) {
            self.current = next;
        }
        Ok(())
    }

    // ----------------------------------------------------------------
    // Стадии
    // ----------------------------------------------------------------

    fn next_stage(&mut self) -> Result<(), EngineError> {
        let next = self.stage.next().ok_or(EngineError::RoundOver)?;

        let count = next.cards_on_entry();
        let cards = self.deck.draw_n(count)?;

        for player in self.players.iter_mut() {
            player.next_stage();
        }
        self.pot.next_stage();
        self.action_complete = self.in_hand_all_ins();
        self.stage = next;
        self.history.push(HandEventKind::StageChanged { stage: next });
        if next == Stage::RoundOver {
            log::info!("round over: showdown");
        }

        if !cards.is_empty() {
            self.board.extend_from_slice(&cards);
            self.history.push(HandEventKind::BoardDealt { stage: next, cards });
            log::debug!("{next}: board {}", format_cards(&self.board));
        }

        // Постфлоп первым ходит первый активный от малого блайнда.
        if let Some(first) = self.next_seat_from(self.small_blind_seat, Player::can_act) {
            self.current = first;
        }
        Ok(())
    }

    /// Доложить общие карты до ривера и закончить раунд.
    fn run_out(&mut self) -> Result<(), EngineError> {
        while !self.betting_round_over() {
            self.next_stage()?;
        }
        log::info!("round over: board run out");
        Ok(())
    }

    /// Прокрутить раунд вперёд до стадии `stage` (назад нельзя).
    pub fn set_stage(&mut self, stage: Stage) -> Result<(), EngineError> {
        if stage < self.stage {
            return Err(EngineError::InvalidStage {
                from: self.stage,
                to: stage,
            });
        }
        let needed: usize = Stage::BETTING
            .iter()
            .chain(std::iter::once(&Stage::RoundOver))
            .filter(|s| **s > self.stage && **s <= stage)
            .map(|s| s.cards_on_entry())
            .sum();
        if self.deck.len() < needed {
            return Err(EngineError::DeckExhausted);
        }
        while self.stage < stage {
            self.next_stage()?;
        }
        Ok(())
    }

    // ----------------------------------------------------------------
    // Шоудаун и выплаты
    // ----------------------------------------------------------------

    /// Не сфолдившие игроки, сгруппированные по силе руки, сильнейшие первыми.
    pub fn hand_rankings(&self) -> Result<Vec<RankedGroup>, EngineError> {
        self.hand_rankings_with(&StandardEvaluator)
    }

    pub fn hand_rankings_with<E: HandEvaluator>(&self, evaluator: &E) -> Result<Vec<RankedGroup>, EngineError> {
        let mut groups: Vec<RankedGroup> = Vec::new();

        for (seat, player) in self.players.iter().enumerate().filter(|(_, p)| p.in_hand()) {
            let evaluation = evaluator.evaluate(player.hole_cards(), &self.board)?;
            match groups
                .iter_mut()
                .find(|g| g.evaluation.strength == evaluation.strength)
            {
                Some(group) => group.seats.push(seat),
                None => groups.push(RankedGroup {
                    evaluation,
                    seats: vec![seat],
                }),
            }
        }

        groups.sort_by_key(|g| g.evaluation.strength);
        Ok(groups)
    }

    /// Вскрытие: победители, их рука и категория.
    pub fn reveal(&mut self) -> Result<Showdown, EngineError> {
        self.reveal_with(&StandardEvaluator)
    }

    pub fn reveal_with<E: HandEvaluator>(&mut self, evaluator: &E) -> Result<Showdown, EngineError> {
        if !self.betting_round_over() {
            return Err(EngineError::RoundNotOver);
        }

        let in_hand: Vec<SeatIndex> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_hand())
            .map(|(seat, _)| seat)
            .collect();

        if let [winner] = in_hand.as_slice() {
            let showdown = Showdown {
                winners: vec![*winner],
                hand: None,
                category: None,
                label: None,
            };
            self.showdown = Some(showdown.clone());
            return Ok(showdown);
        }

        let rankings = self.hand_rankings_with(evaluator)?;
        for group in &rankings {
            for &seat in &group.seats {
                self.players[seat].profile.best_hand = Some(group.evaluation.cards);
            }
        }

        let best = rankings
            .into_iter()
            .next()
            .ok_or(EngineError::InsufficientPlayers(0))?;
        let showdown = Showdown {
            label: Some(best.evaluation.label()),
            hand: Some(best.evaluation.cards),
            category: Some(best.evaluation.category),
            winners: best.seats,
        };
        self.showdown = Some(showdown.clone());
        Ok(showdown)
    }

    /// Порядок претендентов: группы от сильнейшей к слабейшей.
    /// Без конкурентов рука не оценивается.
    fn ranking_order<E: HandEvaluator>(&self, evaluator: &E) -> Result<Vec<Vec<SeatIndex>>, EngineError> {
        let in_hand: Vec<SeatIndex> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_hand())
            .map(|(seat, _)| seat)
            .collect();
        if in_hand.len() == 1 {
            return Ok(vec![in_hand]);
        }
        Ok(self
            .hand_rankings_with(evaluator)?
            .into_iter()
            .map(|g| g.seats)
            .collect())
    }

    /// Разложить итоговые поты по победителям и зачислить выигрыш.
    pub fn distribute_winnings(&mut self) -> Result<Vec<PotAward>, EngineError> {
        self.distribute_winnings_with(&StandardEvaluator)
    }

    pub fn distribute_winnings_with<E: HandEvaluator>(&mut self, evaluator: &E) -> Result<Vec<PotAward>, EngineError> {
        if !self.betting_round_over() {
            return Err(EngineError::RoundNotOver);
        }
        if self.settled {
            return Err(EngineError::AlreadySettled);
        }

        let order = self.ranking_order(evaluator)?;
        let pots = self.pot.final_pots(&self.players);
        let n = self.players.len();
        let small_blind_seat = self.small_blind_seat;

        let mut awards = Vec::new();
        for (pot_index, pot) in pots.iter().enumerate() {
            if pot.amount.is_zero() {
                continue;
            }

            // Сильнейшая группа, у которой есть хоть один претендент на этот пот.
            let mut winners = order
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .copied()
                        .filter(|seat| pot.is_eligible(*seat))
                        .collect::<Vec<_>>()
                })
                .find(|w| !w.is_empty())
                .or_else(|| order.first().cloned())
                .unwrap_or_default();
            if winners.is_empty() {
                continue;
            }
            winners.sort_by_key(|seat| (seat + n - small_blind_seat) % n);

            // Лишние фишки – по одной, начиная с ближайшего к малому блайнду.
            let (share, mut odd) = pot.amount.split(winners.len());
            let shares = winners
                .into_iter()
                .map(|seat| {
                    let mut prize = share;
                    if !odd.is_zero() {
                        prize += Chips(1);
                        odd -= Chips(1);
                    }
                    (seat, prize)
                })
                .collect();

            awards.push(PotAward {
                pot_index,
                amount: pot.amount,
                shares,
            });
        }

        for award in &awards {
            for &(seat, prize) in &award.shares {
                self.players[seat].win(prize);
                self.history.push(HandEventKind::PotAwarded {
                    pot_index: award.pot_index,
                    seat,
                    amount: prize,
                });
                log::info!(
                    "pot {} ({}): {} wins {}",
                    award.pot_index + 1,
                    award.amount,
                    self.players[seat].name,
                    prize
                );
            }
        }

        self.settled = true;
        Ok(awards)
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
