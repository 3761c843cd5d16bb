//! Раунд: блайнды, очерёдность ходов, легальные действия, переходы стадий.

use holdem_engine::domain::{parse_cards, Chips, Deck, Player, Stage, TableConfig};
use holdem_engine::engine::{EngineError, PlayerActionKind, Round};

use PlayerActionKind::*;

/// Игроки с заданными стеками: p0 – малый блайнд, p1 – большой.
fn players(stacks: &[u64]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| Player::new(format!("p{i}"), Chips(s)))
        .collect()
}

/// Раунд SB 10 / BB 20 с розданными картами из стандартной колоды.
fn dealt_round(stacks: &[u64]) -> Round {
    let mut round = Round::new(players(stacks), &TableConfig::default(), Deck::standard_52()).unwrap();
    round.deal().unwrap();
    round
}

fn started_round(stacks: &[u64]) -> Round {
    let mut round = dealt_round(stacks);
    round.post_blinds().unwrap();
    round
}

fn current_name(round: &Round) -> String {
    round.current_player().name.clone()
}

fn legal(round: &Round) -> Vec<PlayerActionKind> {
    round.current_player_and_actions().unwrap().1
}

//
// ====================== БЛАЙНДЫ И ПЕРВЫЙ ХОД ======================
//

#[test]
fn round_needs_two_funded_players() {
    let err = Round::new(players(&[1000, 0]), &TableConfig::default(), Deck::standard_52()).unwrap_err();
    assert_eq!(err, EngineError::InsufficientPlayers(1));
}

#[test]
fn actions_before_blinds_are_rejected() {
    let round = dealt_round(&[1000, 1000]);
    assert_eq!(
        round.current_player_and_actions().unwrap_err(),
        EngineError::BlindsNotPosted
    );
}

#[test]
fn deal_gives_two_cards_round_robin() {
    let top = parse_cards("Ah Kh Ad Kd").unwrap();
    let mut round = Round::new(players(&[1000, 1000]), &TableConfig::default(), Deck::stacked(&top)).unwrap();
    round.deal().unwrap();

    assert_eq!(round.players()[0].hole_cards(), &parse_cards("Ah Ad").unwrap()[..]);
    assert_eq!(round.players()[1].hole_cards(), &parse_cards("Kh Kd").unwrap()[..]);
    assert!(matches!(round.deal(), Err(EngineError::InvalidAction(_))));
}

/// Хедз-ап: блайнды 10/20, первым ходит малый блайнд, минимальный рейз 40.
#[test]
fn heads_up_preflop_blinds_and_minimum_raise() {
    let round = started_round(&[1000, 1000]);

    assert_eq!(round.stage(), Stage::Preflop);
    assert_eq!(round.pot().total(), Chips(30));
    assert_eq!(round.small_blind_player().stack, Chips(990));
    assert_eq!(round.big_blind_player().stack, Chips(980));
    assert_eq!(round.pot().minimum_raise(), Chips(40));

    assert_eq!(current_name(&round), "p0");
    assert_eq!(legal(&round), vec![Fold, Call(Chips(10)), Raise(Chips(40))]);
}

#[test]
fn multiway_preflop_starts_after_big_blind() {
    let round = started_round(&[1000, 1000, 1000, 1000]);

    assert_eq!(current_name(&round), "p2");
    assert_eq!(legal(&round), vec![Fold, Call(Chips(20)), Raise(Chips(40))]);
}

#[test]
fn blinds_are_logged_in_preflop_actions() {
    let round = started_round(&[1000, 1000, 1000]);
    let kinds: Vec<_> = round
        .actions(Stage::Preflop)
        .iter()
        .map(|a| a.kind.clone())
        .collect();

    assert_eq!(kinds, vec![SmallBlind(Chips(10)), BigBlind(Chips(20))]);
}

//
// ====================== ОЧЕРЁДНОСТЬ И ПЕРЕХОДЫ ======================
//

/// Лимпы до большого блайнда: у него есть опция check/raise.
#[test]
fn big_blind_gets_option_after_limps() {
    let mut round = started_round(&[1000, 1000, 1000]);

    round.player_action(Call(Chips(20))).unwrap(); // p2
    round.player_action(Call(Chips(10))).unwrap(); // p0
    assert_eq!(current_name(&round), "p1");
    assert_eq!(legal(&round), vec![Check, Raise(Chips(40))]);

    round.player_action(Check).unwrap();

    assert_eq!(round.stage(), Stage::Flop);
    assert_eq!(round.board().len(), 3);
    assert_eq!(round.pot().total(), Chips(60));
    assert_eq!(current_name(&round), "p0", "постфлоп начинает малый блайнд");
    assert_eq!(legal(&round), vec![Check, Bet(Chips(20))]);
}

/// Хедз-ап постфлоп, как и за полным столом, первым ходит малый блайнд.
#[test]
fn heads_up_postflop_small_blind_acts_first() {
    let mut round = started_round(&[1000, 1000]);

    round.player_action(Call(Chips(10))).unwrap();
    round.player_action(Check).unwrap();

    assert_eq!(round.stage(), Stage::Flop);
    assert_eq!(current_name(&round), "p0");

    round.player_action_as("p0", Check).unwrap();
    round.player_action_as("p1", Check).unwrap();
    assert_eq!(round.stage(), Stage::Turn);
    assert_eq!(current_name(&round), "p0");
}

/// Малый блайнд олл-ин на блайнде: у большого нет опции, борд докладывается.
#[test]
fn all_in_small_blind_leaves_no_option_for_big_blind() {
    let mut round = started_round(&[5, 1000]);

    assert!(round.betting_round_over());
    assert_eq!(round.board().len(), 5);
    assert_eq!(round.pot().total(), Chips(25));
    assert_eq!(round.current_player_and_actions().err(), Some(EngineError::RoundOver));

    round.distribute_winnings().unwrap();
    let total: u64 = round.players().iter().map(|p| p.stack.0).sum();
    assert_eq!(total, 1005);
    // Непокрытые 15 фишек большого блайнда вернулись к нему при любом исходе.
    assert!(round.players()[1].stack >= Chips(995));
}

#[test]
fn full_check_down_reaches_round_over_with_full_board() {
    let mut round = started_round(&[1000, 1000]);

    round.player_action(Call(Chips(10))).unwrap();
    round.player_action(Check).unwrap();
    for stage in [Stage::Flop, Stage::Turn, Stage::River] {
        assert_eq!(round.stage(), stage);
        round.player_action(Check).unwrap();
        round.player_action(Check).unwrap();
    }

    assert!(round.betting_round_over());
    assert_eq!(round.board().len(), 5);
    assert_eq!(round.player_action(Check), Err(EngineError::RoundOver));
}

#[test]
fn bet_and_raise_reset_completion() {
    let mut round = dealt_round(&[1000, 1000, 1000]);
    round.set_stage(Stage::Flop).unwrap();

    round.player_action(Bet(Chips(50))).unwrap(); // p0
    round.player_action(Call(Chips(50))).unwrap(); // p1
    round.player_action(Raise(Chips(150))).unwrap(); // p2

    assert_eq!(round.stage(), Stage::Flop);
    assert_eq!(round.action_complete_seats().iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(current_name(&round), "p0");
    assert_eq!(
        legal(&round),
        vec![Fold, Call(Chips(100)), Raise(Chips(250))]
    );

    round.player_action(Call(Chips(100))).unwrap();
    round.player_action(Call(Chips(100))).unwrap();

    assert_eq!(round.stage(), Stage::Turn);
    assert_eq!(round.pot().total(), Chips(450));
}

//
// ====================== ВАЛИДАЦИЯ ======================
//

#[test]
fn illegal_kind_is_rejected_without_changes() {
    let mut round = started_round(&[1000, 1000]);
    let total = round.pot().total();

    // Чек при долге 10 – не в списке.
    assert!(matches!(round.player_action(Check), Err(EngineError::InvalidAction(_))));
    assert!(matches!(round.player_action(Bet(Chips(100))), Err(EngineError::InvalidAction(_))));
    assert_eq!(round.pot().total(), total);
    assert_eq!(current_name(&round), "p0");
}

#[test]
fn raise_below_minimum_is_rejected() {
    let mut round = started_round(&[1000, 1000]);

    assert_eq!(
        round.player_action(Raise(Chips(30))),
        Err(EngineError::InvalidRaise {
            amount: Chips(30),
            minimum: Chips(40),
        })
    );
    assert_eq!(round.small_blind_player().stack, Chips(990));
}

#[test]
fn raise_above_stack_is_rejected() {
    let mut round = started_round(&[1000, 1000]);

    assert_eq!(
        round.player_action(Raise(Chips(2000))),
        Err(EngineError::InvalidAmount(Chips(2000)))
    );
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut round = started_round(&[1000, 1000]);

    assert!(matches!(
        round.player_action_as("p1", Check),
        Err(EngineError::InvalidAction(_))
    ));
    round.player_action_as("p0", Call(Chips(10))).unwrap();
    assert_eq!(current_name(&round), "p1");
}

#[test]
fn stage_cannot_go_backwards() {
    let mut round = dealt_round(&[1000, 1000]);
    round.set_stage(Stage::Turn).unwrap();

    assert_eq!(round.board().len(), 4);
    assert_eq!(
        round.set_stage(Stage::Flop),
        Err(EngineError::InvalidStage {
            from: Stage::Turn,
            to: Stage::Flop,
        })
    );
}

//
// ====================== КОРОТКИЙ ОЛЛ-ИН ======================
//

/// Короткий олл-ин не открывает рейз тем, кто уже уравнял полный бет.
#[test]
fn short_all_in_does_not_reopen_raising() {
    let mut round = dealt_round(&[1000, 1000, 150, 1000]);
    round.set_stage(Stage::Flop).unwrap();

    round.player_action(Bet(Chips(100))).unwrap(); // p0
    round.player_action(Call(Chips(100))).unwrap(); // p1
    assert_eq!(legal(&round), vec![Fold, Call(Chips(100)), Raise(Chips(150))]);
    round.player_action(Raise(Chips(150))).unwrap(); // p2 олл-ин, прирост 50 < 100

    assert_eq!(round.all_in_seats(), &[2]);
    assert_eq!(round.pot().minimum_raise(), Chips(250));

    // p3 ещё не ходил – рейз ему доступен.
    assert_eq!(current_name(&round), "p3");
    assert_eq!(legal(&round), vec![Fold, Call(Chips(150)), Raise(Chips(250))]);
    round.player_action(Call(Chips(150))).unwrap();

    // p0 и p1 уравняли полный бет 100 – только fold/call.
    assert_eq!(current_name(&round), "p0");
    assert_eq!(legal(&round), vec![Fold, Call(Chips(50))]);
    round.player_action(Call(Chips(50))).unwrap();
    assert_eq!(legal(&round), vec![Fold, Call(Chips(50))]);
    round.player_action(Call(Chips(50))).unwrap();

    assert_eq!(round.stage(), Stage::Turn);
}

/// Короткий олл-ин первым бетом не закрывает рейз тем, кто ещё не ходил.
#[test]
fn short_all_in_opening_bet_leaves_raising_open() {
    let mut round = dealt_round(&[5, 1000, 1000]);
    round.set_stage(Stage::Flop).unwrap();

    assert_eq!(legal(&round), vec![Check, Bet(Chips(5))]);
    round.player_action(Bet(Chips(5))).unwrap(); // p0 олл-ин меньше минимального бета

    assert_eq!(current_name(&round), "p1");
    assert_eq!(legal(&round), vec![Fold, Call(Chips(5)), Raise(Chips(25))]);
    round.player_action(Raise(Chips(25))).unwrap();

    assert_eq!(current_name(&round), "p2");
    assert_eq!(legal(&round), vec![Fold, Call(Chips(25)), Raise(Chips(45))]);
}

/// Полный рейз открывает торговлю заново.
#[test]
fn full_raise_reopens_raising() {
    let mut round = dealt_round(&[1000, 1000, 1000]);
    round.set_stage(Stage::Flop).unwrap();

    round.player_action(Bet(Chips(100))).unwrap();
    round.player_action(Call(Chips(100))).unwrap();
    round.player_action(Raise(Chips(300))).unwrap();

    assert_eq!(legal(&round), vec![Fold, Call(Chips(200)), Raise(Chips(500))]);
}

/// Когда ходить больше некому, борд докладывается автоматически.
#[test]
fn all_in_and_call_runs_out_the_board() {
    let mut round = started_round(&[1000, 1000]);

    round.player_action(Raise(Chips(1000))).unwrap();
    round.player_action(Call(Chips(980))).unwrap();

    assert!(round.betting_round_over());
    assert_eq!(round.board().len(), 5);
    assert_eq!(round.pot().total(), Chips(2000));
}

/// Банк всегда равен сумме вкладов.
#[test]
fn pot_total_matches_contributions_through_the_hand() {
    let mut round = started_round(&[1000, 800, 600]);
    let check = |round: &Round| {
        let sum: Chips = round.pot().contributions().values().sum();
        assert_eq!(sum, round.pot().total());
    };

    round.player_action(Raise(Chips(60))).unwrap();
    check(&round);
    round.player_action(Call(Chips(50))).unwrap();
    check(&round);
    round.player_action(Call(Chips(40))).unwrap();
    check(&round);
    round.player_action(Bet(Chips(200))).unwrap();
    check(&round);
    round.player_action(Fold).unwrap();
    check(&round);
    round.player_action(Raise(Chips(540))).unwrap();
    check(&round);

    assert_eq!(round.pot().total(), Chips(180 + 200 + 540));
}
