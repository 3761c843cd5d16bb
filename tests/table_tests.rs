//! Стол: состав, ротация малого блайнда, возврат стеков в ростер.

use holdem_engine::domain::{Chips, Deck, PlayerStatus, TableConfig};
use holdem_engine::engine::{EngineError, PlayerActionKind, Poker};
use holdem_engine::infra::DeterministicRng;

/// Стол SB 10 / BB 20 с игроками по 1000.
fn table(names: &[&str]) -> Poker {
    let mut poker = Poker::new(TableConfig::default()).unwrap();
    for name in names {
        poker.add_player(name, None).unwrap();
    }
    poker
}

/// Сыграть раунд до конца: все фолдят до большого блайнда.
fn fold_round(poker: &mut Poker) {
    let round = poker.new_round_with_deck(Deck::standard_52()).unwrap();
    round.deal().unwrap();
    round.post_blinds().unwrap();
    while !round.betting_round_over() {
        round.player_action(PlayerActionKind::Fold).unwrap();
    }
    round.distribute_winnings().unwrap();
}

fn roster(poker: &Poker) -> Vec<(String, u64)> {
    poker
        .players()
        .iter()
        .map(|p| (p.name.clone(), p.stack.0))
        .collect()
}

#[test]
fn invalid_config_is_rejected() {
    let config = TableConfig {
        small_blind: Chips(20),
        big_blind: Chips(10),
        ..TableConfig::default()
    };
    assert!(matches!(Poker::new(config), Err(EngineError::InvalidConfig(_))));
}

#[test]
fn add_player_checks_duplicates_and_capacity() {
    let config = TableConfig {
        max_players: 2,
        ..TableConfig::default()
    };
    let mut poker = Poker::new(config).unwrap();
    poker.add_player("alice", None).unwrap();

    assert_eq!(
        poker.add_player("alice", None),
        Err(EngineError::DuplicatePlayer("alice".into()))
    );
    poker.add_player("bob", Some(Chips(500))).unwrap();
    assert_eq!(poker.add_player("carol", None), Err(EngineError::TableFull(2)));

    assert_eq!(
        roster(&poker),
        vec![("alice".to_string(), 1000), ("bob".to_string(), 500)]
    );
}

#[test]
fn new_round_needs_two_players() {
    let mut poker = table(&["alice"]);
    assert_eq!(
        poker.new_round().err(),
        Some(EngineError::InsufficientPlayers(1))
    );

    poker.add_player("broke", Some(Chips::ZERO)).unwrap();
    assert_eq!(
        poker.new_round().err(),
        Some(EngineError::InsufficientPlayers(1)),
        "игрок с пустым стеком не считается"
    );
}

#[test]
fn small_blind_rotates_each_round() {
    let mut poker = table(&["alice", "bob", "carol"]);

    let mut small_blinds = Vec::new();
    for _ in 0..4 {
        let round = poker.new_round_with_deck(Deck::standard_52()).unwrap();
        small_blinds.push(round.small_blind_player().name.clone());
        round.deal().unwrap();
        round.post_blinds().unwrap();
        while !round.betting_round_over() {
            round.player_action(PlayerActionKind::Fold).unwrap();
        }
        round.distribute_winnings().unwrap();
    }

    assert_eq!(small_blinds, vec!["alice", "bob", "carol", "alice"]);
}

/// Пустой стек пропускается: малый блайнд всё равно идёт по кругу на одно место.
#[test]
fn small_blind_skips_sitting_out_player() {
    let mut poker = Poker::new(TableConfig::default()).unwrap();
    poker.add_player("alice", None).unwrap();
    poker.add_player("bob", Some(Chips::ZERO)).unwrap();
    poker.add_player("carol", None).unwrap();
    poker.add_player("dave", None).unwrap();

    let mut small_blinds = Vec::new();
    for _ in 0..4 {
        let round = poker.new_round_with_deck(Deck::standard_52()).unwrap();
        small_blinds.push(round.small_blind_player().name.clone());
        round.deal().unwrap();
        round.post_blinds().unwrap();
        while !round.betting_round_over() {
            round.player_action(PlayerActionKind::Fold).unwrap();
        }
        round.distribute_winnings().unwrap();
    }

    assert_eq!(small_blinds, vec!["alice", "carol", "dave", "alice"]);
}

/// После раунда стеки возвращаются в ростер в исходном порядке.
#[test]
fn stacks_return_to_roster_order() {
    let mut poker = table(&["alice", "bob", "carol"]);
    fold_round(&mut poker); // alice SB, bob BB – bob забирает блайнды
    fold_round(&mut poker); // bob SB, carol BB – carol забирает блайнды

    assert_eq!(
        roster(&poker),
        vec![
            ("alice".to_string(), 990),
            ("bob".to_string(), 1000),
            ("carol".to_string(), 1010),
        ]
    );
}

#[test]
fn roster_is_locked_while_round_runs() {
    let mut poker = table(&["alice", "bob"]);
    poker.new_round_with(&mut DeterministicRng::from_seed(1)).unwrap();

    assert_eq!(poker.add_player("carol", None), Err(EngineError::RoundInProgress));
    assert_eq!(poker.remove_player("bob").err(), Some(EngineError::RoundInProgress));
    assert_eq!(poker.set_stacks(Chips(500)), Err(EngineError::RoundInProgress));
    assert_eq!(poker.new_round().err(), Some(EngineError::RoundInProgress));
}

#[test]
fn empty_stack_sits_out() {
    let mut poker = table(&["alice", "bob"]);
    poker.add_player("carol", Some(Chips::ZERO)).unwrap();

    let round = poker.new_round_with_deck(Deck::standard_52()).unwrap();
    round.deal().unwrap();

    let carol = round.players().iter().find(|p| p.name == "carol").unwrap();
    assert_eq!(carol.status(), PlayerStatus::SittingOut);
    assert!(carol.hole_cards().is_empty());

    round.post_blinds().unwrap();
    // Хедз-ап из двух живых игроков: первым ходит малый блайнд.
    assert_eq!(round.current_player().name, round.small_blind_player().name);
}

#[test]
fn remove_player_and_reset_stacks() {
    let mut poker = table(&["alice", "bob", "carol"]);
    fold_round(&mut poker);

    let bob = poker.remove_player("bob").unwrap();
    assert_eq!(bob.stack, Chips(1010));
    assert_eq!(
        poker.remove_player("bob").err(),
        Some(EngineError::PlayerNotFound("bob".into()))
    );

    poker.set_stacks(Chips(300)).unwrap();
    assert_eq!(
        roster(&poker),
        vec![("alice".to_string(), 300), ("carol".to_string(), 300)]
    );
}

#[test]
fn deterministic_rng_gives_reproducible_deals() {
    let deal = |seed: u64| {
        let mut poker = table(&["alice", "bob"]);
        let round = poker.new_round_with(&mut DeterministicRng::from_seed(seed)).unwrap();
        round.deal().unwrap();
        round
            .players()
            .iter()
            .flat_map(|p| p.hole_cards().to_vec())
            .collect::<Vec<_>>()
    };

    assert_eq!(deal(42), deal(42));
    assert_ne!(deal(42), deal(43));
}
