//! Оценка рук: категории, кикеры, лучшая пятёрка из семи карт.

use holdem_engine::domain::parse_cards;
use holdem_engine::engine::EngineError;
use holdem_engine::eval::{
    evaluate_best_hand, HandCategory, HandEvaluation, HandEvaluator, HandRank, StandardEvaluator,
};

/// Утилита: оценить "hole | board" в текстовой записи.
fn eval(hole: &str, board: &str) -> HandEvaluation {
    StandardEvaluator
        .evaluate(&parse_cards(hole).unwrap(), &parse_cards(board).unwrap())
        .unwrap()
}

#[test]
fn categories_are_detected() {
    let cases = [
        ("Ah Kd", "2c 7s 9d Jc 3h", HandCategory::HighCard),
        ("Ah Ad", "2c 7s 9d Jc 3h", HandCategory::OnePair),
        ("Ah Ad", "2c 2s 9d Jc 3h", HandCategory::TwoPair),
        ("Ah Ad", "As 7s 9d Jc 3h", HandCategory::ThreeOfAKind),
        ("Th Jd", "Qc Ks Ad 2c 3h", HandCategory::Straight),
        ("2h 9h", "Qh Kh 4h 2c 3s", HandCategory::Flush),
        ("Ah Ad", "As 7s 7d Jc 3h", HandCategory::FullHouse),
        ("Ah Ad", "As Ac 9d Jc 3h", HandCategory::FourOfAKind),
        ("5h 6h", "7h 8h 9h 2c 3s", HandCategory::StraightFlush),
    ];

    for (hole, board, expected) in cases {
        assert_eq!(eval(hole, board).category, expected, "{hole} | {board}");
    }
}

#[test]
fn wheel_is_lowest_straight() {
    let wheel = eval("Ah 2d", "3c 4s 5d Kc Kh");
    let six_high = eval("6h 2d", "3c 4s 5d Kc 9h");

    assert_eq!(wheel.category, HandCategory::Straight);
    assert!(six_high.strength < wheel.strength, "6-high стрит сильнее колеса");
}

#[test]
fn kicker_breaks_ties() {
    let ace_kicker = eval("Kh Ad", "Kc 7s 9d 2c 3h");
    let queen_kicker = eval("Ks Qd", "Kc 7s 9d 2c 3h");

    assert!(ace_kicker.strength < queen_kicker.strength);
}

#[test]
fn board_plays_for_both_players() {
    let a = eval("2c 3d", "Ah Kh Qh Jh Th");
    let b = eval("4c 5d", "Ah Kh Qh Jh Th");

    assert_eq!(a.strength, b.strength);
    assert_eq!(a.label(), "Royal Flush");
}

#[test]
fn best_five_of_seven_is_returned() {
    let hand = eval("9h 9d", "9c 4s 4d Kc 2h");

    assert_eq!(hand.category, HandCategory::FullHouse);
    let shown: Vec<String> = hand.cards.iter().map(|c| c.to_string()).collect();
    assert_eq!(shown.iter().filter(|c| c.starts_with('9')).count(), 3);
    assert_eq!(shown.iter().filter(|c| c.starts_with('4')).count(), 2);
}

#[test]
fn wrong_card_count_is_an_error() {
    let hole = parse_cards("Ah Kd").unwrap();
    let board = parse_cards("2c 3d").unwrap();

    assert_eq!(
        evaluate_best_hand(&hole, &board).unwrap_err(),
        EngineError::InvalidCardCount(4)
    );
}

/// Ранг от стороннего оценщика вне диапазона не роняет расчёт силы.
#[test]
fn out_of_range_rank_has_zero_strength() {
    assert_eq!(HandRank(u32::MAX).strength(), 0);
    assert_eq!(HandRank(HandRank::CEILING).strength(), 0);
    assert!(HandRank(1).strength() > HandRank(2).strength());
}
