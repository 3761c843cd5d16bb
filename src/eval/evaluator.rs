use crate::domain::card::{Card, Rank};
use crate::engine::errors::EngineError;

use super::hand_rank::{HandCategory, HandEvaluation, HandRank};

/// Внешняя способность "оценить руку": hole + board → лучшие 5 карт.
///
/// Round зовёт её только на шоудауне, поэтому на практике board всегда полный.
pub trait HandEvaluator {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<HandEvaluation, EngineError>;
}

/// Перебор всех 5-карточных комбинаций из 5–7 карт.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<HandEvaluation, EngineError> {
        evaluate_best_hand(hole, board)
    }
}

/// Главная функция: вычислить лучшую 5-карточную руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandEvaluation, EngineError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    if !(5..=7).contains(&all_cards.len()) {
        return Err(EngineError::InvalidCardCount(all_cards.len()));
    }

    let mut best: Option<([Card; 5], HandRank)> = None;
    let n = all_cards.len();

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [all_cards[a], all_cards[b], all_cards[c], all_cards[d], all_cards[e]];
                        let rank = evaluate_5card_hand(&five);
                        if best.map_or(true, |(_, best_rank)| rank > best_rank) {
                            best = Some((five, rank));
                        }
                    }
                }
            }
        }
    }

    let (five, rank) = best.ok_or(EngineError::InvalidCardCount(n))?;
    Ok(HandEvaluation::new(order_for_display(five, rank), rank))
}

/// Битовая маска рангов: бит (rank - 2).
fn rank_mask(cards: &[Card; 5]) -> u16 {
    cards.iter().fold(0u16, |m, c| m | (1 << (c.rank.value() - 2)))
}

/// Старшая карта стрита, если он есть. Туз играет и снизу (A2345 → пятёрка).
fn straight_high(mask: u16) -> Option<Rank> {
    // Сдвигаем на 1, чтобы бит 0 был "туз как единица".
    let extended = (u32::from(mask) << 1) | u32::from((mask >> 12) & 1);
    (5..=14u8).rev().find_map(|high| {
        let window = 0b11111u32 << (high - 5);
        (extended & window == window).then(|| Rank::from_value(high)).flatten()
    })
}

/// Ранги стрита от старшего к младшему (для wheel туз в конце).
fn straight_ranks(high: Rank) -> [Rank; 5] {
    let h = high.value();
    let at = |offset: u8| Rank::from_value(h - offset).unwrap_or(Rank::Ace);
    [at(0), at(1), at(2), at(3), at(4)]
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(rank_mask(cards));

    let groups = rank_groups(cards);
    let pattern: Vec<u8> = groups.iter().map(|&(_, count)| count).collect();
    let mut ranks = [Rank::Two; 5];
    for (slot, &(rank, _)) in ranks.iter_mut().zip(groups.iter()) {
        *slot = rank;
    }

    let category = match (is_flush, straight, pattern.as_slice()) {
        (true, Some(high), _) => {
            return HandRank::from_category_and_ranks(HandCategory::StraightFlush, straight_ranks(high));
        }
        (_, _, [4, 1]) => HandCategory::FourOfAKind,
        (_, _, [3, 2]) => HandCategory::FullHouse,
        (true, None, _) => HandCategory::Flush,
        (false, Some(high), _) => {
            return HandRank::from_category_and_ranks(HandCategory::Straight, straight_ranks(high));
        }
        (_, _, [3, 1, 1]) => HandCategory::ThreeOfAKind,
        (_, _, [2, 2, 1]) => HandCategory::TwoPair,
        (_, _, [2, 1, 1, 1]) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandRank::from_category_and_ranks(category, ranks)
}

/// Список (ранг, количество): сначала по количеству, потом по рангу, по убыванию.
fn rank_groups(cards: &[Card; 5]) -> Vec<(Rank, u8)> {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }

    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .filter(|r| counts[r.value() as usize] > 0)
        .map(|&r| (r, counts[r.value() as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    groups
}

/// Переставить 5 карт в порядке значимости для показа ("AA KK Q").
fn order_for_display(mut five: [Card; 5], rank: HandRank) -> [Card; 5] {
    let order = rank.ranks();
    let significance = |card: &Card| {
        order
            .iter()
            .position(|r| *r == card.rank)
            .unwrap_or(order.len())
    };
    five.sort_by(|a, b| significance(a).cmp(&significance(b)).then_with(|| a.suit.cmp(&b.suit)));
    five
}
