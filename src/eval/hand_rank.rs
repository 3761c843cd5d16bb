use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_id(id: u32) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Упакованный ранг руки: чем больше, тем сильнее.
///
/// Схема кодирования (u32):
///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
/// Rank: 2..14 (2..A) влазит в 4 бита.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

impl HandRank {
    /// Строго больше любого закодированного ранга.
    pub const CEILING: u32 = 9 << 20;

    /// Собрать HandRank из категории и 5 рангов (от старшего к младшему).
    pub fn from_category_and_ranks(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let value = ranks
            .iter()
            .fold(category as u32, |acc, r| (acc << 4) | u32::from(r.value()));
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        HandCategory::from_id((self.0 >> 20) & 0x0F)
    }

    /// Достать 5 рангов (от старшего к младшему).
    pub fn ranks(&self) -> [Rank; 5] {
        let nibble = |shift: u32| Rank::from_value(((self.0 >> shift) & 0x0F) as u8).unwrap_or(Rank::Two);
        [nibble(16), nibble(12), nibble(8), nibble(4), nibble(0)]
    }

    /// Сила в соглашении "меньше = сильнее".
    pub fn strength(&self) -> u32 {
        Self::CEILING.saturating_sub(self.0)
    }
}

/// Результат оценки руки игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvaluation {
    /// Лучшие 5 карт, от старшей значимой к младшей.
    pub cards: [Card; 5],
    pub category: HandCategory,
    pub rank: HandRank,
    /// Меньше = сильнее. Равная сила = равные руки (сплит).
    pub strength: u32,
}

impl HandEvaluation {
    pub fn new(cards: [Card; 5], rank: HandRank) -> Self {
        Self {
            cards,
            category: rank.category(),
            rank,
            strength: rank.strength(),
        }
    }

    /// Человеческое название: "Royal Flush" выделяем из стрит-флешей.
    pub fn label(&self) -> String {
        describe_hand(self.rank)
    }
}

/// Человеческое описание руки по рангу.
pub fn describe_hand(rank: HandRank) -> String {
    let category = rank.category();
    if category == HandCategory::StraightFlush && rank.ranks()[0] == Rank::Ace {
        return "Royal Flush".to_string();
    }
    category.label().to_string()
}
