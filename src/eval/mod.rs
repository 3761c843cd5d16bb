//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основной вход: `HandEvaluator::evaluate(hole, board) -> HandEvaluation`.
//! Сила в `HandEvaluation::strength` – "меньше = сильнее".

pub mod evaluator;
pub mod hand_rank;

pub use evaluator::{evaluate_best_hand, HandEvaluator, StandardEvaluator};
pub use hand_rank::{describe_hand, HandCategory, HandEvaluation, HandRank};
