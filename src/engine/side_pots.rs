use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, Player, SeatIndex};

/// Сайд-пот: слой банка, на который претендуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

impl SidePot {
    pub fn is_eligible(&self, seat: SeatIndex) -> bool {
        self.eligible_seats.contains(&seat)
    }
}

/// Разложить банк на слои по уровням олл-инов.
///
/// Вход: contributions[seat] = сколько суммарно внёс игрок за раунд (все стадии),
/// `players` индексируются по seat и дают статусы folded/all-in.
///
/// Каждый слой ограничен очередным уровнем олл-ина (по возрастанию). Игрок
/// претендует на слой, если дотянул до его порога и не сфолдил.
/// При `final_settlement` остаток сверх последнего олл-ина становится
/// последним потом для не сфолдивших игроков, у которых ещё есть вклад.
pub fn compute_side_pots(
    contributions: &BTreeMap<SeatIndex, Chips>,
    players: &[Player],
    total: Chips,
    final_settlement: bool,
) -> Vec<SidePot> {
    let folded = |seat: SeatIndex| players.get(seat).map_or(true, |p| !p.in_hand());
    let all_in = |seat: SeatIndex| players.get(seat).is_some_and(Player::all_in);

    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|(seat, amount)| all_in(**seat) && !amount.is_zero())
        .map(|(_, amount)| *amount)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut remaining = contributions.clone();
    let mut pots = Vec::new();
    let mut carved = Chips::ZERO;
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let width = level - prev_level;
        let mut amount = Chips::ZERO;
        let mut eligible = Vec::new();

        for (&seat, left) in remaining.iter_mut() {
            let take = (*left).min(width);
            amount += take;
            if take == width && !folded(seat) {
                eligible.push(seat);
            }
            *left -= take;
        }

        carved += amount;
        pots.push(SidePot {
            amount,
            eligible_seats: eligible,
        });
        prev_level = level;
    }

    if final_settlement {
        let residual = total - carved;
        if !residual.is_zero() {
            let eligible = remaining
                .iter()
                .filter(|(seat, left)| !left.is_zero() && !folded(**seat))
                .map(|(seat, _)| *seat)
                .collect();
            pots.push(SidePot {
                amount: residual,
                eligible_seats: eligible,
            });
        }
    }

    pots
}
