//! Pot layering and showdown payouts.

use crate::hand::HandStrength;

/// One layer of the pot and the live seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Splits the hand's contributions into layers at every distinct amount
/// a live seat committed, so a seat that is all-in for less only competes
/// for what it matched. Chips above the largest live contribution join the
/// top layer.
pub fn build_side_pots(contributions: &[u32], live: &[bool]) -> Vec<SidePot> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .zip(live)
        .filter(|&(&c, &is_live)| is_live && c > 0)
        .map(|(&c, _)| c)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev = 0u32;
    for &level in &levels {
        let amount: u32 = contributions
            .iter()
            .map(|&c| c.min(level) - c.min(prev))
            .sum();
        let eligible = (0..contributions.len())
            .filter(|&i| live[i] && contributions[i] >= level)
            .collect();
        pots.push(SidePot { amount, eligible });
        prev = level;
    }

    let leftover: u32 = contributions.iter().map(|&c| c.saturating_sub(prev)).sum();
    if leftover > 0 {
        match pots.last_mut() {
            Some(top) => top.amount += leftover,
            None => pots.push(SidePot {
                amount: leftover,
                eligible: (0..live.len()).filter(|&i| live[i]).collect(),
            }),
        }
    }
    pots
}

/// Result of dividing the pot at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payouts {
    /// Chips awarded per seat.
    pub amounts: Vec<u32>,
    /// Seats sharing the best hand for the main (first) layer.
    pub main_winners: Vec<usize>,
}

/// Awards every layer to the strongest eligible hands.
///
/// `strengths[i]` is `None` for folded seats. Odd chips of a split go one
/// at a time to the winners that come first in `order` (seats clockwise
/// from the dealer's left).
pub fn award_pots(
    pots: &[SidePot],
    strengths: &[Option<HandStrength>],
    order: &[usize],
) -> Payouts {
    let mut amounts = vec![0u32; strengths.len()];
    let mut main_winners = Vec::new();

    for (layer, pot) in pots.iter().enumerate() {
        let best = pot.eligible.iter().filter_map(|&i| strengths[i]).max();
        let Some(best) = best else {
            continue;
        };
        let winners: Vec<usize> = order
            .iter()
            .copied()
            .filter(|i| pot.eligible.contains(i) && strengths[*i] == Some(best))
            .collect();
        let share = pot.amount / winners.len() as u32;
        let mut odd = pot.amount % winners.len() as u32;
        for &w in &winners {
            amounts[w] += share;
            if odd > 0 {
                amounts[w] += 1;
                odd -= 1;
            }
        }
        if layer == 0 {
            main_winners = winners;
            main_winners.sort_unstable();
        }
    }

    Payouts {
        amounts,
        main_winners,
    }
}
