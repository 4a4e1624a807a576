use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
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

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

/// Value of the best five-card hand. Orders by category, then by the
/// tiebreak ranks; equal values split the pot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks, unused slots are 0
    pub kickers: [u8; 5],
}

/// Evaluates the best five-card hand that can be made from `cards`
/// (hole cards plus board, normally seven cards).
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut suit_masks = [0u16; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        suit_masks[s] |= 1 << r;
    }

    let flush_suit = (0..4).find(|&s| suit_counts[s] >= 5);
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high(suit_masks[s]) {
            return strength(Category::StraightFlush, &[high]);
        }
    }

    // (count, rank) sorted by count then rank, both descending
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let (top_count, top_rank) = groups.first().copied().unwrap_or((0, 0));
    let second = groups.get(1).copied();

    if top_count == 4 {
        let kicker = top_ranks(rank_mask, &[top_rank], 1);
        return strength(Category::FourOfAKind, &[&[top_rank][..], &kicker[..]].concat());
    }
    if top_count == 3 {
        if let Some((count, pair)) = second {
            if count >= 2 {
                return strength(Category::FullHouse, &[top_rank, pair]);
            }
        }
    }
    if let Some(s) = flush_suit {
        return strength(Category::Flush, &top_ranks(suit_masks[s], &[], 5));
    }
    if let Some(high) = straight_high(rank_mask) {
        return strength(Category::Straight, &[high]);
    }
    if top_count == 3 {
        let kickers = top_ranks(rank_mask, &[top_rank], 2);
        return strength(Category::ThreeOfAKind, &[&[top_rank][..], &kickers[..]].concat());
    }
    if top_count == 2 {
        if let Some((2, low_pair)) = second {
            // a third pair can still play as the kicker
            let kicker = top_ranks(rank_mask, &[top_rank, low_pair], 1);
            return strength(
                Category::TwoPair,
                &[&[top_rank, low_pair][..], &kicker[..]].concat(),
            );
        }
        let kickers = top_ranks(rank_mask, &[top_rank], 3);
        return strength(Category::OnePair, &[&[top_rank][..], &kickers[..]].concat());
    }
    strength(Category::HighCard, &top_ranks(rank_mask, &[], 5))
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, &r) in kickers.iter_mut().zip(ranks) {
        *slot = r;
    }
    HandStrength { category, kickers }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Highest `n` ranks present in `mask`, skipping `exclude`.
fn top_ranks(mask: u16, exclude: &[u8], n: usize) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| mask & (1u16 << r) != 0 && !exclude.contains(&r))
        .take(n)
        .collect()
}

fn straight_high(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if m & (1 << 14) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b1_1111u16 << (high - 4);
        m & window == window
    })
}
