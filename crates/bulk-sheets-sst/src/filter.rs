//! Bloom filter over string table entries
//!
//! Answers "definitely new" or "maybe seen" with no false negatives. The
//! filter is organised in generations: each generation is a bit array sized
//! for a fixed insertion budget. When the newest generation fills up, the
//! filter is rebuilt by opening a new generation with twice the budget,
//! seeded from the keys the recency cache currently holds. Older
//! generations keep answering queries, so keys evicted from the cache still
//! test as "maybe" and are resolved by a disk scan rather than duplicated.

use ahash::RandomState;
use log::debug;

use crate::entry::EntryRef;

/// Seeds for the two base hashes (double hashing: `h1 + i * h2`)
const H1_SEEDS: [u64; 4] = [
    0x243F_6A88_85A3_08D3,
    0x1319_8A2E_0370_7344,
    0xA409_3822_299F_31D0,
    0x082E_FA98_EC4E_6C89,
];
const H2_SEEDS: [u64; 4] = [
    0x4528_21E6_38D0_1377,
    0xBE54_66CF_34E9_0C6C,
    0xC0AC_29B7_C97C_50DD,
    0x3F84_D5B5_B547_0917,
];

#[derive(Debug)]
struct Generation {
    bits: Vec<u64>,
    num_bits: usize,
    num_hashes: usize,
    budget: usize,
    inserted: usize,
}

impl Generation {
    fn new(budget: usize, false_positive_rate: f64) -> Self {
        let budget = budget.max(1);
        let num_bits = optimal_num_bits(budget, false_positive_rate).max(64);
        let num_hashes = optimal_num_hashes(budget, num_bits);
        Self {
            bits: vec![0u64; (num_bits + 63) / 64],
            num_bits,
            num_hashes,
            budget,
            inserted: 0,
        }
    }

    #[inline]
    fn bit(&self, h1: u64, h2: u64, i: usize) -> (usize, u64) {
        let index = (h1.wrapping_add((i as u64).wrapping_mul(h2)) % self.num_bits as u64) as usize;
        (index / 64, 1u64 << (index % 64))
    }

    fn set_bits(&mut self, h1: u64, h2: u64) {
        for i in 0..self.num_hashes {
            let (word, mask) = self.bit(h1, h2, i);
            self.bits[word] |= mask;
        }
    }

    fn insert(&mut self, h1: u64, h2: u64) {
        self.set_bits(h1, h2);
        self.inserted += 1;
    }

    fn contains(&self, h1: u64, h2: u64) -> bool {
        (0..self.num_hashes).all(|i| {
            let (word, mask) = self.bit(h1, h2, i);
            self.bits[word] & mask != 0
        })
    }
}

/// Bits for `n` items at false-positive rate `p`
fn optimal_num_bits(n: usize, p: f64) -> usize {
    let m = -(n as f64 * p.ln()) / (2.0_f64.ln().powi(2));
    m.ceil() as usize
}

/// Hash functions for `n` items over `m` bits
fn optimal_num_hashes(n: usize, m: usize) -> usize {
    let k = (m as f64 / n as f64) * 2.0_f64.ln();
    (k.ceil() as usize).max(1)
}

/// Probabilistic membership test for interned entries
#[derive(Debug)]
pub struct MembershipFilter {
    generations: Vec<Generation>,
    false_positive_rate: f64,
    h1: RandomState,
    h2: RandomState,
    rebuilds: usize,
}

impl MembershipFilter {
    /// Create a filter sized for `expected_items` at `false_positive_rate`
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Self {
        let false_positive_rate = if false_positive_rate > 0.0 && false_positive_rate < 1.0 {
            false_positive_rate
        } else {
            0.01
        };
        Self {
            generations: vec![Generation::new(expected_items, false_positive_rate)],
            false_positive_rate,
            h1: RandomState::with_seeds(H1_SEEDS[0], H1_SEEDS[1], H1_SEEDS[2], H1_SEEDS[3]),
            h2: RandomState::with_seeds(H2_SEEDS[0], H2_SEEDS[1], H2_SEEDS[2], H2_SEEDS[3]),
            rebuilds: 0,
        }
    }

    #[inline]
    fn hashes(&self, key: EntryRef<'_>) -> (u64, u64) {
        // h2 must be odd so successive probes never collapse onto one bit
        (self.h1.hash_one(key), self.h2.hash_one(key) | 1)
    }

    fn current(&mut self) -> &mut Generation {
        let last = self.generations.len() - 1;
        &mut self.generations[last]
    }

    /// Record `key` as present
    pub fn insert(&mut self, key: EntryRef<'_>) {
        let (h1, h2) = self.hashes(key);
        self.current().insert(h1, h2);
    }

    /// `false` means `key` was never inserted; `true` means it may have been
    pub fn might_contain(&self, key: EntryRef<'_>) -> bool {
        let (h1, h2) = self.hashes(key);
        self.generations.iter().any(|g| g.contains(h1, h2))
    }

    /// Check if the newest generation has used up its insertion budget
    pub fn needs_rebuild(&self) -> bool {
        self.generations
            .last()
            .map_or(false, |g| g.inserted >= g.budget)
    }

    /// Open a new generation with twice the budget, seeded with `resident` keys.
    ///
    /// Seeded keys do not count against the new generation's budget.
    pub fn rebuild<'a, I>(&mut self, resident: I)
    where
        I: IntoIterator<Item = EntryRef<'a>>,
    {
        let budget = self.generations.last().map_or(1, |g| g.budget).saturating_mul(2);
        let mut generation = Generation::new(budget, self.false_positive_rate);
        let mut seeded = 0usize;
        for key in resident {
            let (h1, h2) = self.hashes(key);
            generation.set_bits(h1, h2);
            seeded += 1;
        }
        self.generations.push(generation);
        self.rebuilds += 1;
        debug!(
            "membership filter rebuilt: generation {} budget {} seeded with {} cached keys",
            self.generations.len(),
            budget,
            seeded
        );
    }

    /// Number of rebuilds so far
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Number of generations consulted per query
    pub fn generations(&self) -> usize {
        self.generations.len()
    }

    /// Approximate memory held by the bit arrays
    pub fn size_in_bytes(&self) -> usize {
        self.generations.iter().map(|g| g.bits.len() * 8).sum()
    }
}
