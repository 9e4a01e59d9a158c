use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::scoring::engagement_rate;
use crate::Message;

/// Precomposed "é"; a decomposed spelling does not match.
pub const CAFE_USER_ID: &str = "user_caf\u{e9}";
pub const CAFE_FOLLOWERS: u64 = 4242;
pub const FIBONACCI_ID_LEN: usize = 13;
pub const FIBONACCI_FOLLOWERS: u64 = 233;
pub const PRIME_SUFFIX: &str = "_prime";

const FOLLOWER_WEIGHT: f64 = 0.4;
const ENGAGEMENT_WEIGHT: f64 = 0.6;
const FOLLOWER_OFFSET: u64 = 100;
const DEFAULT_MODULUS: u64 = 10_000;
const PRIME_MODULUS: u64 = 1_000;
const PRIME_SEARCH_CAP: u64 = 10_000;

/// Synthetic follower count, a pure function of the author id.
pub fn follower_count(user_id: &str) -> u64 {
    if user_id == CAFE_USER_ID {
        return CAFE_FOLLOWERS;
    }
    if user_id.chars().count() == FIBONACCI_ID_LEN {
        return FIBONACCI_FOLLOWERS;
    }
    if user_id.ends_with(PRIME_SUFFIX) {
        let seed = sha256_mod(user_id, PRIME_MODULUS) + FOLLOWER_OFFSET;
        return next_prime(seed);
    }
    sha256_mod(user_id, DEFAULT_MODULUS) + FOLLOWER_OFFSET
}

/// SHA-256 of the UTF-8 bytes read as a big-endian integer, reduced mod `modulus`.
pub fn sha256_mod(value: &str, modulus: u64) -> u64 {
    let digest = Sha256::digest(value.as_bytes());
    digest
        .iter()
        .fold(0u64, |acc, &byte| (acc * 256 + byte as u64) % modulus)
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

fn next_prime(seed: u64) -> u64 {
    (seed..seed + PRIME_SEARCH_CAP)
        .find(|&candidate| is_prime(candidate))
        .unwrap_or(seed)
}

pub fn influence_score(followers: u64, engagement_rate: f64) -> f64 {
    followers as f64 * FOLLOWER_WEIGHT + engagement_rate * ENGAGEMENT_WEIGHT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEntry {
    pub user_id: String,
    pub followers: u64,
    pub engagement_rate: f64,
    pub influence_score: f64,
}

#[derive(Debug, Clone)]
pub struct UserAggregate {
    pub user_id: String,
    pub followers: u64,
    pub reactions: u64,
    pub shares: u64,
    pub views: u64,
}

impl UserAggregate {
    fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            followers: follower_count(user_id),
            reactions: 0,
            shares: 0,
            views: 0,
        }
    }

    pub fn engagement_rate(&self) -> f64 {
        engagement_rate(self.reactions, self.shares, self.views)
    }

    fn into_entry(self) -> InfluenceEntry {
        let engagement_rate = self.engagement_rate();
        InfluenceEntry {
            influence_score: influence_score(self.followers, engagement_rate),
            user_id: self.user_id,
            followers: self.followers,
            engagement_rate,
        }
    }
}

/// Accumulates per-author counters in first-appearance order. Follower
/// counts are computed once per author.
#[derive(Debug, Default)]
pub struct InfluenceRanker {
    users: Vec<UserAggregate>,
    index: HashMap<String, usize>,
}

impl InfluenceRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: &Message) {
        let slot = match self.index.get(&message.user_id) {
            Some(&slot) => slot,
            None => {
                self.users.push(UserAggregate::new(&message.user_id));
                let slot = self.users.len() - 1;
                self.index.insert(message.user_id.clone(), slot);
                slot
            }
        };

        let user = &mut self.users[slot];
        user.reactions = user.reactions.saturating_add(message.reactions);
        user.shares = user.shares.saturating_add(message.shares);
        user.views = user.views.saturating_add(message.views);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Descending influence score; equal scores keep first-appearance order.
    pub fn into_ranking(self) -> Vec<InfluenceEntry> {
        let mut ranking: Vec<InfluenceEntry> =
            self.users.into_iter().map(UserAggregate::into_entry).collect();
        ranking.sort_by(|a, b| {
            b.influence_score
                .partial_cmp(&a.influence_score)
                .unwrap_or(Ordering::Equal)
        });
        ranking
    }
}
