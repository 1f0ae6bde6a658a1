//! Preference voting aggregation
//!
//! Two methods over list-valued preference fields:
//!
//! - **Plurality**: each list membership counts one point, position ignored.
//! - **Borda**: the item at 0-indexed rank `r` of a list of length `n`
//!   earns `n - r` points, rewarding higher preferences.
//!
//! Tie-breaking is deterministic: the winner among equal scores is the item
//! that first appeared across participants in the canonical participant
//! ordering (the order of the input slice).

use crate::core::DomainError;
use crate::participant::Participant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Voting method for list-valued preference fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VotingMethod {
    /// Each mention counts one vote, irrespective of rank
    #[default]
    Plurality,
    /// Rank-weighted: first preference of an n-item list earns n points
    Borda,
}

impl VotingMethod {
    /// Label used in explanation trails
    pub fn label(&self) -> &'static str {
        match self {
            VotingMethod::Plurality => "Pluralidad",
            VotingMethod::Borda => "Borda",
        }
    }
}

impl fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VotingMethod::Plurality => write!(f, "plurality"),
            VotingMethod::Borda => write!(f, "borda"),
        }
    }
}

impl FromStr for VotingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plurality" => Ok(VotingMethod::Plurality),
            "borda" => Ok(VotingMethod::Borda),
            other => Err(DomainError::unknown_method("voting", other)),
        }
    }
}

/// Item -> score mapping with deterministic iteration order.
///
/// Scores are accumulated per call; the first-appearance order of items is
/// kept so that ties always break the same way for the same input.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    scores: HashMap<String, usize>,
    order: Vec<String>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points to an item, registering first appearance
    pub fn add(&mut self, item: &str, points: usize) {
        if !self.scores.contains_key(item) {
            self.order.push(item.to_string());
        }
        *self.scores.entry(item.to_string()).or_insert(0) += points;
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn score(&self, item: &str) -> usize {
        self.scores.get(item).copied().unwrap_or(0)
    }

    /// Highest-scoring item; ties break by first appearance
    pub fn winner(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for item in &self.order {
            let score = self.scores[item];
            if best.map(|(_, s)| score > s).unwrap_or(true) {
                best = Some((item.as_str(), score));
            }
        }
        best
    }

    /// Top `n` items by descending score, stable on first appearance
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|item| (item.as_str(), self.scores[item]))
            .collect();
        // Stable sort keeps first-appearance order within equal scores
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// All items in descending-score order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        self.top(self.order.len())
    }
}

/// Tally a list-valued field across participants with the given method.
pub fn tally_lists<F>(method: VotingMethod, participants: &[Participant], get: F) -> Tally
where
    F: Fn(&Participant) -> Vec<String>,
{
    let mut tally = Tally::new();
    for participant in participants {
        let items = get(participant);
        let n = items.len();
        for (rank, item) in items.iter().enumerate() {
            let points = match method {
                VotingMethod::Plurality => 1,
                VotingMethod::Borda => n - rank,
            };
            tally.add(item, points);
        }
    }
    tally
}

/// Tally a single-valued field (one vote per participant).
pub fn tally_single<F>(participants: &[Participant], get: F) -> Tally
where
    F: Fn(&Participant) -> Option<String>,
{
    let mut tally = Tally::new();
    for participant in participants {
        if let Some(value) = get(participant) {
            if !value.is_empty() {
                tally.add(&value, 1);
            }
        }
    }
    tally
}

/// Maximum attainable Borda score for a field: the sum of each
/// participant's list length (every top choice is worth its list length).
pub fn max_attainable<F>(participants: &[Participant], get: F) -> usize
where
    F: Fn(&Participant) -> Vec<String>,
{
    participants.iter().map(|p| get(p).len()).sum()
}

/// Agreement ratio backing the confidence computation.
///
/// Plurality normalizes the winner score against the participant count;
/// Borda against the maximum attainable score for the field.
pub fn agreement_ratio(
    method: VotingMethod,
    winner_score: usize,
    participant_count: usize,
    max_attainable: usize,
) -> f64 {
    let denominator = match method {
        VotingMethod::Plurality => participant_count,
        VotingMethod::Borda => max_attainable,
    };
    if denominator == 0 {
        0.0
    } else {
        winner_score as f64 / denominator as f64
    }
}
