//! Complexity scoring
//!
//! Each decision domain evaluates how likely naive aggregation is to fail
//! before any solving happens. The score is a cheap, explainable proxy used
//! by the router to decide whether escalating to the external reasoning
//! service is worth it.

use serde::{Deserialize, Serialize};

/// Default simplicity threshold: problems scoring below it are "simple"
pub const DEFAULT_SIMPLICITY_THRESHOLD: f64 = 0.6;

/// Result of evaluating the complexity of a problem instance.
///
/// `score` is 0.0 (trivial) to 1.0 (maximally hard). `factors` lists the
/// conditions that contributed, in evaluation order. Built fresh per call
/// and never mutated afterwards.
///
/// # Example
///
/// ```
/// use consenso_domain::ComplexityScore;
///
/// let score = ComplexityScore::new(0.45, vec!["Sin fechas en comun".to_string()]);
/// assert!(score.is_simple(0.6));
/// assert!(!score.is_simple(0.4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    /// 0.0 (trivial) to 1.0 (very complex)
    pub score: f64,
    /// Human-readable contributing factors, in evaluation order
    pub factors: Vec<String>,
}

impl ComplexityScore {
    /// Create a score, clamping to [0.0, 1.0]
    pub fn new(score: f64, factors: Vec<String>) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            factors,
        }
    }

    /// A problem is simple when its score is strictly below the threshold
    pub fn is_simple(&self, threshold: f64) -> bool {
        self.score < threshold
    }
}

/// Accumulates weighted complexity factors during evaluation.
///
/// Each triggered condition adds a fixed weight; some low-impact conditions
/// add weight without a factor line. The final score is clamped to 1.0, and
/// an evaluation with no triggered factor reports the given baseline text.
#[derive(Debug, Default)]
pub struct ComplexityBuilder {
    score: f64,
    factors: Vec<String>,
}

impl ComplexityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add weight with an explanatory factor
    pub fn add(&mut self, weight: f64, factor: impl Into<String>) {
        self.score += weight;
        self.factors.push(factor.into());
    }

    /// Add weight without a factor line (minor condition)
    pub fn add_silent(&mut self, weight: f64) {
        self.score += weight;
    }

    /// Finish, emitting `baseline` as the single factor when none triggered
    pub fn finish(self, baseline: &str) -> ComplexityScore {
        let factors = if self.factors.is_empty() {
            vec![baseline.to_string()]
        } else {
            self.factors
        };
        ComplexityScore::new(self.score, factors)
    }
}
