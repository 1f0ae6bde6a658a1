//! Per-domain consensus solvers
//!
//! One solver per decision domain, all behind the [`Solver`] trait:
//! complexity evaluation first, then the actual aggregation into a
//! [`SolverResult`]. The domain is a closed set selected once at
//! configuration time; each variant binds its own aggregator/matcher
//! wiring, never re-dispatched per field.

pub mod meeting;
pub mod project;
pub mod purchase;
pub mod trip;

use crate::budget::BudgetMethod;
use crate::complexity::{ComplexityScore, DEFAULT_SIMPLICITY_THRESHOLD};
use crate::core::DomainError;
use crate::matching::MatchingMethod;
use crate::participant::Participant;
use crate::result::SolverResult;
use crate::voting::VotingMethod;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Explanation line used whenever a solve is attempted with fewer than 2
/// participants
pub const NEED_TWO_PARTICIPANTS: &str = "Se necesitan al menos 2 participantes";

/// Complexity factor emitted for groups of fewer than 2 participants
pub const TOO_FEW_PARTICIPANTS: &str = "Menos de 2 participantes";

/// Decision domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Social meeting: date, hour, zone, venue, dietary restrictions
    Meeting,
    /// Group trip: destination, dates, duration, budget, activities
    Trip,
    /// Project task allocation
    Project,
    /// Group purchase: products, brands, budget, priority
    Purchase,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Meeting, Domain::Trip, Domain::Project, Domain::Purchase];

    /// Canonical tag ("meeting", "trip", ...)
    pub fn tag(&self) -> &'static str {
        match self {
            Domain::Meeting => "meeting",
            Domain::Trip => "trip",
            Domain::Project => "project",
            Domain::Purchase => "purchase",
        }
    }

    /// Tag used in participant data files (`tipo` field)
    pub fn data_tag(&self) -> &'static str {
        match self {
            Domain::Meeting => "reunion",
            Domain::Trip => "viaje",
            Domain::Project => "proyecto",
            Domain::Purchase => "compra",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meeting" | "reunion" => Ok(Domain::Meeting),
            "trip" | "viaje" => Ok(Domain::Trip),
            "project" | "proyecto" => Ok(Domain::Project),
            "purchase" | "compra" => Ok(Domain::Purchase),
            other => Err(DomainError::UnknownDomain(other.to_string())),
        }
    }
}

/// Aggregation strategy configuration.
///
/// Methods are validated at parse time ([`FromStr`] on each enum); an
/// unknown tag is a construction error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Voting method for list-valued preference fields
    pub voting: VotingMethod,
    /// Budget reduction method
    pub budget: BudgetMethod,
    /// Task matching strategy
    pub matching: MatchingMethod,
    /// Problems scoring below this are solved locally (default 0.6)
    pub simplicity_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            voting: VotingMethod::default(),
            budget: BudgetMethod::default(),
            matching: MatchingMethod::default(),
            simplicity_threshold: DEFAULT_SIMPLICITY_THRESHOLD,
        }
    }
}

impl SolverConfig {
    pub fn with_voting(mut self, voting: VotingMethod) -> Self {
        self.voting = voting;
        self
    }

    pub fn with_budget(mut self, budget: BudgetMethod) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_matching(mut self, matching: MatchingMethod) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_simplicity_threshold(mut self, threshold: f64) -> Self {
        self.simplicity_threshold = threshold;
        self
    }
}

/// A domain solver: cheap complexity proxy plus the actual aggregation.
///
/// Both operations are pure functions over the input snapshot; solvers
/// hold configuration only, never state.
pub trait Solver: Send + Sync {
    /// Score how likely naive aggregation is to fail on this input
    fn evaluate_complexity(&self, participants: &[Participant]) -> ComplexityScore;

    /// Aggregate the participants' preferences into one decision
    fn solve(&self, participants: &[Participant]) -> SolverResult;
}

/// Build the solver for a domain with the given configuration.
pub fn solver_for(domain: Domain, config: &SolverConfig) -> Box<dyn Solver> {
    match domain {
        Domain::Meeting => Box::new(meeting::MeetingSolver::new(config.voting)),
        Domain::Trip => Box::new(trip::TripSolver::new(config.voting, config.budget)),
        Domain::Project => Box::new(project::ProjectSolver::new(config.matching)),
        Domain::Purchase => Box::new(purchase::PurchaseSolver::new(config.voting, config.budget)),
    }
}

/// Items shared by *every* participant for a list-valued field.
pub(crate) fn common_items<F>(participants: &[Participant], get: F) -> HashSet<String>
where
    F: Fn(&Participant) -> Vec<String>,
{
    let mut iter = participants.iter();
    let Some(first) = iter.next() else {
        return HashSet::new();
    };
    let mut common: HashSet<String> = get(first).into_iter().collect();
    for participant in iter {
        let items: HashSet<String> = get(participant).into_iter().collect();
        common.retain(|item| items.contains(item));
    }
    common
}

/// Union of a list-valued field across participants, sorted for
/// deterministic output.
pub(crate) fn union_sorted<F>(participants: &[Participant], get: F) -> Vec<String>
where
    F: Fn(&Participant) -> Vec<String>,
{
    let mut all: Vec<String> = participants.iter().flat_map(|p| get(p)).collect();
    all.sort();
    all.dedup();
    all
}

/// Budgets declared by participants (missing or non-positive excluded).
pub(crate) fn declared_budgets(participants: &[Participant], field: &str) -> Vec<f64> {
    participants
        .iter()
        .filter_map(|p| p.number(field))
        .filter(|v| *v > 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse_accepts_both_tags() {
        assert_eq!("meeting".parse::<Domain>().ok(), Some(Domain::Meeting));
        assert_eq!("reunion".parse::<Domain>().ok(), Some(Domain::Meeting));
        assert_eq!("viaje".parse::<Domain>().ok(), Some(Domain::Trip));
        assert_eq!("PROYECTO".parse::<Domain>().ok(), Some(Domain::Project));
        assert_eq!("compra".parse::<Domain>().ok(), Some(Domain::Purchase));
        assert!("fiesta".parse::<Domain>().is_err());
    }

    #[test]
    fn test_config_default_threshold() {
        let config = SolverConfig::default();
        assert_eq!(config.simplicity_threshold, 0.6);
        assert_eq!(config.voting, VotingMethod::Plurality);
        assert_eq!(config.budget, BudgetMethod::Minimum);
        assert_eq!(config.matching, MatchingMethod::Greedy);
    }

    #[test]
    fn test_common_items_empty_when_any_disjoint() {
        let participants = vec![
            Participant::new("Ana").with_list("fechas", &["a", "b"]),
            Participant::new("Carlos").with_list("fechas", &["b", "c"]),
            Participant::new("Maria").with_list("fechas", &["c"]),
        ];
        assert!(common_items(&participants, |p| p.list("fechas")).is_empty());
    }

    #[test]
    fn test_union_sorted_dedups() {
        let participants = vec![
            Participant::new("Ana").with_list("restricciones", &["vegano", "sin gluten"]),
            Participant::new("Carlos").with_list("restricciones", &["vegano"]),
        ];
        assert_eq!(
            union_sorted(&participants, |p| p.list("restricciones")),
            vec!["sin gluten", "vegano"]
        );
    }

    #[test]
    fn test_declared_budgets_skips_missing_and_zero() {
        let participants = vec![
            Participant::new("Ana").with_field("presupuesto_max", serde_json::json!(500)),
            Participant::new("Carlos").with_field("presupuesto_max", serde_json::json!(0)),
            Participant::new("Maria"),
        ];
        assert_eq!(declared_budgets(&participants, "presupuesto_max"), vec![500.0]);
    }

    #[test]
    fn test_solver_for_builds_every_domain() {
        let config = SolverConfig::default();
        for domain in Domain::ALL {
            let solver = solver_for(domain, &config);
            let score = solver.evaluate_complexity(&[]);
            assert_eq!(score.score, 0.0);
            assert_eq!(score.factors, vec![TOO_FEW_PARTICIPANTS]);
        }
    }
}
