//! Domain layer for consenso
//!
//! Pure decision-solving core: given a list of participant preference
//! records and a decision domain, aggregate them into one consensus
//! decision and say how trustworthy that decision is.
//!
//! # Core Concepts
//!
//! ## Complexity first
//!
//! Every domain solver can score a problem instance *before* solving it
//! ([`ComplexityScore`]). The router uses that score to decide between the
//! local algorithmic solve and escalation to an external reasoning service.
//!
//! ## Aggregation
//!
//! - [`voting`]: plurality and Borda-count voting over list-valued fields
//! - [`budget`]: minimum/median reduction over declared budgets
//! - [`matching`]: greedy and Gale-Shapley task-to-participant assignment
//!
//! Everything here is a pure function over an immutable input snapshot:
//! no I/O, no network, no shared state across invocations.

pub mod budget;
pub mod complexity;
pub mod core;
pub mod matching;
pub mod participant;
pub mod result;
pub mod solver;
pub mod voting;

// Re-export commonly used types
pub use budget::BudgetMethod;
pub use complexity::{ComplexityScore, DEFAULT_SIMPLICITY_THRESHOLD};
pub use self::core::DomainError;
pub use matching::{Matching, MatchingMethod};
pub use participant::Participant;
pub use result::{DecisionValue, SolverResult};
pub use solver::{Domain, Solver, SolverConfig, solver_for};
pub use voting::{Tally, VotingMethod};
