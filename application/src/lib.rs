//! Application layer for consenso
//!
//! Orchestrates the domain solvers behind the routing policy: solve
//! locally when the problem is simple and the result confident, escalate
//! the untouched participant context otherwise. All outward dependencies
//! (reasoning service, round persistence) are ports implemented by the
//! infrastructure layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    EscalationRequest, GatewayError, ParticipantVote, Proposal, ReasoningGateway, RoundStore,
    RoundVotes, StoreError, TaskKind,
};
pub use use_cases::{
    DecisionOutcome, EscalationReason, MIN_CONFIDENCE, RouteError, RouteOutcome, Router,
    RunDecisionUseCase,
};
