//! Application use cases

pub mod route_decision;

pub use route_decision::{
    DecisionOutcome, EscalationReason, MIN_CONFIDENCE, RouteError, RouteOutcome, Router,
    RunDecisionUseCase,
};
