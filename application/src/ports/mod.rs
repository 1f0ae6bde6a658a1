//! Ports (interfaces) to the outside world
//!
//! The application layer depends on these traits only; infrastructure
//! provides the concrete adapters.

pub mod reasoning_gateway;
pub mod round_store;

pub use reasoning_gateway::{EscalationRequest, GatewayError, ReasoningGateway, TaskKind};
pub use round_store::{ParticipantVote, Proposal, RoundStore, RoundVotes, StoreError};
