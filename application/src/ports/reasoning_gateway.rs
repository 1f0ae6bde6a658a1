//! Reasoning gateway port
//!
//! The router never calls the network itself. When it decides to escalate,
//! it hands the untouched participant data to this port; the infrastructure
//! layer implements it against the actual reasoning service.

use crate::ports::round_store::RoundVotes;
use async_trait::async_trait;
use consenso_domain::{Domain, Participant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the reasoning service is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Produce one final decision
    Decide,
    /// Propose several alternative options for a voting round
    Propose {
        /// Number of options to propose
        options: u32,
    },
}

/// Escalation payload: the full, untouched participant context.
#[derive(Debug, Clone, Serialize)]
pub struct EscalationRequest {
    /// Decision domain
    pub domain: Domain,
    /// Decide vs propose-options
    pub task: TaskKind,
    /// Participant records, exactly as received
    pub participants: Vec<Participant>,
    /// Prior-round votes, present in iterative mode only
    pub prior_votes: Option<RoundVotes>,
}

impl EscalationRequest {
    pub fn decide(domain: Domain, participants: Vec<Participant>) -> Self {
        Self {
            domain,
            task: TaskKind::Decide,
            participants,
            prior_votes: None,
        }
    }

    pub fn propose(domain: Domain, participants: Vec<Participant>, options: u32) -> Self {
        Self {
            domain,
            task: TaskKind::Propose { options },
            participants,
            prior_votes: None,
        }
    }

    pub fn with_prior_votes(mut self, votes: Option<RoundVotes>) -> Self {
        self.prior_votes = votes;
        self
    }
}

/// Errors from the reasoning service
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No API key configured for the reasoning service")]
    MissingApiKey,

    #[error("Reasoning service request failed: {0}")]
    Request(String),

    #[error("Reasoning service returned an empty response")]
    EmptyResponse,
}

/// External reasoning service, invoked only on escalation
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Ask the service to reason over the escalated context
    async fn reason(&self, request: &EscalationRequest) -> Result<String, GatewayError>;
}
