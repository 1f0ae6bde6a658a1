//! Round persistence port
//!
//! Iterative decision mode alternates proposal rounds and voting rounds.
//! Both are persisted as numbered records so a run can be resumed later;
//! the infrastructure layer decides where and how they are stored.

use consenso_domain::Domain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A set of options proposed for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Round number, starting at 1
    pub round: u32,
    /// Decision domain the options belong to
    #[serde(rename = "type")]
    pub domain: Domain,
    /// Raw proposal text, one block with the numbered options
    pub content: String,
}

/// One participant's vote in a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantVote {
    pub participant: String,
    pub choice: String,
}

/// All votes collected for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundVotes {
    pub round: u32,
    pub votes: Vec<ParticipantVote>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl RoundVotes {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            votes: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Record a vote, replacing any earlier vote by the same participant
    pub fn record(&mut self, participant: impl Into<String>, choice: impl Into<String>) {
        let participant = participant.into();
        self.votes.retain(|v| v.participant != participant);
        self.votes.push(ParticipantVote {
            participant,
            choice: choice.into(),
        });
    }

    /// Choices in vote order, for feeding back into a tally
    pub fn choices(&self) -> Vec<String> {
        self.votes.iter().map(|v| v.choice.clone()).collect()
    }
}

/// Errors from round persistence
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No proposal stored for round {0}")]
    MissingProposal(u32),

    #[error("Round storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt round record: {0}")]
    Corrupt(String),
}

/// Persistence for proposal/vote rounds
pub trait RoundStore: Send + Sync {
    /// Next round number (1 when nothing is stored yet)
    fn current_round(&self) -> Result<u32, StoreError>;

    fn save_proposal(&self, proposal: &Proposal) -> Result<(), StoreError>;

    fn load_proposal(&self, round: u32) -> Result<Proposal, StoreError>;

    fn save_votes(&self, votes: &RoundVotes) -> Result<(), StoreError>;

    /// Votes for a round, `None` when nobody has voted yet
    fn load_votes(&self, round: u32) -> Result<Option<RoundVotes>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_replaces_earlier_vote() {
        let mut votes = RoundVotes::new(1);
        votes.record("Ana", "1");
        votes.record("Carlos", "2");
        votes.record("Ana", "3");

        assert_eq!(votes.votes.len(), 2);
        assert_eq!(votes.choices(), vec!["2", "3"]);
    }

    #[test]
    fn test_round_record_wire_format() {
        let mut votes = RoundVotes::new(2);
        votes.record("Ana", "1");

        let json = serde_json::to_value(&votes).unwrap();
        assert_eq!(json["round"], 2);
        assert_eq!(json["votes"][0]["participant"], "Ana");
        assert_eq!(json["votes"][0]["choice"], "1");
        assert_eq!(json["comments"], serde_json::json!([]));

        let proposal = Proposal {
            round: 1,
            domain: Domain::Meeting,
            content: "OPCION 1 ...".to_string(),
        };
        let json = serde_json::to_value(&proposal).unwrap();
        assert_eq!(json["type"], "meeting");
        assert_eq!(json["content"], "OPCION 1 ...");
    }
}
