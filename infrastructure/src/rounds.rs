//! File-based round persistence
//!
//! Proposals land in `proposals/round_N.json` and votes in
//! `votes/round_N.json`, matching the layout the CLI documents. Directories
//! are created lazily on first write.

use consenso_application::ports::round_store::{Proposal, RoundStore, RoundVotes, StoreError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Round store over two sibling directories
pub struct FileRoundStore {
    proposals_dir: PathBuf,
    votes_dir: PathBuf,
}

impl FileRoundStore {
    /// Store rooted at `base` (usually the working directory)
    pub fn new(base: &Path) -> Self {
        Self {
            proposals_dir: base.join("proposals"),
            votes_dir: base.join("votes"),
        }
    }

    fn round_file(dir: &Path, round: u32) -> PathBuf {
        dir.join(format!("round_{}.json", round))
    }

    /// Round numbers present in a directory, from `round_N.json` file names
    fn existing_rounds(dir: &Path) -> Vec<u32> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                name.strip_prefix("round_")?
                    .strip_suffix(".json")?
                    .parse()
                    .ok()
            })
            .collect()
    }
}

impl RoundStore for FileRoundStore {
    fn current_round(&self) -> Result<u32, StoreError> {
        let max = Self::existing_rounds(&self.proposals_dir)
            .into_iter()
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }

    fn save_proposal(&self, proposal: &Proposal) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.proposals_dir)?;
        let path = Self::round_file(&self.proposals_dir, proposal.round);
        let json = serde_json::to_string_pretty(proposal)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "propuesta guardada");
        Ok(())
    }

    fn load_proposal(&self, round: u32) -> Result<Proposal, StoreError> {
        let path = Self::round_file(&self.proposals_dir, round);
        if !path.exists() {
            return Err(StoreError::MissingProposal(round));
        }
        let raw = std::fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn save_votes(&self, votes: &RoundVotes) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.votes_dir)?;
        let path = Self::round_file(&self.votes_dir, votes.round);
        let json = serde_json::to_string_pretty(votes)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "votos guardados");
        Ok(())
    }

    fn load_votes(&self, round: u32) -> Result<Option<RoundVotes>, StoreError> {
        let path = Self::round_file(&self.votes_dir, round);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        let votes = serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(Some(votes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consenso_domain::Domain;

    fn proposal(round: u32) -> Proposal {
        Proposal {
            round,
            domain: Domain::Meeting,
            content: format!("OPCION 1 de ronda {}", round),
        }
    }

    #[test]
    fn test_first_round_is_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRoundStore::new(dir.path());
        assert_eq!(store.current_round().unwrap(), 1);
    }

    #[test]
    fn test_current_round_is_max_plus_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRoundStore::new(dir.path());
        store.save_proposal(&proposal(1)).unwrap();
        store.save_proposal(&proposal(3)).unwrap();
        assert_eq!(store.current_round().unwrap(), 4);
    }

    #[test]
    fn test_proposal_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRoundStore::new(dir.path());
        store.save_proposal(&proposal(2)).unwrap();

        let loaded = store.load_proposal(2).unwrap();
        assert_eq!(loaded, proposal(2));
        assert!(matches!(
            store.load_proposal(9),
            Err(StoreError::MissingProposal(9))
        ));
    }

    #[test]
    fn test_votes_roundtrip_and_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRoundStore::new(dir.path());
        assert!(store.load_votes(1).unwrap().is_none());

        let mut votes = RoundVotes::new(1);
        votes.record("Ana Garcia", "2");
        votes.comments.push("preferimos la opcion barata".to_string());
        store.save_votes(&votes).unwrap();

        let loaded = store.load_votes(1).unwrap().unwrap();
        assert_eq!(loaded, votes);
    }

    #[test]
    fn test_corrupt_proposal_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRoundStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("proposals")).unwrap();
        std::fs::write(dir.path().join("proposals/round_1.json"), "{").unwrap();
        assert!(matches!(
            store.load_proposal(1),
            Err(StoreError::Corrupt(_))
        ));
    }
}
