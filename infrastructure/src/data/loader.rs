//! Participant file loading

use consenso_domain::{Domain, Participant};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors while loading participant data
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("No participant JSON files in {0}")]
    Empty(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid participant file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads participant records from a directory of JSON files
pub struct ParticipantLoader;

impl ParticipantLoader {
    /// Load every `*.json` file in `dir`, sorted by file name.
    pub fn load(dir: &Path) -> Result<Vec<Participant>, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::MissingDir(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|source| LoadError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(LoadError::Empty(dir.to_path_buf()));
        }

        let mut participants = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            let participant: Participant =
                serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
                    path: path.clone(),
                    source,
                })?;
            debug!(file = %path.display(), name = %participant.name, "participante cargado");
            participants.push(participant);
        }
        Ok(participants)
    }

    /// Infer the decision domain from the first participant's `tipo` tag.
    /// Unknown or missing tags fall back to meeting.
    pub fn detect_domain(participants: &[Participant]) -> Domain {
        let Some(first) = participants.first() else {
            return Domain::Meeting;
        };
        match first.text("tipo") {
            Some(tag) => tag.parse().unwrap_or_else(|_| {
                warn!(tag, "tipo desconocido, asumiendo reunion");
                Domain::Meeting
            }),
            None => Domain::Meeting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, value: serde_json::Value) {
        std::fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    #[test]
    fn test_load_sorted_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "participante_02.json",
            json!({"nombre": "Carlos Lopez", "tipo": "viaje"}),
        );
        write(
            dir.path(),
            "participante_01.json",
            json!({"nombre": "Ana Garcia", "tipo": "viaje"}),
        );
        std::fs::write(dir.path().join("notas.txt"), "ignorado").unwrap();

        let participants = ParticipantLoader::load(dir.path()).unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].name, "Ana Garcia");
        assert_eq!(participants[1].name, "Carlos Lopez");
    }

    #[test]
    fn test_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            ParticipantLoader::load(&missing),
            Err(LoadError::MissingDir(_))
        ));
    }

    #[test]
    fn test_empty_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ParticipantLoader::load(dir.path()),
            Err(LoadError::Empty(_))
        ));
    }

    #[test]
    fn test_invalid_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roto.json"), "{").unwrap();
        assert!(matches!(
            ParticipantLoader::load(dir.path()),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_detect_domain_from_tipo() {
        let participants = vec![
            Participant::new("Ana").with_field("tipo", json!("proyecto")),
        ];
        assert_eq!(
            ParticipantLoader::detect_domain(&participants),
            Domain::Project
        );
    }

    #[test]
    fn test_detect_domain_defaults_to_meeting() {
        assert_eq!(ParticipantLoader::detect_domain(&[]), Domain::Meeting);

        let untagged = vec![Participant::new("Ana")];
        assert_eq!(ParticipantLoader::detect_domain(&untagged), Domain::Meeting);

        let unknown = vec![Participant::new("Ana").with_field("tipo", json!("fiesta"))];
        assert_eq!(ParticipantLoader::detect_domain(&unknown), Domain::Meeting);
    }
}
