//! Participant data: file loading and synthetic generation

pub mod generator;
pub mod loader;

pub use generator::DataGenerator;
pub use loader::{LoadError, ParticipantLoader};
