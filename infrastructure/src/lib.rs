//! Infrastructure layer for consenso
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: participant file loading, synthetic data generation,
//! file-based round persistence, the Gemini reasoning gateway, and
//! configuration file loading.

pub mod config;
pub mod data;
pub mod gemini;
pub mod rounds;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileDataConfig, FileGeminiConfig};
pub use data::{DataGenerator, LoadError, ParticipantLoader};
pub use gemini::GeminiGateway;
pub use rounds::FileRoundStore;
