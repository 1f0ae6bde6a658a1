//! Gemini reasoning service adapter

mod gateway;
pub mod prompts;

pub use gateway::GeminiGateway;
