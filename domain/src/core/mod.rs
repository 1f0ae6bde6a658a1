//! Core domain primitives shared by all decision types

pub mod error;

pub use error::DomainError;
