//! Core types and services for stockagent-mcp.
//!
//! This crate owns the portfolio document loader, the access-key lookup built
//! on top of it, and the keyword classifier used to decide whether a question
//! is about the user's own holdings.

pub mod classifier;
pub mod error;
pub mod loader;
pub mod lookup;

pub use classifier::{ClassificationResult, KeywordClassifier};
pub use error::PortfolioError;
pub use loader::{PortfolioLoader, PortfolioSource};
pub use lookup::{LookupDefaults, PortfolioLookup};
