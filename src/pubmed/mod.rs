//! PubMed ESearch client
//!
//! This module issues rate-limited ESearch requests and turns the XML
//! responses into lists of study identifiers.

pub mod client;
pub mod models;
pub mod responses;

// Re-export public types
pub use client::PubMedClient;
pub use models::SearchOutcome;
pub use responses::parse_search_outcome;
