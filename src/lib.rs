//! # Multiomics Survey
//!
//! Counts PubMed studies tagged with two or more omics keywords
//! (genomics, proteomics, metabolomics, ...) per publication year.
//!
//! ## Features
//!
//! - **Keyword combinations**: every subset of two or more keywords is searched
//! - **Rate limiting**: stays within the NCBI request budget
//! - **Deduplication**: a study matching several combinations counts once
//! - **Truncation check**: warns when PubMed holds more matches than it returned
//!
//! ## Quick Start
//!
//! ```no_run
//! use multiomics_survey::{ClientConfig, MultiomicsSurvey, PubMedClient, SurveyConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::with_config(
//!         ClientConfig::new().with_email("researcher@university.edu"),
//!     )?;
//!     let survey = MultiomicsSurvey::new(client, SurveyConfig::default())?;
//!
//!     for report in survey.run(&mut std::io::stdout()).await? {
//!         println!("{}: {}", report.range, report.unique_studies);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod keywords;
pub mod pubmed;
pub mod query;
pub mod rate_limit;
pub mod survey;

// Re-export main types for convenience
pub use config::{ClientConfig, SurveyConfig};
pub use error::{PubMedError, Result};
pub use keywords::{Keyword, KeywordCombination, keyword_combinations};
pub use pubmed::{PubMedClient, SearchOutcome};
pub use query::{DateRange, build_query_url};
pub use rate_limit::RateLimiter;
pub use survey::{MultiomicsSurvey, YearEndPolicy, YearReport};
