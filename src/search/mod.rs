//! Relevance search over the directory.
//!
//! Queries are analyzed for aliases, emergencies and intent, candidates are
//! assembled from direct text matches and inferred categories, and the result
//! is ranked by a rule table chosen from the query's intent.

pub mod engine;
pub mod intent;
pub(crate) mod keywords;
pub(crate) mod matching;
pub(crate) mod scoring;

pub use engine::{SearchEngine, SearchHit, SearchOutcome};
pub use intent::{QueryAnalysis, RankingMode};
