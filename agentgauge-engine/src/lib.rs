pub mod corpus;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod origin;
pub mod result;
pub mod rubric;

pub use corpus::Corpus;
pub use engine::ScoringEngine;
pub use error::ScoreError;
pub use fetch::{FetchedPage, Fetcher};
pub use frontier::{CrawlConfig, CrawlState};
pub use origin::Origin;
pub use result::{
    CategoryScore, FrictionSummary, FrictionType, Grade, ScoringResult, SubScore,
};
