//! Hiring matcher library: scores a resume against a job description

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod store;
pub mod output;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::matcher::{MatchEngine, MatchResult};
pub use processing::scoring::Selection;
