//! Predecessor search: resolution, live-cell minimization and verification

pub mod error;
pub mod minimizer;
pub mod problem;
pub mod resolver;
pub mod solution;
pub mod validator;

pub use error::SearchError;
pub use minimizer::{minimize, Minimized, Phase, Probe, SearchState};
pub use problem::ReverseProblem;
pub use resolver::resolve;
pub use solution::Solution;
pub use validator::{is_predecessor, PredecessorVerifier, VerificationResult};
