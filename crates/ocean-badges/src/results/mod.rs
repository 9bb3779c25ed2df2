//! Result lifecycle around the scoring core: submission parsing, rate limiting,
//! persistence with expiry, and the HTTP surface for results and badges.

pub mod rate_limit;
pub mod router;
pub mod service;
pub mod store;
pub mod submission;
pub mod views;

#[cfg(test)]
mod tests;

pub use rate_limit::{RateDecision, RateLimiter, SlidingWindowLimiter, Unlimited};
pub use router::{client_key, result_router, ResultRoutes};
pub use service::{result_key, ResultPolicy, ResultService, ResultServiceError, DEFAULT_RESULT_TTL};
pub use store::{InMemoryResultStore, ResultStore, StoreError};
pub use submission::{
    parse_submission, parse_submission_body, SubmissionError, SubmissionLimits,
};
pub use views::{ResultView, StoredResult, TraitView};
