use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::rate_limit::{RateDecision, RateLimiter};
use super::store::{ResultStore, StoreError};
use super::submission::{
    parse_submission, parse_submission_body, SubmissionError, SubmissionLimits,
};
use super::views::{ResultView, StoredResult};
use crate::badge::{render_badge, BadgeOptions};
use crate::profile::{score, Answer, ItemCatalog, Profile, ScoreOptions, ScoringError};

pub const DEFAULT_RESULT_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Scoring and retention policy for a [`ResultService`].
#[derive(Debug, Clone)]
pub struct ResultPolicy {
    pub score_options: ScoreOptions,
    pub limits: SubmissionLimits,
    pub ttl: Duration,
}

impl Default for ResultPolicy {
    fn default() -> Self {
        Self {
            score_options: ScoreOptions::default(),
            limits: SubmissionLimits::default(),
            ttl: DEFAULT_RESULT_TTL,
        }
    }
}

/// Service composing submission parsing, rate limiting, scoring, and storage.
pub struct ResultService<S, L> {
    catalog: Arc<ItemCatalog>,
    store: Arc<S>,
    limiter: Arc<L>,
    policy: ResultPolicy,
}

pub fn result_key(id: &str) -> String {
    format!("result:{id}")
}

impl<S, L> ResultService<S, L>
where
    S: ResultStore + 'static,
    L: RateLimiter + 'static,
{
    pub fn new(
        catalog: Arc<ItemCatalog>,
        store: Arc<S>,
        limiter: Arc<L>,
        policy: ResultPolicy,
    ) -> Self {
        Self {
            catalog,
            store,
            limiter,
            policy,
        }
    }

    pub fn policy(&self) -> &ResultPolicy {
        &self.policy
    }

    /// Score a raw submission and persist the profile under a fresh id.
    ///
    /// Nothing is stored unless every step succeeds.
    pub fn submit(
        &self,
        client_key: &str,
        payload: &Value,
    ) -> Result<StoredResult, ResultServiceError> {
        self.admit(client_key)?;
        let answers = parse_submission(payload, &self.policy.limits)
            .map_err(|err| rejected(client_key, err))?;
        self.store_answers(&answers)
    }

    /// Like [`ResultService::submit`], for an undecoded request body.
    pub fn submit_body(
        &self,
        client_key: &str,
        body: &[u8],
    ) -> Result<StoredResult, ResultServiceError> {
        self.admit(client_key)?;
        let answers = parse_submission_body(body, &self.policy.limits)
            .map_err(|err| rejected(client_key, err))?;
        self.store_answers(&answers)
    }

    fn admit(&self, client_key: &str) -> Result<(), ResultServiceError> {
        match self.limiter.check(client_key) {
            RateDecision::Allowed { .. } => Ok(()),
            RateDecision::Limited { retry_after } => {
                warn!(client_key, ?retry_after, "result submission rate limited");
                Err(ResultServiceError::RateLimited { retry_after })
            }
        }
    }

    fn store_answers(&self, answers: &[Answer]) -> Result<StoredResult, ResultServiceError> {
        let profile = score(answers, &self.catalog, &self.policy.score_options)?;

        let id = Uuid::new_v4().to_string();
        let blob = serde_json::to_string(&profile).map_err(|err| ResultServiceError::Corrupt {
            id: id.clone(),
            reason: err.to_string(),
        })?;
        self.store.set(&result_key(&id), blob, self.policy.ttl)?;

        info!(
            result_id = %id,
            answered = profile.meta.total_answered,
            matched = profile.meta.total_matched,
            "stored new result"
        );

        Ok(StoredResult { id, profile })
    }

    /// Load a previously stored profile unchanged.
    pub fn fetch(&self, id: &str) -> Result<Profile, ResultServiceError> {
        let blob = self.store.get(&result_key(id))?.ok_or_else(|| {
            debug!(result_id = id, "result not found or expired");
            ResultServiceError::NotFound(id.to_string())
        })?;

        serde_json::from_str(&blob).map_err(|err| ResultServiceError::Corrupt {
            id: id.to_string(),
            reason: err.to_string(),
        })
    }

    pub fn result_view(&self, id: &str) -> Result<ResultView, ResultServiceError> {
        let profile = self.fetch(id)?;
        Ok(ResultView::build(id, &profile))
    }

    pub fn badge(&self, id: &str, options: &BadgeOptions) -> Result<String, ResultServiceError> {
        let profile = self.fetch(id)?;
        Ok(render_badge(&profile, options))
    }
}

fn rejected(client_key: &str, err: SubmissionError) -> SubmissionError {
    warn!(client_key, error = %err, "rejected malformed submission");
    err
}

/// Error raised by the result service.
#[derive(Debug, thiserror::Error)]
pub enum ResultServiceError {
    #[error("too many submissions, retry in {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("result '{0}' not found")]
    NotFound(String),
    #[error("stored result '{id}' is unreadable: {reason}")]
    Corrupt { id: String, reason: String },
}
