// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Safety pipeline — sanitize → validate → rate limit.
//
// The single entry point the request boundary consumes. Straight-line
// composition, no retries: an unsafe verdict from any stage is terminal
// for the call.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ratelimit::{RateLimit, SubmissionStore};
use crate::sanitize::Sanitizer;
use crate::validator::TopicValidator;
use crate::verdict::{Category, Verdict};

/// Caller-facing reason for a throttled submission.
const THROTTLED_REASON: &str =
    "Too many topic submissions. Please wait before submitting another topic.";

/// Outcome of a full safety check: the verdict plus the sanitized form of
/// the topic, which the boundary echoes back to the client.
#[derive(Debug, Clone)]
pub struct Checked {
    pub verdict: Verdict,
    pub sanitized_topic: String,
}

/// Composes the sanitizer, validator, and rate limiter. All three are
/// injected so tests (and future distributed deployments) can swap them.
pub struct SafetyPipeline {
    sanitizer: Arc<dyn Sanitizer>,
    validator: Arc<dyn TopicValidator>,
    store: Arc<dyn SubmissionStore>,
    limit: RateLimit,
}

impl SafetyPipeline {
    pub fn new(
        sanitizer: Arc<dyn Sanitizer>,
        validator: Arc<dyn TopicValidator>,
        store: Arc<dyn SubmissionStore>,
        limit: RateLimit,
    ) -> Self {
        Self {
            sanitizer,
            validator,
            store,
            limit,
        }
    }

    /// Sanitize and validate `raw_topic`; when the verdict is safe and an
    /// identity was supplied, also consume one rate-limit slot for it.
    pub fn check(&self, raw_topic: &str, identity: Option<&str>) -> Checked {
        self.check_at(raw_topic, identity, Utc::now())
    }

    /// `check` with an explicit clock, for tests.
    pub fn check_at(
        &self,
        raw_topic: &str,
        identity: Option<&str>,
        now: DateTime<Utc>,
    ) -> Checked {
        let sanitized_topic = self.sanitizer.sanitize(raw_topic);
        let verdict = self.validator.validate(&sanitized_topic);
        if !verdict.is_safe {
            return Checked {
                verdict,
                sanitized_topic,
            };
        }

        if let Some(identity) = identity {
            if !self.store.allow(identity, self.limit, now) {
                return Checked {
                    verdict: Verdict::rejected(Category::Spam, THROTTLED_REASON),
                    sanitized_topic,
                };
            }
        }

        Checked {
            verdict,
            sanitized_topic,
        }
    }
}
