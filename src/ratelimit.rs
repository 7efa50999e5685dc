// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Sliding-window rate limiting for topic submissions.
//
// Per-identity submission timestamps live in a concurrent map. Pruning
// happens lazily on each check and in bulk via `sweep`, which a
// caller-owned scheduler invokes — the store itself never spawns timers.
//
// Invariants:
// - every timestamp retained by a check or sweep is within the window at
//   the time of that access
// - after a sweep the map holds no identity with an empty history

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Quota applied to a single `allow` call.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Maximum submissions per identity inside the window.
    pub max_submissions: usize,
    /// Sliding window length.
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_submissions: 5,
            window: Duration::milliseconds(60_000),
        }
    }
}

// ---------------------------------------------------------------------------
// SubmissionStore trait
// ---------------------------------------------------------------------------

/// Tracks per-identity submission history.
///
/// Implementations must be thread-safe (Send + Sync); the pipeline holds
/// `Arc<dyn SubmissionStore>` and calls from multiple request handlers.
/// Swap in a distributed implementation for multi-instance deployments.
pub trait SubmissionStore: Send + Sync {
    /// Check whether `identity` may submit at `now`, recording the attempt
    /// as a submission only when allowed — the call itself counts toward
    /// the quota.
    fn allow(&self, identity: &str, limit: RateLimit, now: DateTime<Utc>) -> bool;

    /// Prune every identity's history against the store's window and drop
    /// identities left empty.
    fn sweep(&self, now: DateTime<Utc>);
}

// ---------------------------------------------------------------------------
// InMemorySubmissionStore
// ---------------------------------------------------------------------------

/// In-memory submission store backed by `DashMap`.
///
/// The entry lock held across read-prune-append makes the update for one
/// identity a single critical section, so a burst of near-simultaneous
/// submissions cannot undercount.
pub struct InMemorySubmissionStore {
    history: DashMap<String, Vec<DateTime<Utc>>>,
    /// Window used by `sweep`.
    window: Duration,
}

impl InMemorySubmissionStore {
    pub fn new(window: Duration) -> Self {
        Self {
            history: DashMap::new(),
            window,
        }
    }

    /// Number of tracked identities (for metrics/testing).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn allow(&self, identity: &str, limit: RateLimit, now: DateTime<Utc>) -> bool {
        let mut entry = self.history.entry(identity.to_string()).or_default();
        entry.retain(|t| now.signed_duration_since(*t) < limit.window);

        if entry.len() >= limit.max_submissions {
            // Denied: history stays pruned but the attempt is not recorded.
            return false;
        }

        entry.push(now);
        true
    }

    fn sweep(&self, now: DateTime<Utc>) {
        self.history.retain(|_, stamps| {
            stamps.retain(|t| now.signed_duration_since(*t) < self.window);
            !stamps.is_empty()
        });
    }
}
