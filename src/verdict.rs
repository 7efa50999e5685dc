// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Canonical safety-check result types.
//
// A Verdict is produced once per validation call and never mutated.
// Every downstream consumer (pipeline, HTTP handlers, logging) reads
// from it; nothing writes back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a topic was rejected. Serialized values are part of the wire
/// contract with the web client — do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "inappropriate")]
    Inappropriate,
    #[serde(rename = "off-topic")]
    OffTopic,
    /// Reserved for future moderation layers; no current rule produces it.
    #[serde(rename = "harmful")]
    Harmful,
    #[serde(rename = "spam")]
    Spam,
    #[serde(rename = "political_violence")]
    PoliticalViolence,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Inappropriate => "inappropriate",
            Category::OffTopic => "off-topic",
            Category::Harmful => "harmful",
            Category::Spam => "spam",
            Category::PoliticalViolence => "political_violence",
        };
        f.write_str(s)
    }
}

/// The structured result of a safety check.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_safe: bool,
    pub reason: Option<String>,
    pub category: Option<Category>,
}

impl Verdict {
    /// A passing verdict: no reason, no category.
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            reason: None,
            category: None,
        }
    }

    /// A failing verdict carrying the category and a caller-facing reason.
    pub fn rejected(category: Category, reason: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            reason: Some(reason.into()),
            category: Some(category),
        }
    }
}
