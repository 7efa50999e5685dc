// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Static rule tables for debate-topic validation.
//
// The tables are fixed policy, not configuration: they ship with the
// binary and are compiled into a `RuleSet` once at startup. A pattern
// that fails to compile is a startup error, never a per-request one.
//
// Table order matters for keyword tables whose reason message names the
// matched entry — the first matching entry wins.

use std::fmt;

use regex::Regex;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("invalid rule pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

// ---------------------------------------------------------------------------
// Compiled regex wrapper
// ---------------------------------------------------------------------------

/// A pre-compiled regex with the original pattern string preserved for
/// debugging/display.
#[derive(Clone)]
pub struct CompiledPattern {
    pub pattern: String,
    pub regex: Regex,
}

impl CompiledPattern {
    /// Compile a regex pattern, returning `RuleError::InvalidPattern` on failure.
    pub fn compile(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Compile a literal term into a case-insensitive whole-word pattern.
    pub fn compile_word(term: &str) -> Result<Self, RuleError> {
        Self::compile(&format!(r"(?i)\b{}\b", regex::escape(term)))
    }

    /// Test whether the pattern matches the given text.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("pattern", &self.pattern)
            .finish()
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// A blocklist entry: the original term (used in reason messages) plus its
/// compiled whole-word pattern.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub term: &'static str,
    pub pattern: CompiledPattern,
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Keywords that make a topic inappropriate regardless of framing.
/// Matched as whole words, case-insensitive.
pub const INAPPROPRIATE_KEYWORDS: &[&str] = &[
    // Explicit content
    "porn",
    "sex",
    "nude",
    "explicit",
    "adult content",
    // Violence and threats
    "kill",
    "murder",
    "assassinate",
    "bomb",
    "terrorist",
    "attack",
    "violence",
    "blood",
    "death",
    "suicide",
    "harm",
    "hurt",
    // Hate speech indicators
    "hate",
    "racist",
    "discriminate",
    "genocide",
    "ethnic cleansing",
    // Illegal activities
    "drugs",
    "illegal",
    "crime",
    "fraud",
    "scam",
    "hack",
    // Personal attacks
    "personal",
    "private",
    "individual",
    "specific person",
    // Offensive language
    "curse",
    "swear",
    "profanity",
    "abuse",
];

/// Terms that place a topic outside Indian political debate.
/// Matched as substrings, case-insensitive — NOT whole words.
pub const OFF_TOPIC_TERMS: &[&str] = &[
    // Non-political topics
    "movie",
    "film",
    "entertainment",
    "sports",
    "game",
    "music",
    "food",
    "recipe",
    "cooking",
    "fashion",
    "beauty",
    "lifestyle",
    // International topics not related to India
    "america",
    "usa",
    "china",
    "russia",
    "europe",
    "africa",
    // Technical topics
    "programming",
    "coding",
    "software",
    "hardware",
    "technology",
    "python",
    "javascript",
    "java",
    "recruiter",
    "recruitment",
    "interview",
    "developer",
    "engineer",
    "programmer",
    "algorithm",
    // Personal topics
    "dating",
    "relationship",
    "marriage",
    "family",
    "personal life",
    // Prompt manipulation phrasing not caught by the injection regexes
    "ignore all previous",
    "ignore previous",
    "you are now",
    "act as",
    "pretend to be",
    "roleplay as",
    "you are an expert",
    "expert in",
    "ask me questions",
    "interview me",
    "test me",
    "quiz me",
];

/// Political violence and extremism indicators. Substring match.
pub const POLITICAL_VIOLENCE_TERMS: &[&str] = &[
    "revolution",
    "overthrow",
    "coup",
    "rebellion",
    "insurgency",
    "separatist",
    "secession",
    "independence movement",
    "armed struggle",
    "militant",
    "extremist",
    "radical",
    "violent protest",
    "riots",
];

/// A topic must contain at least one of these to count as Indian political
/// debate. Substring match.
pub const RELEVANCE_TERMS: &[&str] = &[
    "india", "indian", "bharat", "hindi", "urdu", "tamil", "telugu", "marathi",
    "gujarati", "bengali", "punjabi", "kannada", "malayalam", "odia", "assamese",
    "parliament", "election", "vote", "democracy", "constitution", "government",
    "ministry", "minister", "pm", "cm", "mp", "mla", "political party",
    "bjp", "congress", "aap", "dmk", "aiadmk", "trs", "tmc", "sp", "bsp",
    "reservation", "caste", "religion", "secular", "communal", "minority",
    "economy", "development", "poverty", "education", "health", "agriculture",
    "farmers", "labor", "employment", "corruption", "governance", "law",
    "judiciary", "police", "military", "defense", "foreign policy", "trade",
    "tax", "budget", "finance", "banking", "infrastructure", "transport",
    "environment", "climate", "energy", "technology", "digital", "internet",
];

/// Instruction-override attempts. Each pattern allows the optional filler
/// words the raw phrasing usually carries ("an", "all", plural forms).
const PROMPT_INJECTION_PATTERNS: &[&str] = &[
    r"(?i)ignore\s+(?:all\s+)?previous\s+(?:prompts?|instructions?)",
    r"(?i)you\s+are\s+now\s+(?:an?\s+)?(?:expert|professional|specialist)",
    r"(?i)act\s+as\s+(?:an?\s+)?(?:expert|professional|specialist)",
    r"(?i)pretend\s+to\s+be\s+(?:an?\s+)?(?:expert|professional|specialist)",
    r"(?i)roleplay\s+as\s+(?:an?\s+)?(?:expert|professional|specialist)",
    r"(?i)you\s+are\s+(?:an?\s+)?(?:expert|professional|specialist)\s+in",
    r"(?i)ask\s+me\s+(?:questions?|problems?|challenges?)",
    r"(?i)interview\s+me",
    r"(?i)test\s+me",
    r"(?i)quiz\s+me",
    r"(?i)give\s+me\s+(?:questions?|problems?|challenges?)",
];

/// 20+ consecutive uppercase letters.
const UPPERCASE_RUN_PATTERN: &str = r"[A-Z]{20,}";

/// 10+ consecutive symbol characters.
const SYMBOL_RUN_PATTERN: &str = r"[!@#$%^&*()]{10,}";

/// Whole-word commercial spam vocabulary.
const SPAM_WORDS_PATTERN: &str = r"(?i)\b(spam|advertisement|promote|buy|sell|offer)\b";

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// All rule tables compiled and ready for per-request evaluation.
///
/// Compiled once at startup and shared immutably (`Arc`) across request
/// handlers; evaluation never mutates it.
#[derive(Debug)]
pub struct RuleSet {
    pub inappropriate: Vec<KeywordRule>,
    pub prompt_injection: Vec<CompiledPattern>,
    pub uppercase_run: CompiledPattern,
    pub symbol_run: CompiledPattern,
    pub spam_words: CompiledPattern,
    pub off_topic: &'static [&'static str],
    pub political_violence: &'static [&'static str],
    pub relevance: &'static [&'static str],
}

impl RuleSet {
    /// Compile every table. Fails fast on the first bad pattern.
    pub fn compile() -> Result<Self, RuleError> {
        let inappropriate = INAPPROPRIATE_KEYWORDS
            .iter()
            .map(|term| {
                Ok(KeywordRule {
                    term,
                    pattern: CompiledPattern::compile_word(term)?,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        let prompt_injection = PROMPT_INJECTION_PATTERNS
            .iter()
            .map(|p| CompiledPattern::compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            inappropriate,
            prompt_injection,
            uppercase_run: CompiledPattern::compile(UPPERCASE_RUN_PATTERN)?,
            symbol_run: CompiledPattern::compile(SYMBOL_RUN_PATTERN)?,
            spam_words: CompiledPattern::compile(SPAM_WORDS_PATTERN)?,
            off_topic: OFF_TOPIC_TERMS,
            political_violence: POLITICAL_VIOLENCE_TERMS,
            relevance: RELEVANCE_TERMS,
        })
    }
}
