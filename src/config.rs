// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Config loader and validator.
//
// Loads manthan.yaml, validates structure and values, and computes a
// deterministic contract hash of the raw bytes. Rule tables are NOT
// configuration — they are fixed policy in `rules` — so the file only
// carries runtime knobs: rate limiting, the upstream generation service,
// and the environment label.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// All errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config source: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// ConfigSource trait (interface-first, dependency injection)
// ---------------------------------------------------------------------------

/// Abstraction over where config YAML comes from.
///
/// `FileSource` reads from disk; `StringSource` provides content directly
/// (used in tests to avoid file I/O).
pub trait ConfigSource {
    fn load(&self) -> Result<String, ConfigError>;
}

/// Loads config from a file on disk.
pub struct FileSource {
    pub path: PathBuf,
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<String, ConfigError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Provides config content directly as a string. Used for testing.
pub struct StringSource {
    pub content: String,
}

impl ConfigSource for StringSource {
    fn load(&self) -> Result<String, ConfigError> {
        Ok(self.content.clone())
    }
}

// ---------------------------------------------------------------------------
// Typed config structs
// ---------------------------------------------------------------------------

/// Top-level parsed and validated manthan config.
#[derive(Debug)]
pub struct Config {
    /// Contract version. Always "v1".
    pub version: String,
    /// Rate-limiting knobs.
    pub safety: SafetyConfig,
    /// Upstream generation service.
    pub upstream: UpstreamConfig,
    /// Environment label (e.g. "dev", "production").
    pub environment: String,
    /// SHA256 hash of the raw YAML bytes: "sha256:{hex}".
    pub contract_hash: String,
}

/// Submission rate-limiting configuration.
#[derive(Debug, Clone, Copy)]
pub struct SafetyConfig {
    /// Maximum submissions per identity inside the window.
    pub max_submissions: usize,
    /// Sliding-window length in milliseconds.
    pub window_ms: u64,
    /// Interval between background sweeps in milliseconds.
    pub sweep_interval_ms: u64,
}

/// Upstream generation service configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the OpenAI-compatible chat completions API.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-turn token cap. Debate turns are deliberately short.
    pub max_tokens: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Raw YAML deserialization types (internal)
// ---------------------------------------------------------------------------
// Separate from the public structs so serde defaults and validation stay
// out of the public API.

mod raw {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct RawConfig {
        pub manthan: String,
        pub safety: Option<RawSafetyConfig>,
        pub upstream: RawUpstreamConfig,
        pub environment: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct RawSafetyConfig {
        pub max_submissions: Option<usize>,
        pub window_ms: Option<u64>,
        pub sweep_interval_ms: Option<u64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RawUpstreamConfig {
        pub base_url: String,
        pub model: String,
        pub temperature: Option<f64>,
        pub max_tokens: Option<u32>,
        pub timeout_ms: Option<u64>,
    }
}

const DEFAULT_MAX_SUBMISSIONS: usize = 5;
const DEFAULT_WINDOW_MS: u64 = 60_000;
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 300_000;
const DEFAULT_TEMPERATURE: f64 = 0.9;
const DEFAULT_MAX_TOKENS: u32 = 150;

// ---------------------------------------------------------------------------
// Config loading and validation
// ---------------------------------------------------------------------------

/// Load and validate a manthan config from the given source.
///
/// Steps:
/// 1. Read raw YAML bytes from source
/// 2. Compute SHA256 contract hash
/// 3. Parse YAML into raw deserialization types
/// 4. Validate required fields and values
/// 5. Build typed Config struct
pub fn load_config(source: &dyn ConfigSource) -> Result<Config, ConfigError> {
    let raw_yaml = source.load()?;
    let contract_hash = compute_hash(&raw_yaml);

    let raw: raw::RawConfig = serde_yaml::from_str(&raw_yaml)?;

    if raw.manthan != "v1" {
        return Err(ConfigError::Validation(format!(
            "unsupported contract version \"{}\", expected \"v1\"",
            raw.manthan
        )));
    }

    let safety = build_safety_config(raw.safety.unwrap_or_default())?;
    let upstream = build_upstream_config(raw.upstream)?;

    Ok(Config {
        version: raw.manthan,
        safety,
        upstream,
        environment: raw.environment.unwrap_or_default(),
        contract_hash,
    })
}

fn compute_hash(raw_yaml: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_yaml.as_bytes());
    let hash = hasher.finalize();
    format!("sha256:{:x}", hash)
}

fn build_safety_config(raw: raw::RawSafetyConfig) -> Result<SafetyConfig, ConfigError> {
    let max_submissions = raw.max_submissions.unwrap_or(DEFAULT_MAX_SUBMISSIONS);
    if max_submissions == 0 {
        return Err(ConfigError::Validation(
            "safety.max_submissions must be at least 1".to_string(),
        ));
    }

    let window_ms = raw.window_ms.unwrap_or(DEFAULT_WINDOW_MS);
    if window_ms == 0 {
        return Err(ConfigError::Validation(
            "safety.window_ms must be at least 1".to_string(),
        ));
    }

    let sweep_interval_ms = raw.sweep_interval_ms.unwrap_or(DEFAULT_SWEEP_INTERVAL_MS);
    if sweep_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "safety.sweep_interval_ms must be at least 1".to_string(),
        ));
    }

    Ok(SafetyConfig {
        max_submissions,
        window_ms,
        sweep_interval_ms,
    })
}

fn build_upstream_config(raw: raw::RawUpstreamConfig) -> Result<UpstreamConfig, ConfigError> {
    if raw.base_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "upstream.base_url must not be empty".to_string(),
        ));
    }
    if raw.model.trim().is_empty() {
        return Err(ConfigError::Validation(
            "upstream.model must not be empty".to_string(),
        ));
    }

    let temperature = raw.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ConfigError::Validation(format!(
            "upstream.temperature must be within [0.0, 2.0], got {temperature}"
        )));
    }

    let max_tokens = raw.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    if max_tokens == 0 {
        return Err(ConfigError::Validation(
            "upstream.max_tokens must be at least 1".to_string(),
        ));
    }

    Ok(UpstreamConfig {
        base_url: raw.base_url.trim_end_matches('/').to_string(),
        model: raw.model,
        temperature,
        max_tokens,
        timeout_ms: raw.timeout_ms,
    })
}
