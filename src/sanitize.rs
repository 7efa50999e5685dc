// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

// Topic sanitization — strips HTML/script injection vectors from
// free-text input before validation.
//
// Sanitization is a pure string transformation. It is total (always
// returns a string, including empty) and idempotent:
// `sanitize(sanitize(x)) == sanitize(x)` for all `x`.

use crate::rules::{CompiledPattern, RuleError};

// ---------------------------------------------------------------------------
// Trait: Sanitizer
// ---------------------------------------------------------------------------

/// Pure input sanitizer. Implementations must be Send + Sync so they can
/// be shared across request handlers.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> String;
}

// ---------------------------------------------------------------------------
// Implementation: TopicSanitizer
// ---------------------------------------------------------------------------

/// Maximum length of a sanitized topic, in characters.
pub const MAX_TOPIC_CHARS: usize = 500;

/// Sanitizer for user-submitted debate topics. Applies, in order:
///
/// 1. `<script>...</script>` block removal (non-greedy, case-insensitive);
///    an unclosed `<script` tag is malformed input and is stripped through
///    end of input
/// 2. `javascript:` URI scheme removal (case-insensitive)
/// 3. inline event-handler attribute removal (`on<word>=`, case-insensitive)
/// 4. whitespace trim
/// 5. truncation to the first 500 characters
///
/// The strip passes repeat until a fixed point so removal cannot splice a
/// new injection vector together out of the surrounding text.
pub struct TopicSanitizer {
    script_block: CompiledPattern,
    script_unclosed: CompiledPattern,
    js_scheme: CompiledPattern,
    event_handler: CompiledPattern,
}

impl TopicSanitizer {
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            script_block: CompiledPattern::compile(r"(?is)<script\b.*?</script>")?,
            script_unclosed: CompiledPattern::compile(r"(?is)<script\b.*$")?,
            js_scheme: CompiledPattern::compile(r"(?i)javascript:")?,
            event_handler: CompiledPattern::compile(r"(?i)on\w+\s*=")?,
        })
    }

    fn strip_once(&self, input: &str) -> String {
        let out = self.script_block.regex.replace_all(input, "");
        let out = self.script_unclosed.regex.replace_all(&out, "");
        let out = self.js_scheme.regex.replace_all(&out, "");
        self.event_handler.regex.replace_all(&out, "").into_owned()
    }
}

impl Sanitizer for TopicSanitizer {
    fn sanitize(&self, input: &str) -> String {
        let mut out = input.to_string();
        loop {
            let next = self.strip_once(&out);
            if next == out {
                break;
            }
            out = next;
        }

        let trimmed = out.trim();
        trimmed.chars().take(MAX_TOPIC_CHARS).collect()
    }
}
