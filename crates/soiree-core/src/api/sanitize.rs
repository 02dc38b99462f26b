//! Redaction of credentials and personal data before logging.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;

const PATTERNS: &[(&str, &str)] = &[
    (r"(?i)bearer\s+[A-Za-z0-9\-_.=]+", "Bearer [REDACTED]"),
    (
        r#"(?i)"(password|access|refresh|access_token|refresh_token)"\s*:\s*"[^"]*""#,
        r#""$1":"[REDACTED]""#,
    ),
    (r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*", "[JWT]"),
    (r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}", "[EMAIL]"),
    (r"\+?\d[\d\s-]{8,}\d", "[PHONE]"),
];

fn patterns() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
                Ok(regex) => Some((regex, *replacement)),
                Err(e) => {
                    warn!("Skipping invalid redaction pattern {pattern}: {e}");
                    None
                }
            })
            .collect()
    })
}

/// Returns `text` with tokens, e-mail addresses and phone numbers redacted.
pub fn sanitize(text: &str) -> String {
    patterns()
        .iter()
        .fold(text.to_string(), |acc, (regex, replacement)| {
            regex.replace_all(&acc, *replacement).into_owned()
        })
}
