//! Sensitive-data redaction for text shown to agents.
//!
//! Patterns run in a fixed order: connection strings, bearer tokens, email
//! addresses, then `key=value` credentials. Every replacement is the same
//! [`REDACTED`] marker, which none of the patterns can match in a way that
//! changes it, so `redact` is idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Replacement marker for masked values.
pub const REDACTED: &str = "[REDACTED]";

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

#[allow(clippy::expect_used)] // patterns are compile-time constants
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let rule = |pattern: &str, replacement: &'static str| Rule {
        pattern: Regex::new(pattern).expect("valid redaction pattern"),
        replacement,
    };
    vec![
        rule(
            r#"(?i)\b(postgres(?:ql)?|mysql|mariadb|mongodb(?:\+srv)?|rediss?|amqps?|mssql)://[^\s"'<>]+"#,
            "${1}://[REDACTED]",
        ),
        rule(r"(?i)\bbearer\s+[A-Za-z0-9\-._~+/]{20,}=*", "Bearer [REDACTED]"),
        rule(
            r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}",
            "[REDACTED]",
        ),
        rule(
            r#"(?i)\b(api[\s_-]?key|token|secret|password|passwd|pwd|auth)(\s*[:=]\s*)(["']?)[^\s"',;]{8,}"#,
            "${1}${2}${3}[REDACTED]",
        ),
    ]
});

/// Mask credential-like substrings in `text`.
#[must_use]
pub fn redact(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, rule| {
        rule.pattern
            .replace_all(&acc, rule.replacement)
            .into_owned()
    })
}
