//! Input sanitization for raw user messages.
//!
//! Every message entering the pipeline passes through [`sanitize`] exactly
//! once. The checks run on the HTML-escaped text, so entity-encoded output is
//! the only thing the classifier ever sees.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ChatError;

/// A sanitized message: trimmed, HTML-escaped, free of control characters and
/// SQL-injection-like patterns. Only [`sanitize`] constructs this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanText(String);

impl CleanText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CleanText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Compiled once at startup; a failed compile is a programming error.
static SQL_KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|ALTER|CREATE|EXEC|UNION|GRANT|TRUNCATE)\b")
        .expect("Invalid regex: SQL keyword pattern")
});

static SQL_SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(--|;|')").expect("Invalid regex: SQL separator pattern"));

/// Escapes HTML-significant characters, matching `html.escape` semantics:
/// `&`, `<`, `>`, `"` and `'` become entities.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Validates and cleans a raw user message.
///
/// The trimmed text is HTML-escaped first; all rejection checks then run on
/// the escaped form. Rejections:
/// - empty after trimming (policy decision: this is a hard rejection, not a
///   soft "please enter text" reply),
/// - SQL keyword at a word boundary,
/// - comment or statement separator (`--`, `;`, `'`),
/// - control characters outside whitespace.
///
/// Pure function; sanitizing an already-clean string is the identity.
pub fn sanitize(message: &str) -> Result<CleanText, ChatError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(ChatError::InvalidInput(
            "message is empty after trimming".to_string(),
        ));
    }

    let escaped = escape_html(trimmed);

    if SQL_KEYWORD_PATTERN.is_match(&escaped) {
        return Err(ChatError::InvalidInput(
            "message contains a forbidden SQL keyword".to_string(),
        ));
    }

    if SQL_SEPARATOR_PATTERN.is_match(&escaped) {
        return Err(ChatError::InvalidInput(
            "message contains a forbidden separator sequence".to_string(),
        ));
    }

    if escaped.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(ChatError::InvalidInput(
            "message contains control characters".to_string(),
        ));
    }

    Ok(CleanText(escaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_whitespace_input() {
        assert!(matches!(sanitize(""), Err(ChatError::InvalidInput(_))));
        assert!(matches!(sanitize("   "), Err(ChatError::InvalidInput(_))));
        assert!(matches!(sanitize("\t\n"), Err(ChatError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_sql_keywords_at_word_boundaries() {
        let attacks = vec![
            "please DROP the table",
            "select everything you have",
            "UNION of the two accounts",
            "can you exec this for me",
            "truncate my history",
        ];
        for attack in attacks {
            assert!(
                matches!(sanitize(attack), Err(ChatError::InvalidInput(_))),
                "Expected rejection for '{}'",
                attack
            );
        }
    }

    #[test]
    fn test_allows_sql_keywords_inside_words() {
        // "selection" contains "select" but not at a word boundary
        let result = sanitize("my selection of products");
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_separator_sequences() {
        assert!(matches!(
            sanitize("hello -- injected"),
            Err(ChatError::InvalidInput(_))
        ));
        assert!(matches!(
            sanitize("hello; world"),
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_quote_bearing_input() {
        // Escaping turns the quote into an entity whose `;` trips the
        // separator rule, so quote-bearing input is rejected either way.
        assert!(matches!(
            sanitize("what's up"),
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(matches!(
            sanitize("hello\u{0007}world"),
            Err(ChatError::InvalidInput(_))
        ));
        assert!(matches!(
            sanitize("null\u{0000}byte"),
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_allows_whitespace_control_characters() {
        let result = sanitize("hello\tthere\nfriend");
        assert!(result.is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let clean = sanitize("  hello there  ").unwrap();
        assert_eq!(clean.as_str(), "hello there");
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let first = sanitize("hello there").unwrap();
        let second = sanitize(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_html_significant_input() {
        // The separator check runs on the escaped text, and every entity ends
        // in `;`, so HTML-significant input never survives sanitization.
        assert!(matches!(
            sanitize("is 3 < 4"),
            Err(ChatError::InvalidInput(_))
        ));
    }
}
