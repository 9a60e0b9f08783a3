//! Keyword stage of intent detection.
//!
//! Plain substring containment against a fixed, ordered keyword table. This
//! runs before the regex pattern stage and deliberately trades precision for
//! speed: the first matching intent in enumeration order wins, ties are not
//! broken by length or specificity.

use super::intent::Intent;

/// Static keyword lists - zero allocation
const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
];

const THANKS_KEYWORDS: &[&str] = &["thanks", "thank you", "thx", "appreciate it"];

const GOODBYE_KEYWORDS: &[&str] = &["bye", "goodbye", "see you", "see ya"];

/// Ordered keyword table; enumeration order is the priority order.
const KEYWORD_TABLE: &[(Intent, &[&str])] = &[
    (Intent::Greeting, GREETING_KEYWORDS),
    (Intent::Thanks, THANKS_KEYWORDS),
    (Intent::Goodbye, GOODBYE_KEYWORDS),
];

/// Tests normalized text for substring containment against the keyword table,
/// returning the first matching intent.
pub fn match_keywords(normalized: &str) -> Option<Intent> {
    for (intent, keywords) in KEYWORD_TABLE {
        if keywords.iter().any(|kw| normalized.contains(kw)) {
            return Some(*intent);
        }
    }
    None
}
