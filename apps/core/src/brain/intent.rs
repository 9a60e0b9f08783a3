//! Intent labels and the regex pattern stage.
//!
//! Fast word-boundary pattern matching over normalized text. No ML model
//! required - pure Rust regex matching. Evaluation order is load-bearing:
//! the first matching pattern group wins, it is not a best-match search.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Detected intent type. Closed set; labels coming back from the external
/// classifier are folded into this set, unseen ones become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Greeting (hello, hi, good morning, etc.)
    Greeting,
    /// Request for help or assistance
    HelpRequest,
    /// Question about invoices, billing or payments
    InvoiceQuery,
    /// Question about products, pricing or availability
    ProductQuery,
    /// Thanks/appreciation
    Thanks,
    /// Farewell (bye, see you, etc.)
    Goodbye,
    /// Unknown/Default
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the stable snake_case label for the intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::HelpRequest => "help_request",
            Intent::InvoiceQuery => "invoice_query",
            Intent::ProductQuery => "product_query",
            Intent::Thanks => "thanks",
            Intent::Goodbye => "goodbye",
            Intent::Unknown => "unknown",
        }
    }

    /// Parses an external classifier label. Labels outside the closed set
    /// fold to `Unknown` rather than being passed through.
    pub fn from_label(label: &str) -> Intent {
        match label {
            "greeting" => Intent::Greeting,
            "help_request" => Intent::HelpRequest,
            "invoice_query" => Intent::InvoiceQuery,
            "product_query" => Intent::ProductQuery,
            "thanks" => Intent::Thanks,
            "goodbye" => Intent::Goodbye,
            _ => Intent::Unknown,
        }
    }

    /// Social/terminal intents do not carry over as conversational context:
    /// a low-confidence follow-up to a greeting is not another greeting.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Intent::Greeting | Intent::Thanks | Intent::Goodbye)
    }
}

/// Pattern definition for intent matching
struct IntentPattern {
    intent: Intent,
    patterns: &'static LazyLock<Vec<Regex>>,
}

// Compile patterns once at startup; expect() is acceptable for static tables.
static GREETING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(hello|hi|hey|greetings)\b").expect("Invalid regex: greeting words"),
        Regex::new(r"\bgood (morning|afternoon|evening)\b")
            .expect("Invalid regex: greeting phrases"),
    ]
});

static HELP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(help|assist|assistance|support)\b").expect("Invalid regex: help words"),
        Regex::new(r"\b(i am stuck|how do i)\b").expect("Invalid regex: help phrases"),
    ]
});

static INVOICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"\b(invoice|invoices|bill|billing|payment|receipt|statement)\b")
        .expect("Invalid regex: invoice words")]
});

static PRODUCT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(product|products|item|items|price|pricing|catalog)\b")
            .expect("Invalid regex: product words"),
        // Inventory-question phrasings
        Regex::new(r"\b(in stock|available|do you have|have any|is there)\b")
            .expect("Invalid regex: inventory phrases"),
    ]
});

static THANKS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"\b(thanks|thank you|thx|appreciate)\b")
        .expect("Invalid regex: thanks words")]
});

static GOODBYE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"\b(bye|goodbye|farewell|see you|see ya)\b")
        .expect("Invalid regex: goodbye words")]
});

/// Ordered pattern table. First matching group wins; the enumeration order
/// below is the documented priority order.
static PATTERN_TABLE: LazyLock<Vec<IntentPattern>> = LazyLock::new(|| {
    vec![
        IntentPattern {
            intent: Intent::Greeting,
            patterns: &GREETING_PATTERNS,
        },
        IntentPattern {
            intent: Intent::HelpRequest,
            patterns: &HELP_PATTERNS,
        },
        IntentPattern {
            intent: Intent::InvoiceQuery,
            patterns: &INVOICE_PATTERNS,
        },
        IntentPattern {
            intent: Intent::ProductQuery,
            patterns: &PRODUCT_PATTERNS,
        },
        IntentPattern {
            intent: Intent::Thanks,
            patterns: &THANKS_PATTERNS,
        },
        IntentPattern {
            intent: Intent::Goodbye,
            patterns: &GOODBYE_PATTERNS,
        },
    ]
});

/// Tests the normalized text against the ordered pattern table, returning the
/// first matching intent.
pub fn match_patterns(normalized: &str) -> Option<Intent> {
    for group in PATTERN_TABLE.iter() {
        if group.patterns.iter().any(|p| p.is_match(normalized)) {
            return Some(group.intent);
        }
    }
    None
}
