//! Short-lived per-user conversational context.
//!
//! Each user has at most one cached record, the last detected intent, stored
//! JSON-serialized under a namespaced key with a fixed TTL. The store never
//! fails the caller: a miss, an expired entry, a poisoned lock or a corrupt
//! payload all read as the empty context. Writes are last-writer-wins; a race
//! between two concurrent turns for the same user may lose an update, which
//! is acceptable because context only drives a soft one-intent lookback.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::brain::Intent;

/// Namespace prefix keeping context keys apart from unrelated cache entries.
const KEY_PREFIX: &str = "bizchat:ctx";

/// Fixed expiration for context entries.
const CONTEXT_TTL: Duration = Duration::from_secs(3600);

/// Upper bound on tracked users; least-recently-used entries are evicted.
const CACHE_CAPACITY: usize = 1024;

/// Per-user conversational state: the last detected intent, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_intent: Option<Intent>,
}

impl ConversationContext {
    pub fn with_intent(intent: Intent) -> Self {
        Self {
            last_intent: Some(intent),
        }
    }
}

struct CacheEntry {
    payload: String,
    expires_at: Instant,
}

/// In-process context cache honoring the key/value/TTL contract.
pub struct ContextStore {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStore {
    pub fn new() -> Self {
        Self::with_ttl(CONTEXT_TTL)
    }

    /// Store with a custom TTL, used by tests to exercise expiry quickly.
    pub fn with_ttl(ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).expect("cache capacity must be non-zero");
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    fn cache_key(user_id: &str) -> String {
        format!("{}:{}", KEY_PREFIX, user_id)
    }

    /// Reads the context for a user. Never fails: any problem yields the
    /// empty context.
    pub fn get(&self, user_id: &str) -> ConversationContext {
        let key = Self::cache_key(user_id);
        let Ok(mut entries) = self.entries.lock() else {
            warn!(user = user_id, "context cache lock poisoned, treating as empty");
            return ConversationContext::default();
        };

        let expired = match entries.get(&key) {
            Some(entry) if entry.expires_at <= Instant::now() => true,
            Some(entry) => {
                return match serde_json::from_str(&entry.payload) {
                    Ok(context) => context,
                    Err(e) => {
                        warn!(user = user_id, "corrupt context entry, treating as empty: {}", e);
                        ConversationContext::default()
                    }
                };
            }
            None => return ConversationContext::default(),
        };

        if expired {
            entries.pop(&key);
        }
        ConversationContext::default()
    }

    /// Serializes and stores the context with the configured TTL, overwriting
    /// any prior value.
    pub fn set(&self, user_id: &str, context: &ConversationContext) {
        let payload = match serde_json::to_string(context) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(user = user_id, "failed to serialize context, dropping write: {}", e);
                return;
            }
        };

        let Ok(mut entries) = self.entries.lock() else {
            warn!(user = user_id, "context cache lock poisoned, dropping write");
            return;
        };
        entries.put(
            Self::cache_key(user_id),
            CacheEntry {
                payload,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Test seam: inserts a raw payload for a user, bypassing serialization.
    #[cfg(test)]
    pub(crate) fn insert_raw(&self, user_id: &str, payload: &str) {
        let mut entries = self.entries.lock().expect("context cache lock");
        entries.put(
            Self::cache_key(user_id),
            CacheEntry {
                payload: payload.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_miss_reads_as_empty() {
        let store = ContextStore::new();
        assert_eq!(store.get("nobody"), ConversationContext::default());
    }

    #[test]
    fn test_round_trip_within_ttl() {
        let store = ContextStore::new();
        store.set("alice", &ConversationContext::with_intent(Intent::Thanks));
        assert_eq!(
            store.get("alice"),
            ConversationContext::with_intent(Intent::Thanks)
        );
    }

    #[test]
    fn test_expired_entry_reads_as_empty() {
        let store = ContextStore::with_ttl(Duration::from_millis(30));
        store.set("bob", &ConversationContext::with_intent(Intent::Greeting));

        thread::sleep(Duration::from_millis(50));

        assert_eq!(store.get("bob"), ConversationContext::default());
    }

    #[test]
    fn test_overwrite_is_last_writer_wins() {
        let store = ContextStore::new();
        store.set("carol", &ConversationContext::with_intent(Intent::Greeting));
        store.set("carol", &ConversationContext::with_intent(Intent::Goodbye));
        assert_eq!(
            store.get("carol"),
            ConversationContext::with_intent(Intent::Goodbye)
        );
    }

    #[test]
    fn test_corrupt_payload_reads_as_empty() {
        let store = ContextStore::new();
        store.insert_raw("mallory", "{not json at all");
        assert_eq!(store.get("mallory"), ConversationContext::default());
    }

    #[test]
    fn test_unseen_intent_label_reads_as_empty() {
        // A label outside the closed set fails deserialization and is treated
        // like any other corrupt entry.
        let store = ContextStore::new();
        store.insert_raw("trent", r#"{"last_intent":"order_status"}"#);
        assert_eq!(store.get("trent"), ConversationContext::default());
    }

    #[test]
    fn test_serialized_wire_format() {
        let context = ConversationContext::with_intent(Intent::Thanks);
        assert_eq!(
            serde_json::to_string(&context).unwrap(),
            r#"{"last_intent":"thanks"}"#
        );
        assert_eq!(
            serde_json::to_string(&ConversationContext::default()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_users_are_isolated() {
        let store = ContextStore::new();
        store.set("dave", &ConversationContext::with_intent(Intent::Thanks));
        assert_eq!(store.get("erin"), ConversationContext::default());
    }
}
