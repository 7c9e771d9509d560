// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tracking-key to abort-handle registry

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::handle::{AbortHandle, Ticket};

/// Registry of in-flight requests, keyed by tracking key.
///
/// At most one handle is reachable per key: registering a key again replaces
/// the entry without aborting the superseded request.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    entries: Mutex<HashMap<String, AbortHandle>>,
}

impl CancellationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle` under `key`, replacing any previous entry
    pub fn register(&self, key: impl Into<String>, handle: AbortHandle) -> Ticket {
        let key = key.into();
        let ticket = handle.ticket();
        if let Some(previous) = self.entries.lock().insert(key.clone(), handle) {
            tracing::debug!(
                key = %key,
                superseded = %previous.ticket(),
                ticket = %ticket,
                "Tracking entry replaced"
            );
        }
        ticket
    }

    /// Drop the entry for a completed request without aborting it.
    ///
    /// Only removes the entry if it still belongs to `ticket`, so a request
    /// that was superseded cannot evict its successor.
    pub fn release(&self, key: &str, ticket: Ticket) -> bool {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(handle) if handle.ticket() == ticket => {
                entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Abort and remove each listed key. Unknown keys are ignored.
    ///
    /// Returns the number of requests aborted.
    pub fn cancel<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut entries = self.entries.lock();
        let mut aborted = 0;
        for key in keys {
            if let Some(handle) = entries.remove(key.as_ref()) {
                handle.abort();
                aborted += 1;
                tracing::debug!(key = key.as_ref(), "Request cancelled");
            }
        }
        aborted
    }

    /// Abort and remove every entry
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<(String, AbortHandle)> = self.entries.lock().drain().collect();
        for (_, handle) in &drained {
            handle.abort();
        }
        if !drained.is_empty() {
            tracing::debug!(count = drained.len(), "All requests cancelled");
        }
        drained.len()
    }

    /// Number of tracked requests
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Whether a key is tracked
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Tracked keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Releases one registry entry when dropped.
///
/// Owned by the request, so the entry goes away even when the caller drops
/// the request future before it settles.
#[derive(Debug)]
pub struct ReleaseGuard {
    registry: Arc<CancellationRegistry>,
    key: String,
    ticket: Ticket,
}

impl ReleaseGuard {
    pub fn new(registry: Arc<CancellationRegistry>, key: impl Into<String>, ticket: Ticket) -> Self {
        Self {
            registry,
            key: key.into(),
            ticket,
        }
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if self.registry.release(&self.key, self.ticket) {
            tracing::debug!(key = %self.key, ticket = %self.ticket, "Tracking entry released on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_overwrites_without_abort() {
        let registry = CancellationRegistry::new();
        let (first, first_signal) = AbortHandle::pair();
        let (second, _second_signal) = AbortHandle::pair();

        registry.register("/tel/customer/list", first);
        registry.register("/tel/customer/list", second);

        assert_eq!(registry.len(), 1);
        assert!(!first_signal.is_aborted());
    }

    #[test]
    fn test_release_ignores_stale_ticket() {
        let registry = CancellationRegistry::new();
        let (first, _) = AbortHandle::pair();
        let (second, second_signal) = AbortHandle::pair();

        let stale = registry.register("/a", first);
        let live = registry.register("/a", second);

        assert!(!registry.release("/a", stale));
        assert!(registry.contains("/a"));
        assert!(registry.release("/a", live));
        assert!(registry.is_empty());
        assert!(!second_signal.is_aborted());
    }

    #[test]
    fn test_cancel_many_and_missing() {
        let registry = CancellationRegistry::new();
        let (a, a_signal) = AbortHandle::pair();
        let (b, b_signal) = AbortHandle::pair();
        let (c, c_signal) = AbortHandle::pair();
        registry.register("/a", a);
        registry.register("/b", b);
        registry.register("/c", c);

        assert_eq!(registry.cancel(["/a", "/b", "/missing"]), 2);
        assert!(a_signal.is_aborted());
        assert!(b_signal.is_aborted());
        assert!(!c_signal.is_aborted());
        assert_eq!(registry.keys(), vec!["/c".to_string()]);
    }

    #[test]
    fn test_cancel_all_clears() {
        let registry = CancellationRegistry::new();
        let (a, a_signal) = AbortHandle::pair();
        let (b, b_signal) = AbortHandle::pair();
        registry.register("/a", a);
        registry.register("/b", b);

        assert_eq!(registry.cancel_all(), 2);
        assert!(registry.is_empty());
        assert!(a_signal.is_aborted() && b_signal.is_aborted());

        let (fresh, fresh_signal) = AbortHandle::pair();
        registry.register("/a", fresh);
        assert!(!fresh_signal.is_aborted());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_guard_releases_own_entry_only() {
        let registry = Arc::new(CancellationRegistry::new());
        let (first, _) = AbortHandle::pair();
        let stale = registry.register("/a", first);
        let guard = ReleaseGuard::new(registry.clone(), "/a", stale);

        let (second, _) = AbortHandle::pair();
        let live = registry.register("/a", second);
        drop(guard);
        assert!(registry.contains("/a"));

        drop(ReleaseGuard::new(registry.clone(), "/a", live));
        assert!(registry.is_empty());
    }
}
