// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! User-facing notices
//!
//! The request layer reports business and transport failures to the user
//! through a [`Notifier`]. Front ends plug in their own toast/message box.

use parking_lot::RwLock;

/// Sink for user-facing notices
pub trait Notifier: Send + Sync {
    /// Show an error notice
    fn error(&self, message: &str);
}

/// Default notifier: emits notices as tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(notice = %message, "User notice");
    }
}

/// Notifier that keeps every message, for tests and headless callers
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: RwLock<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices shown so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.read().clone()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn error(&self, message: &str) {
        self.messages.write().push(message.to_string());
    }
}
