// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Abort handle and signal pair

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identity of one registered handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owned capability that aborts one in-flight request
#[derive(Debug)]
pub struct AbortHandle {
    ticket: Ticket,
    tx: watch::Sender<bool>,
}

/// Receiving side, attached to the outbound request
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortHandle {
    /// Create a linked handle/signal pair
    pub fn pair() -> (Self, AbortSignal) {
        let (tx, rx) = watch::channel(false);
        let ticket = Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        (Self { ticket, tx }, AbortSignal { rx })
    }

    /// Ticket identifying this handle
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Signal the request to abort. Idempotent.
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    /// Whether abort was already signalled
    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }
}

impl AbortSignal {
    /// Whether abort was signalled
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the handle aborts.
    ///
    /// If the handle is dropped without aborting (normal completion) this
    /// never resolves.
    pub async fn aborted(&mut self) {
        if self.rx.wait_for(|aborted| *aborted).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
