// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request cancellation
//!
//! Every dispatched request gets an [`AbortHandle`] stored in the
//! [`CancellationRegistry`] under its tracking key. The matching
//! [`AbortSignal`] travels with the request into the transport.

mod handle;
mod registry;

pub use handle::{AbortHandle, AbortSignal, Ticket};
pub use registry::{CancellationRegistry, ReleaseGuard};
