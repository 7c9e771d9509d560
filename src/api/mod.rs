// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Backend API wrappers
//!
//! Thin typed functions over [`Client`](crate::Client). Each one only names
//! the endpoint and the payload shapes; the request layer does the rest.

pub mod bill;
pub mod customer;
pub mod login;
pub mod sop;
mod types;

pub use types::*;
