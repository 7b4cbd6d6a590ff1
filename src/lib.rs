// Copyright (C) 2026 The Ledger Feed Project.
//
// lib.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Ledger Feed Library
//!
//! This crate provides a continuously-advancing, paged view over the
//! recent transactions of an append-only ledger exposed through a
//! read-only JSON-RPC service, plus a loader that resolves an owner or
//! parent id to a batch of fully-hydrated object records.
//!
//! The core pieces:
//! - [`window`]: pure window calculation and page clamping over the
//!   growing sequence space
//! - [`FeedFetcher`]: batched digest retrieval and hydration, latest-first
//! - [`PollScheduler`]: timer-driven refresh with pause/resume
//! - [`FeedController`]: composition with stale-while-revalidate caching
//!   and last-request-wins commit discipline
//! - [`OwnedObjectsLoader`]: owner/parent id to classified object records
//!
//! The feed core depends only on the [`LedgerReadApi`] trait; a concrete
//! [`HttpLedgerClient`] speaking JSON-RPC 2.0 over HTTP is included.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ledger_feed::{FeedConfig, FeedController, HttpLedgerClient, PollScheduler};
//! use std::sync::Arc;
//! use url::Url;
//!
//! let client = HttpLedgerClient::builder(Url::parse("http://localhost:9000")?).build()?;
//! let config = FeedConfig::default();
//! let (scheduler, ticks) = PollScheduler::new(config.poll_interval());
//! let controller = Arc::new(FeedController::new(Arc::new(client), config));
//! tokio::spawn(controller.clone().drive(ticks));
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod objects;
pub mod poll;
pub mod window;

pub use client::{
    HttpLedgerClient, HttpLedgerClientBuilder, LedgerReadApi, MultiGetOptions, ObjectListing,
    ObjectLookup, ObjectStatus, OwnedObjectRecord, TransactionRecord,
};
pub use config::{FeedConfig, PaginationStyle};
pub use controller::{FeedController, FeedKey, FeedPage, QueryState};
pub use error::{FeedError, FeedResult};
pub use fetcher::FeedFetcher;
pub use objects::OwnedObjectsLoader;
pub use poll::{PollScheduler, PollState};
pub use window::{clamp_page, compute_window, Window};
