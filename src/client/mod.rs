// Copyright (C) 2026 The Ledger Feed Project.
//
// mod.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Read-only ledger transport surface.
//!
//! The feed core depends only on [`LedgerReadApi`]; [`HttpLedgerClient`]
//! is the bundled JSON-RPC 2.0 implementation. All five operations are
//! idempotent reads, so callers may freely discard late results instead
//! of cancelling requests.

mod http;
pub mod models;

use async_trait::async_trait;

use crate::error::FeedResult;

pub use http::{HttpLedgerClient, HttpLedgerClientBuilder, DEFAULT_HTTP_TIMEOUT};
pub use models::{
    DynamicFieldInfo, DynamicFieldPage, MultiGetOptions, ObjectContent, ObjectDetails,
    ObjectDisplay, ObjectListing, ObjectLookup, ObjectStatus, OwnedObjectRecord, OwnedObjectsPage,
    TransactionRecord,
};

/// The read operations the feed and object loader consume.
#[async_trait]
pub trait LedgerReadApi: Send + Sync {
    /// Total number of transactions committed so far. Non-decreasing.
    async fn get_total_count(&self) -> FeedResult<u64>;

    /// Digests for the half-open sequence range `[start, end)`, in
    /// ascending sequence order.
    async fn get_digests_in_range(&self, start: u64, end: u64) -> FeedResult<Vec<String>>;

    /// Batched lookup of ids (transaction digests or object ids). The
    /// returned rows match the input order one-to-one.
    async fn multi_get(
        &self,
        ids: &[String],
        options: MultiGetOptions,
    ) -> FeedResult<Vec<ObjectLookup>>;

    /// Objects owned by an address (listing shape A).
    async fn get_owned_objects(&self, owner: &str) -> FeedResult<ObjectListing>;

    /// Dynamic fields under a parent object (listing shape B).
    async fn get_dynamic_fields(&self, parent: &str) -> FeedResult<ObjectListing>;
}
