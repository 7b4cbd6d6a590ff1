// Copyright (C) 2026 The Ledger Feed Project.
//
// fetcher.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Fetches and hydrates one window of the feed, latest-first.

use std::sync::Arc;
use tracing::debug;

use crate::client::{LedgerReadApi, MultiGetOptions, ObjectStatus, TransactionRecord};
use crate::error::{FeedError, FeedResult};
use crate::window::compute_window;

/// Retrieves the digests of a page window and hydrates them into full
/// records with a single batched lookup. Each fetch is self-contained;
/// no records are cached across windows here.
pub struct FeedFetcher {
    transport: Arc<dyn LedgerReadApi>,
}

impl FeedFetcher {
    /// Creates a fetcher over the given transport.
    pub fn new(transport: Arc<dyn LedgerReadApi>) -> Self {
        Self { transport }
    }

    /// Fetches the window for `effective_page`, returning records ordered
    /// strictly latest-first.
    ///
    /// `effective_page` must already be clamped; an unclamped index one
    /// past the maximum fails the single request with
    /// [`FeedError::OutOfRange`].
    pub async fn fetch(
        &self,
        total_count: u64,
        page_size: u64,
        effective_page: u64,
    ) -> FeedResult<Vec<TransactionRecord>> {
        if total_count == 0 {
            return Err(FeedError::NoData);
        }

        let window = compute_window(total_count, page_size, effective_page)?;
        debug!(
            start = window.start,
            end = window.end,
            page = effective_page,
            "fetching feed window"
        );

        let mut digests = self
            .transport
            .get_digests_in_range(window.start, window.end)
            .await?;

        // Transport order is ascending; the feed presents newest first.
        digests.reverse();

        if digests.is_empty() {
            return Ok(Vec::new());
        }

        // One batched lookup for the whole window, never one per digest.
        let lookups = self
            .transport
            .multi_get(&digests, MultiGetOptions::default())
            .await
            .map_err(|e| FeedError::hydration(e.to_string()))?;

        if lookups.len() != digests.len() {
            return Err(FeedError::hydration(format!(
                "requested {} digests but received {} rows",
                digests.len(),
                lookups.len()
            )));
        }

        let mut records = Vec::with_capacity(lookups.len());
        for (digest, lookup) in digests.iter().zip(lookups) {
            if lookup.status != ObjectStatus::Exists {
                return Err(FeedError::hydration(format!(
                    "transaction {digest} not found during hydration"
                )));
            }
            let details = lookup.details.ok_or_else(|| {
                FeedError::hydration(format!("transaction {digest} returned no details"))
            })?;
            let record: TransactionRecord = serde_json::from_value(details).map_err(|e| {
                FeedError::hydration(format!("transaction {digest} is undecodable: {e}"))
            })?;
            records.push(record);
        }

        Ok(records)
    }
}
