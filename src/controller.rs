// Copyright (C) 2026 The Ledger Feed Project.
//
// controller.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! End-to-end "current page of recent transactions" view.
//!
//! Composes the window calculator, page clamp, fetcher and poll ticks
//! behind a single observable [`QueryState`]. Results are cached by
//! `(total_count, page_size, page_index)`; identical keys are
//! deduplicated into one in-flight request, and a previously committed
//! page stays visible as stale while a different key's fetch runs.
//! Commits follow last-request-wins: after a fetch resolves, the
//! controller re-derives its desired key and discards the result on
//! mismatch. Requests are idempotent reads, so discarding is sufficient
//! and no cancellation token exists.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::client::{LedgerReadApi, TransactionRecord};
use crate::config::{FeedConfig, PaginationStyle};
use crate::fetcher::FeedFetcher;
use crate::window::clamp_page;

/// User-visible message when the count query fails or the ledger is empty.
pub const NO_TRANSACTIONS_FOUND: &str = "no transactions found";

/// User-visible message when a page fetch fails. The count and pagination
/// chrome stay usable; only the page content is affected.
pub const ISSUE_GETTING_LATEST_TRANSACTIONS: &str = "issue getting latest transactions";

/// Cache key for one fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedKey {
    /// Total count the window was derived from.
    pub total_count: u64,
    /// Page size.
    pub page_size: u64,
    /// Effective (clamped) 1-based page index.
    pub page_index: u64,
}

/// One committed page of the feed, latest transaction first.
#[derive(Debug, Clone)]
pub struct FeedPage {
    /// Hydrated records, ordered latest-first.
    pub records: Vec<TransactionRecord>,
    /// Total count at the time the page was fetched.
    pub total_count: u64,
    /// 1-based page index.
    pub page_index: u64,
    /// Page size the window was computed with.
    pub page_size: u64,
}

impl FeedPage {
    /// Column headings for the rendering boundary.
    pub const COLUMNS: &'static [&'static str] =
        &["Time", "Transaction ID", "Sender", "Amount", "Gas"];

    /// Highest page index derivable from this page's count.
    pub fn max_page(&self) -> u64 {
        self.total_count.div_ceil(self.page_size).max(1)
    }
}

/// Observable state of an asynchronous query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    /// No request has been issued yet.
    Idle,
    /// A request is in flight and no prior data exists.
    Loading,
    /// Data is available. `stale` is true while a request for different
    /// parameters is in flight and this data is still shown.
    Success {
        /// The committed value.
        data: T,
        /// Whether a newer request is revalidating this value.
        stale: bool,
    },
    /// The query failed terminally until the next refresh.
    Error {
        /// User-visible message.
        message: String,
    },
}

impl<T> QueryState<T> {
    /// The committed value, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    /// True for a success currently being revalidated.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Success { stale: true, .. })
    }
}

struct ControllerInner {
    requested_page: u64,
    total_count: Option<u64>,
    /// Keys with a fetch currently pending. A key stays in the set from
    /// issue until its result is committed or discarded, so navigating
    /// away and back never issues a second fetch for the same key.
    in_flight: HashSet<FeedKey>,
    cache: HashMap<FeedKey, Arc<FeedPage>>,
    committed: Option<FeedKey>,
    error: Option<String>,
}

impl ControllerInner {
    /// The key the visible state should currently reflect, or `None`
    /// while the count is unknown or zero.
    fn desired_key(&self, page_size: u64) -> Option<FeedKey> {
        let total_count = self.total_count.filter(|count| *count > 0)?;
        Some(FeedKey {
            total_count,
            page_size,
            page_index: clamp_page(self.requested_page, total_count, page_size),
        })
    }
}

/// Composes count polling, clamping, fetching and caching into the
/// current-page view. Independent instances do not affect each other.
pub struct FeedController {
    transport: Arc<dyn LedgerReadApi>,
    fetcher: FeedFetcher,
    config: FeedConfig,
    inner: RwLock<ControllerInner>,
}

impl FeedController {
    /// Creates a controller over the given transport.
    pub fn new(transport: Arc<dyn LedgerReadApi>, mut config: FeedConfig) -> Self {
        // A zero page size cannot window anything; treat it as one.
        config.page_size = config.page_size.max(1);
        Self {
            fetcher: FeedFetcher::new(Arc::clone(&transport)),
            transport,
            config,
            inner: RwLock::new(ControllerInner {
                requested_page: 1,
                total_count: None,
                in_flight: HashSet::new(),
                cache: HashMap::new(),
                committed: None,
                error: None,
            }),
        }
    }

    /// Re-reads the total count and brings the visible page in line with
    /// it. Called once at startup and on every poll tick.
    pub async fn refresh(&self) {
        match self.transport.get_total_count().await {
            Ok(total_count) => {
                {
                    let mut inner = self.inner.write().await;
                    inner.total_count = Some(total_count);
                    if total_count == 0 {
                        // Never attempt a page fetch against an empty ledger.
                        inner.error = Some(NO_TRANSACTIONS_FOUND.to_string());
                        return;
                    }
                }
                self.sync_page().await;
            }
            Err(err) => {
                warn!(error = %err, "total count query failed");
                let mut inner = self.inner.write().await;
                inner.error = Some(NO_TRANSACTIONS_FOUND.to_string());
            }
        }
    }

    /// Requests a page. The index is clamped against the latest known
    /// count before any window is computed.
    pub async fn set_page(&self, page_index: u64) {
        {
            let mut inner = self.inner.write().await;
            let requested = page_index.max(1);
            inner.requested_page = match inner.total_count {
                Some(total_count) if total_count > 0 => {
                    clamp_page(requested, total_count, self.config.page_size)
                }
                _ => requested,
            };
        }
        self.sync_page().await;
    }

    /// Ensures the cache holds (or a fetch is producing) the page for the
    /// current desired key, committing only results that still match.
    async fn sync_page(&self) {
        let key = {
            let mut inner = self.inner.write().await;
            let Some(key) = inner.desired_key(self.config.page_size) else {
                return;
            };
            if inner.cache.contains_key(&key) {
                inner.committed = Some(key);
                inner.error = None;
                return;
            }
            if inner.in_flight.contains(&key) {
                // Identical request already pending; single writer per key.
                return;
            }
            inner.in_flight.insert(key);
            key
        };

        let result = self
            .fetcher
            .fetch(key.total_count, key.page_size, key.page_index)
            .await;

        let mut inner = self.inner.write().await;
        inner.in_flight.remove(&key);
        if inner.desired_key(self.config.page_size) != Some(key) {
            // Parameters moved on while this fetch was in flight; the
            // newer request owns the visible state now.
            debug!(
                page = key.page_index,
                total = key.total_count,
                "discarding fetch result for superseded parameters"
            );
            return;
        }
        match result {
            Ok(records) => {
                debug!(
                    page = key.page_index,
                    records = records.len(),
                    "committing feed page"
                );
                inner.cache.insert(
                    key,
                    Arc::new(FeedPage {
                        records,
                        total_count: key.total_count,
                        page_index: key.page_index,
                        page_size: key.page_size,
                    }),
                );
                inner.committed = Some(key);
                inner.error = None;
            }
            Err(err) => {
                warn!(error = %err, page = key.page_index, "feed page fetch failed");
                inner.error = Some(ISSUE_GETTING_LATEST_TRANSACTIONS.to_string());
            }
        }
    }

    /// Current observable state of the feed.
    pub async fn state(&self) -> QueryState<Arc<FeedPage>> {
        let inner = self.inner.read().await;
        if let Some(message) = &inner.error {
            return QueryState::Error {
                message: message.clone(),
            };
        }
        if let Some(committed) = inner.committed {
            if let Some(page) = inner.cache.get(&committed) {
                let stale = inner
                    .in_flight
                    .iter()
                    .any(|pending| *pending != committed);
                return QueryState::Success {
                    data: Arc::clone(page),
                    stale,
                };
            }
        }
        if inner.in_flight.is_empty() {
            QueryState::Idle
        } else {
            QueryState::Loading
        }
    }

    /// Latest known total count, if a count query has succeeded.
    pub async fn total_count(&self) -> Option<u64> {
        self.inner.read().await.total_count
    }

    /// Highest valid page index for the latest known count.
    pub async fn max_page(&self) -> u64 {
        let inner = self.inner.read().await;
        inner
            .total_count
            .map(|total_count| total_count.div_ceil(self.config.page_size).max(1))
            .unwrap_or(1)
    }

    /// Pagination style, untouched configuration for the rendering
    /// boundary.
    pub fn pagination_style(&self) -> PaginationStyle {
        self.config.pagination_style
    }

    /// Runs the controller: one initial refresh, then one per tick until
    /// the tick channel closes.
    pub async fn drive(self: Arc<Self>, mut ticks: mpsc::Receiver<()>) {
        info!(
            page_size = self.config.page_size,
            interval_ms = self.config.poll_interval_ms,
            "feed controller started"
        );
        self.refresh().await;
        while ticks.recv().await.is_some() {
            self.refresh().await;
        }
        debug!("tick channel closed; feed controller stopping");
    }
}
