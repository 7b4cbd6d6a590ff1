// Copyright (C) 2026 The Ledger Feed Project.
//
// config.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Caller-facing feed configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of transactions per page.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Default auto-refresh interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

/// How the rendering boundary is expected to page through the feed.
/// Pure configuration; the controller carries it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationStyle {
    /// A single "more" button appending the next page.
    ButtonedMore,
    /// Explicit numbered page links.
    NumberedPages,
    /// No pagination chrome at all.
    None,
}

/// Configuration for a [`FeedController`](crate::FeedController) instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Transactions per page. Must be greater than zero.
    pub page_size: u64,

    /// Auto-refresh interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Pagination style exposed to the rendering boundary.
    pub pagination_style: PaginationStyle,
}

impl FeedConfig {
    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            pagination_style: PaginationStyle::NumberedPages,
        }
    }
}
