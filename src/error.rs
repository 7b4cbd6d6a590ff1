// Copyright (C) 2026 The Ledger Feed Project.
//
// error.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error types for feed and loader operations.

use thiserror::Error;

/// Errors that can occur while computing windows, fetching pages or
/// hydrating object batches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Requested page lies wholly beyond the sequence space. Callers clamp
    /// the page index before computing a window, so this is a defensive
    /// invariant check; it fails the single request, never the process.
    #[error("page {page_index} is out of range for {total_count} transactions")]
    OutOfRange {
        /// Requested 1-based page index.
        page_index: u64,
        /// Total count the window was computed against.
        total_count: u64,
    },

    /// Total count is unknown or zero; no page can be produced.
    #[error("no transaction data available")]
    NoData,

    /// Network or RPC failure.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// Batched multi-get lookup failed or returned an undecodable row.
    #[error("hydration error: {message}")]
    Hydration {
        /// Error message.
        message: String,
    },
}

impl FeedError {
    /// Create a transport error.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a hydration error.
    pub fn hydration<S: Into<String>>(message: S) -> Self {
        Self::Hydration {
            message: message.into(),
        }
    }
}

/// Result type for feed operations.
pub type FeedResult<T> = std::result::Result<T, FeedError>;
