// Copyright (C) 2026 The Ledger Feed Project.
//
// window.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Pure window calculation and page clamping over the sequence space.
//!
//! Pages are 1-based and counted from the newest end of the sequence:
//! page 1 covers the most recently appended indices. Both functions are
//! deterministic and safe to call with a stale total count.

use crate::error::{FeedError, FeedResult};

/// Half-open range `[start, end)` over ascending sequence indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First index covered, inclusive.
    pub start: u64,
    /// One past the last index covered.
    pub end: u64,
}

impl Window {
    /// Number of indices covered by the window.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// True when the window covers no indices.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Maps a clamped page request onto the sequence space.
///
/// Returns [`FeedError::OutOfRange`] when the page lies wholly beyond any
/// data that could exist. Callers clamp with [`clamp_page`] first, so the
/// failure path is a defensive invariant check.
pub fn compute_window(total_count: u64, page_size: u64, page_index: u64) -> FeedResult<Window> {
    let zero_based_page = page_index.saturating_sub(1);
    let skipped = zero_based_page
        .checked_mul(page_size)
        .ok_or(FeedError::OutOfRange {
            page_index,
            total_count,
        })?;
    let end = total_count
        .checked_sub(skipped)
        .ok_or(FeedError::OutOfRange {
            page_index,
            total_count,
        })?;
    let start = end.saturating_sub(page_size);
    Ok(Window { start, end })
}

/// Clamps a requested page index to `[1, max(1, ceil(total_count / page_size))]`.
///
/// `page_size` must be non-zero. Idempotent; invoked on every count
/// change and page request so that [`compute_window`] never observes an
/// unsatisfiable index.
pub fn clamp_page(requested_page: u64, total_count: u64, page_size: u64) -> u64 {
    let max_page = total_count.div_ceil(page_size).max(1);
    requested_page.clamp(1, max_page)
}
