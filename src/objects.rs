// Copyright (C) 2026 The Ledger Feed Project.
//
// objects.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Resolves an owner address or parent object id to a hydrated,
//! classified batch of object records.
//!
//! Any failure at any step collapses to one terminal error for the whole
//! batch; there is no partial-success rendering. A load is recoverable
//! only by invoking it again.

use std::sync::Arc;
use tracing::debug;

use crate::client::models::{ObjectDetails, OwnedObjectRecord};
use crate::client::{LedgerReadApi, MultiGetOptions, ObjectStatus};
use crate::error::{FeedError, FeedResult};

/// Coin objects wrap their currency type in this generic.
const COIN_TYPE_PREFIX: &str = "0x2::coin::Coin<";

/// Gateway used to absolutize ipfs-scheme display images.
const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Loads and classifies the objects owned by an address or held as
/// dynamic fields under a parent object. Independent of the feed
/// controller.
pub struct OwnedObjectsLoader {
    transport: Arc<dyn LedgerReadApi>,
}

impl OwnedObjectsLoader {
    /// Creates a loader over the given transport.
    pub fn new(transport: Arc<dyn LedgerReadApi>) -> Self {
        Self { transport }
    }

    /// Resolves `id` to hydrated records. `by_address` selects the
    /// owned-objects listing; otherwise `id` is treated as a parent
    /// object and its dynamic fields are listed.
    ///
    /// Ids whose existence check fails are silently dropped.
    pub async fn load(&self, id: &str, by_address: bool) -> FeedResult<Vec<OwnedObjectRecord>> {
        let listing = if by_address {
            self.transport.get_owned_objects(id).await?
        } else {
            self.transport.get_dynamic_fields(id).await?
        };

        // The wire shape is flattened here; only ids travel further.
        let ids = listing.into_ids();
        debug!(owner = id, count = ids.len(), by_address, "listed object ids");
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let lookups = self
            .transport
            .multi_get(&ids, MultiGetOptions::default())
            .await
            .map_err(|e| FeedError::hydration(e.to_string()))?;

        let mut records = Vec::with_capacity(lookups.len());
        for lookup in lookups {
            if lookup.status != ObjectStatus::Exists {
                continue;
            }
            let details = lookup
                .details
                .ok_or_else(|| FeedError::hydration("Exists row carried no details"))?;
            let details: ObjectDetails = serde_json::from_value(details)
                .map_err(|e| FeedError::hydration(format!("undecodable object row: {e}")))?;
            records.push(classify(details)?);
        }
        Ok(records)
    }
}

/// Derives coin classification, balance, display image and name from a
/// hydrated row.
fn classify(details: ObjectDetails) -> FeedResult<OwnedObjectRecord> {
    let is_coin = details.object_type.starts_with(COIN_TYPE_PREFIX);

    let balance = if is_coin {
        let fields = details
            .content
            .as_ref()
            .map(|content| &content.fields)
            .ok_or_else(|| {
                FeedError::hydration(format!("coin {} has no content fields", details.object_id))
            })?;
        Some(parse_balance(fields).ok_or_else(|| {
            FeedError::hydration(format!("coin {} has no readable balance", details.object_id))
        })?)
    } else {
        None
    };

    let display = details.display.unwrap_or_default();
    let display_image = display.image_url.as_deref().map(normalize_display_url);
    let name = display.name.unwrap_or_default();

    Ok(OwnedObjectRecord {
        id: details.object_id,
        object_type: details.object_type,
        is_coin,
        balance,
        display_image,
        name,
    })
}

/// Coin balances arrive as either a JSON number or a decimal string.
fn parse_balance(fields: &serde_json::Map<String, serde_json::Value>) -> Option<u128> {
    match fields.get("balance")? {
        serde_json::Value::Number(number) => number.as_u64().map(u128::from),
        serde_json::Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// Rewrites ipfs-scheme URLs through a public gateway; anything else is
/// passed through as already absolute.
fn normalize_display_url(raw: &str) -> String {
    match raw.strip_prefix("ipfs://") {
        Some(path) => format!("{IPFS_GATEWAY}{path}"),
        None => raw.to_string(),
    }
}
