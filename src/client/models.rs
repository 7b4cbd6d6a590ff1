// Copyright (C) 2026 The Ledger Feed Project.
//
// models.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Wire and domain records for the ledger read surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully-hydrated transaction, immutable once fetched. Identity is the
/// digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Transaction digest.
    pub digest: String,

    /// Sender address.
    pub sender: String,

    /// Transferred amount, when the transaction carries one.
    #[serde(default)]
    pub amount: Option<u128>,

    /// Gas consumed by execution.
    pub gas_used: u64,

    /// Commit timestamp in milliseconds since the epoch, when known.
    #[serde(default)]
    pub timestamp: Option<u64>,
}

/// Existence status of a multi-get row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectStatus {
    /// The id resolved to a live record.
    Exists,
    /// The id did not resolve; the row carries no details.
    NotFound,
}

/// One row of a batched multi-get response. `details` is polymorphic on
/// the wire (transaction or object payload) and is decoded at the call
/// site that knows which shape it asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectLookup {
    /// Existence status.
    pub status: ObjectStatus,

    /// Payload for `Exists` rows.
    #[serde(default)]
    pub details: Option<Value>,
}

/// Field-inclusion options for a batched multi-get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiGetOptions {
    /// Include the record's type.
    pub show_type: bool,
    /// Include the record's content fields.
    pub show_content: bool,
    /// Include display metadata (image URL, name).
    pub show_display: bool,
}

impl Default for MultiGetOptions {
    fn default() -> Self {
        Self {
            show_type: true,
            show_content: true,
            show_display: true,
        }
    }
}

/// Owned-objects listing, shape A: the transport returns a paginated
/// sequence of plain ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObjectsPage {
    /// Object ids owned by the queried address.
    pub data: Vec<String>,

    /// Cursor for the next page, if the transport paginates.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One dynamic-field entry, shape B: the transport wraps each id in an
/// object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    /// Id of the field's value object.
    pub object_id: String,
}

/// Dynamic-fields listing, shape B.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicFieldPage {
    /// Field entries under the queried parent.
    pub data: Vec<DynamicFieldInfo>,
}

/// The two possible listing shapes, discriminated structurally: shape A
/// carries plain id strings, shape B carries `{objectId}` objects. The
/// variant never leaves the loader boundary; callers flatten immediately
/// with [`ObjectListing::into_ids`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectListing {
    /// Shape A: owned-objects page of plain ids.
    Owned(OwnedObjectsPage),
    /// Shape B: dynamic-field entries.
    DynamicFields(DynamicFieldPage),
}

impl ObjectListing {
    /// Flattens either shape into the internal id sequence.
    pub fn into_ids(self) -> Vec<String> {
        match self {
            Self::Owned(page) => page.data,
            Self::DynamicFields(page) => {
                page.data.into_iter().map(|field| field.object_id).collect()
            }
        }
    }
}

/// Content fields of an object multi-get row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectContent {
    /// Raw content fields; coins carry a `balance` field here.
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
}

/// Display metadata of an object multi-get row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDisplay {
    /// Image URL as published by the object, possibly relative or ipfs.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Decoded `details` payload of an object multi-get row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetails {
    /// Object id.
    pub object_id: String,

    /// Fully-qualified type tag.
    #[serde(rename = "type")]
    pub object_type: String,

    /// Content fields, present when requested via options.
    #[serde(default)]
    pub content: Option<ObjectContent>,

    /// Display metadata, present when requested via options.
    #[serde(default)]
    pub display: Option<ObjectDisplay>,
}

/// A hydrated, classified owned object as surfaced by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObjectRecord {
    /// Object id.
    pub id: String,

    /// Fully-qualified type tag.
    #[serde(rename = "type")]
    pub object_type: String,

    /// True when the type is a coin wrapper.
    pub is_coin: bool,

    /// Coin balance; absent for non-coin objects.
    #[serde(default)]
    pub balance: Option<u128>,

    /// Normalized absolute display image URL.
    #[serde(default)]
    pub display_image: Option<String>,

    /// Human-readable name, empty string when the object has none.
    pub name: String,
}
