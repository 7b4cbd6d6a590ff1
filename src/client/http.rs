// Copyright (C) 2026 The Ledger Feed Project.
//
// http.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! JSON-RPC 2.0 implementation of [`LedgerReadApi`] over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::models::{MultiGetOptions, ObjectListing, ObjectLookup};
use super::LedgerReadApi;
use crate::error::{FeedError, FeedResult};

/// Default HTTP request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const METHOD_TOTAL_COUNT: &str = "ledger_getTotalTransactionCount";
const METHOD_DIGESTS_IN_RANGE: &str = "ledger_getTransactionDigestsInRange";
const METHOD_MULTI_GET: &str = "ledger_multiGetObjects";
const METHOD_OWNED_OBJECTS: &str = "ledger_getOwnedObjects";
const METHOD_DYNAMIC_FIELDS: &str = "ledger_getDynamicFields";

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
struct RpcRequest {
    id: u64,
    jsonrpc: &'static str,
    method: &'static str,
    params: Value,
}

impl RpcRequest {
    fn new(method: &'static str, params: Value) -> Self {
        Self {
            id: 1,
            jsonrpc: "2.0",
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcResponseError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
struct RpcResponseError {
    code: i64,
    message: String,
}

/// Builder for [`HttpLedgerClient`].
pub struct HttpLedgerClientBuilder {
    base_address: Url,
    timeout: Duration,
    http_client: Option<Client>,
}

impl HttpLedgerClientBuilder {
    /// Creates a builder targeting the given RPC endpoint.
    pub fn new(base_address: Url) -> Self {
        Self {
            base_address,
            timeout: DEFAULT_HTTP_TIMEOUT,
            http_client: None,
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supplies a preconfigured HTTP client instead of building one.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> FeedResult<HttpLedgerClient> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| FeedError::transport(format!("failed to build HTTP client: {e}")))?,
        };
        Ok(HttpLedgerClient {
            base_address: self.base_address,
            http_client,
        })
    }
}

/// HTTP JSON-RPC client for the ledger read surface.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    base_address: Url,
    http_client: Client,
}

impl HttpLedgerClient {
    /// Creates a configurable builder for the client.
    #[must_use]
    pub fn builder(base_address: Url) -> HttpLedgerClientBuilder {
        HttpLedgerClientBuilder::new(base_address)
    }

    /// Sends a request and decodes the `result` member into `T`.
    async fn rpc_send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> FeedResult<T> {
        let request = RpcRequest::new(method, params);
        debug!(method, "sending ledger RPC request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedError::transport(format!("{method} request failed: {e}")))?;

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| FeedError::transport(format!("{method} returned invalid JSON: {e}")))?;

        if let Some(error) = envelope.error {
            return Err(FeedError::transport(format!(
                "{method} failed with code {}: {}",
                error.code, error.message
            )));
        }

        let result = envelope
            .result
            .ok_or_else(|| FeedError::transport(format!("{method} returned no result")))?;

        serde_json::from_value(result)
            .map_err(|e| FeedError::transport(format!("{method} returned unexpected shape: {e}")))
    }
}

#[async_trait]
impl LedgerReadApi for HttpLedgerClient {
    async fn get_total_count(&self) -> FeedResult<u64> {
        self.rpc_send(METHOD_TOTAL_COUNT, json!([])).await
    }

    async fn get_digests_in_range(&self, start: u64, end: u64) -> FeedResult<Vec<String>> {
        self.rpc_send(METHOD_DIGESTS_IN_RANGE, json!([start, end]))
            .await
    }

    async fn multi_get(
        &self,
        ids: &[String],
        options: MultiGetOptions,
    ) -> FeedResult<Vec<ObjectLookup>> {
        self.rpc_send(METHOD_MULTI_GET, json!([ids, options])).await
    }

    async fn get_owned_objects(&self, owner: &str) -> FeedResult<ObjectListing> {
        self.rpc_send(METHOD_OWNED_OBJECTS, json!([owner])).await
    }

    async fn get_dynamic_fields(&self, parent: &str) -> FeedResult<ObjectListing> {
        self.rpc_send(METHOD_DYNAMIC_FIELDS, json!([parent])).await
    }
}
