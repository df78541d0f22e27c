//! Soroban RPC client: polls `getEvents` and decodes crowdfund events.
//!
//! Events are requested with `xdrFormat: "json"`, so topics and data arrive
//! as JSON-encoded `ScVal`s (`{"symbol":"contrib"}`, `{"i128":"5000"}`,
//! `{"map":[{"key":…,"val":…}]}`) in `topicJson` / `valueJson`.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{CrowdfundEvent, EventKind};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Topic list as JSON `ScVal`s
    #[serde(rename = "topicJson", default)]
    pub topic: Vec<Value>,
    /// Event data as a JSON `ScVal`
    #[serde(rename = "valueJson", default)]
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events emitted by any of `contract_ids`.
///
/// * `start_ledger` - the ledger sequence to scan from (inclusive).
/// * `cursor`       - optional opaque pagination cursor from a previous response.
/// * `limit`        - maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Code -32600 / -32601 are hard failures; everything else we retry
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::Rpc {
                            code: err.code,
                            message: err.message,
                        });
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`CrowdfundEvent`] structs.
///
/// Events from calls that were later rolled back carry no state change and
/// are skipped.
pub fn decode_events(raw: &[RawEvent]) -> Vec<CrowdfundEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(decode_single)
        .collect()
}

fn decode_single(raw: &RawEvent) -> Option<CrowdfundEvent> {
    let Some(first_topic) = raw.topic.first() else {
        warn!(
            "Event in tx {:?} has no topicJson; the RPC node may not support xdrFormat=json",
            raw.tx_hash
        );
        return None;
    };
    let kind = EventKind::from_topic(&scval_to_string(first_topic).unwrap_or_default());

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let (data_actor, amount, badge_id) = decode_data(&raw.value, &kind);
    // Every crowdfund event carries its subject address as the second topic.
    let actor = raw.topic.get(1).and_then(scval_to_string).or(data_actor);

    Some(CrowdfundEvent {
        event_type: kind.as_str().to_string(),
        actor,
        amount,
        badge_id,
        ledger,
        timestamp,
        contract_id: raw.contract_id.clone().unwrap_or_default(),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull the fields of a `#[contracttype]` event struct out of its `ScVal` map.
///
/// Returns `(actor, amount, badge_id)`.
fn decode_data(value: &Value, kind: &EventKind) -> (Option<String>, Option<String>, Option<i64>) {
    match kind {
        EventKind::ContributionReceived => (
            map_field(value, "contributor"),
            map_field(value, "amount"),
            None,
        ),
        EventKind::TokenRewardSent => (
            map_field(value, "contributor"),
            map_field(value, "tokens"),
            None,
        ),
        EventKind::NftRewardSent => (
            map_field(value, "contributor"),
            None,
            map_field(value, "badge_id").and_then(|id| id.parse().ok()),
        ),
        EventKind::FundsWithdrawn => (map_field(value, "owner"), map_field(value, "amount"), None),
        EventKind::Unknown => (None, None, None),
    }
}

/// Value stored under the symbol `key` in a `{"map":[{"key":…,"val":…}]}` ScVal.
fn map_field(value: &Value, key: &str) -> Option<String> {
    value
        .get("map")?
        .as_array()?
        .iter()
        .find(|entry| entry.get("key").and_then(scval_to_string).as_deref() == Some(key))
        .and_then(|entry| entry.get("val"))
        .and_then(scval_to_string)
}

/// Render a scalar `ScVal` (`{"symbol":"contrib"}`, `{"address":"G…"}`,
/// `{"u64":"3"}`, `{"i128":"5000"}` or `{"i128":{"hi":0,"lo":5000}}`) as a string.
fn scval_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) if map.len() == 1 => {
            let (tag, inner) = map.iter().next()?;
            match (tag.as_str(), inner) {
                ("i128", Value::Object(parts)) => int128_parts(parts).map(|n| n.to_string()),
                ("map" | "vec", _) => None,
                (_, inner) => scval_to_string(inner),
            }
        }
        _ => None,
    }
}

fn int128_parts(parts: &Map<String, Value>) -> Option<i128> {
    let hi = json_int(parts.get("hi")?)?;
    let lo = json_int(parts.get("lo")?)?;
    Some((hi << 64) | lo)
}

fn json_int(v: &Value) -> Option<i128> {
    v.as_i64()
        .map(i128::from)
        .or_else(|| v.as_u64().map(i128::from))
        .or_else(|| v.as_str()?.parse().ok())
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    use chrono::DateTime;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
