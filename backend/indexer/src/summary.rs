//! Aggregate views over indexed events.
//!
//! Contract amounts are `i128` and travel as decimal strings; totals are
//! summed here with checked arithmetic and serialized back as strings.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, EventRecord};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ContributorSummary {
    pub address: String,
    pub contributed: String,
    pub contribution_count: usize,
    pub tokens_rewarded: String,
    pub badge_id: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CampaignSummary {
    pub total_contributed: String,
    pub total_tokens: String,
    pub badges_issued: usize,
    pub total_withdrawn: String,
    pub contributor_count: usize,
}

/// Summarize one contributor from the events whose actor is `address`.
pub fn contributor(address: &str, events: &[EventRecord]) -> Result<ContributorSummary> {
    let mut contributed = 0i128;
    let mut contribution_count = 0usize;
    let mut tokens = 0i128;
    let mut badge_id = None;

    for ev in events.iter().filter(|e| e.actor.as_deref() == Some(address)) {
        match EventKind::from_stored(&ev.event_type) {
            EventKind::ContributionReceived => {
                contributed = add(contributed, amount_of(ev)?)?;
                contribution_count += 1;
            }
            EventKind::TokenRewardSent => {
                tokens = add(tokens, amount_of(ev)?)?;
            }
            EventKind::NftRewardSent => {
                badge_id = badge_id.or(ev.badge_id);
            }
            _ => {}
        }
    }

    Ok(ContributorSummary {
        address: address.to_string(),
        contributed: contributed.to_string(),
        contribution_count,
        tokens_rewarded: tokens.to_string(),
        badge_id,
    })
}

/// Summarize the whole campaign from every indexed event.
pub fn campaign(events: &[EventRecord]) -> Result<CampaignSummary> {
    let mut contributed = 0i128;
    let mut tokens = 0i128;
    let mut withdrawn = 0i128;
    let mut badges = 0usize;
    let mut contributors = BTreeSet::new();

    for ev in events {
        match EventKind::from_stored(&ev.event_type) {
            EventKind::ContributionReceived => {
                contributed = add(contributed, amount_of(ev)?)?;
                if let Some(actor) = ev.actor.as_deref() {
                    contributors.insert(actor);
                }
            }
            EventKind::TokenRewardSent => {
                tokens = add(tokens, amount_of(ev)?)?;
            }
            EventKind::NftRewardSent => badges += 1,
            EventKind::FundsWithdrawn => {
                withdrawn = add(withdrawn, amount_of(ev)?)?;
            }
            _ => {}
        }
    }

    Ok(CampaignSummary {
        total_contributed: contributed.to_string(),
        total_tokens: tokens.to_string(),
        badges_issued: badges,
        total_withdrawn: withdrawn.to_string(),
        contributor_count: contributors.len(),
    })
}

fn amount_of(ev: &EventRecord) -> Result<i128> {
    let raw = ev.amount.as_deref().unwrap_or("0");
    raw.parse().map_err(|_| {
        IndexerError::Amount(format!("event {} has malformed amount {raw:?}", ev.id))
    })
}

fn add(a: i128, b: i128) -> Result<i128> {
    a.checked_add(b)
        .ok_or_else(|| IndexerError::Amount("amount total overflows i128".to_string()))
}
