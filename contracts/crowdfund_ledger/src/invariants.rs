#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::types::{CampaignInfo, CampaignStatus};
use crate::CrowdfundLedgerClient;

/// INV-1: `total_raised` equals the sum of every contributor's entry.
pub fn assert_total_matches_contributions(
    client: &CrowdfundLedgerClient,
    contributors: &[Address],
) {
    let sum: i128 = contributors
        .iter()
        .map(|c| client.get_contribution(c))
        .sum();
    let total = client.total_funds_raised();
    assert_eq!(
        total, sum,
        "INV-1 violated: total_raised {} != sum of contributions {}",
        total, sum
    );
}

/// INV-2: completion is exactly `total_raised >= funding_goal`.
pub fn assert_completion_consistent(client: &CrowdfundLedgerClient) {
    let total = client.total_funds_raised();
    let goal = client.funding_goal();
    assert_eq!(
        client.is_funding_complete(),
        total >= goal,
        "INV-2 violated: is_funding_complete disagrees with {} >= {}",
        total,
        goal
    );
    assert_eq!(client.status(), CampaignStatus::of(total, goal));
}

/// INV-3: `total_raised` never decreases between two observations.
pub fn assert_total_monotonic(before: i128, after: i128) {
    assert!(
        after >= before,
        "INV-3 violated: total_raised decreased from {} to {}",
        before,
        after
    );
}

/// INV-4: once set, a badge flag never reverts to false.
pub fn assert_badge_flag_monotonic(before: bool, after: bool) {
    assert!(
        !before || after,
        "INV-4 violated: badge flag went from true to false"
    );
}

/// INV-5: the badge counter advances by exactly the number of badges minted.
pub fn assert_badge_counter_step(before: u64, after: u64, minted: u64) {
    assert_eq!(
        after,
        before + minted,
        "INV-5 violated: next_badge_id moved from {} to {} for {} mint(s)",
        before,
        after,
        minted
    );
}

/// INV-6: immutable configuration survives every operation.
pub fn assert_config_unchanged(before: &CampaignInfo, current: &CampaignInfo) {
    assert_eq!(before.owner, current.owner, "INV-6 violated: owner changed");
    assert_eq!(before.asset, current.asset, "INV-6 violated: asset changed");
    assert_eq!(
        before.funding_goal, current.funding_goal,
        "INV-6 violated: funding_goal changed"
    );
    assert_eq!(
        before.reward_token, current.reward_token,
        "INV-6 violated: reward_token changed"
    );
    assert_eq!(before.badge, current.badge, "INV-6 violated: badge changed");
}

/// Run every stateless check against the live contract.
pub fn assert_all_ledger_invariants(client: &CrowdfundLedgerClient, contributors: &[Address]) {
    assert_total_matches_contributions(client, contributors);
    assert_completion_consistent(client);
}
