extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use contributor_badge::{ContributorBadge, ContributorBadgeClient};
use reward_token::{RewardToken, RewardTokenClient};

use crate::invariants::{
    assert_all_ledger_invariants, assert_badge_counter_step, assert_badge_flag_monotonic,
    assert_config_unchanged, assert_total_monotonic,
};
use crate::{CampaignStatus, CrowdfundLedger, CrowdfundLedgerClient, Error};

/// One whole unit of the asset (Stellar assets carry 7 decimals).
const UNIT: i128 = 10_000_000;
const DECIMALS: u32 = 7;
const GOAL: i128 = 50 * UNIT;
const REWARD_RATE: u32 = 100;
const NFT_THRESHOLD: i128 = 5 * UNIT;

pub(crate) struct Campaign {
    pub env: Env,
    pub ledger: CrowdfundLedgerClient<'static>,
    pub rewards: RewardTokenClient<'static>,
    pub badge: ContributorBadgeClient<'static>,
    pub asset: token::Client<'static>,
    pub owner: Address,
}

impl Campaign {
    /// Mint `amount` of the asset to a fresh contributor.
    pub fn contributor(&self, amount: i128) -> Address {
        let who = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.asset.address).mint(&who, &amount);
        who
    }
}

pub(crate) fn setup() -> Campaign {
    setup_with(GOAL, REWARD_RATE, DECIMALS, NFT_THRESHOLD)
}

pub(crate) fn setup_unbound() -> Campaign {
    deploy(GOAL, REWARD_RATE, DECIMALS, NFT_THRESHOLD)
}

fn setup_with(goal: i128, reward_rate: u32, decimals: u32, threshold: i128) -> Campaign {
    let campaign = deploy(goal, reward_rate, decimals, threshold);
    campaign.rewards.set_ledger(&campaign.ledger.address);
    campaign.badge.set_ledger(&campaign.ledger.address);
    campaign
}

fn deploy(goal: i128, reward_rate: u32, decimals: u32, threshold: i128) -> Campaign {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let admin = Address::generate(&env);

    let asset_id = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let reward_id = env.register(RewardToken, (admin.clone(), reward_rate, decimals));
    let badge_id = env.register(ContributorBadge, (admin, threshold));
    let ledger_id = env.register(
        CrowdfundLedger,
        (
            owner.clone(),
            asset_id.clone(),
            goal,
            reward_id.clone(),
            badge_id.clone(),
        ),
    );

    Campaign {
        ledger: CrowdfundLedgerClient::new(&env, &ledger_id),
        rewards: RewardTokenClient::new(&env, &reward_id),
        badge: ContributorBadgeClient::new(&env, &badge_id),
        asset: token::Client::new(&env, &asset_id),
        owner,
        env,
    }
}

// ─────────────────────────────────────────────────────────
// Deployment
// ─────────────────────────────────────────────────────────

#[test]
fn test_initial_state() {
    let c = setup();

    assert_eq!(c.ledger.owner(), c.owner);
    assert_eq!(c.ledger.funding_goal(), GOAL);
    assert_eq!(c.rewards.reward_rate(), REWARD_RATE);
    assert_eq!(c.badge.threshold(), NFT_THRESHOLD);
    assert_eq!(c.ledger.total_funds_raised(), 0);
    assert!(!c.ledger.is_funding_complete());
    assert_eq!(c.ledger.status(), CampaignStatus::Open);
    assert_eq!(c.ledger.held_balance(), 0);
    assert_eq!(c.rewards.ledger(), Some(c.ledger.address.clone()));
    assert_eq!(c.badge.ledger(), Some(c.ledger.address.clone()));
}

#[test]
fn test_get_campaign_reconstructs_config() {
    let c = setup();
    let info = c.ledger.get_campaign();

    assert_eq!(info.owner, c.owner);
    assert_eq!(info.asset, c.asset.address);
    assert_eq!(info.funding_goal, GOAL);
    assert_eq!(info.reward_token, c.rewards.address);
    assert_eq!(info.badge, c.badge.address);
    assert_eq!(info.total_raised, 0);
    assert_eq!(info.status, CampaignStatus::Open);
}

#[test]
#[should_panic]
fn test_constructor_rejects_non_positive_goal() {
    deploy(0, REWARD_RATE, DECIMALS, NFT_THRESHOLD);
}

// ─────────────────────────────────────────────────────────
// Contributions
// ─────────────────────────────────────────────────────────

#[test]
fn test_contribute_moves_value_and_records_it() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);
    let bob = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &UNIT);

    assert_eq!(c.asset.balance(&alice), 9 * UNIT);
    assert_eq!(c.ledger.held_balance(), UNIT);
    assert_eq!(c.ledger.total_funds_raised(), UNIT);
    assert_eq!(c.ledger.get_contribution(&alice), UNIT);
    assert_eq!(c.ledger.get_contribution(&bob), 0);
}

#[test]
fn test_individual_contributions_are_tracked() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);
    let bob = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &(5 * UNIT));
    c.ledger.contribute(&bob, &(7 * UNIT));

    assert_eq!(c.ledger.get_contribution(&alice), 5 * UNIT);
    assert_eq!(c.ledger.get_contribution(&bob), 7 * UNIT);
    assert_all_ledger_invariants(&c.ledger, &[alice, bob]);
}

#[test]
fn test_repeat_contributor_accumulates() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &(3 * UNIT));
    c.ledger.contribute(&alice, &(4 * UNIT));

    assert_eq!(c.ledger.get_contribution(&alice), 7 * UNIT);
    assert_eq!(c.ledger.total_funds_raised(), 7 * UNIT);
}

#[test]
fn test_zero_contribution_is_rejected_without_effect() {
    let c = setup();
    let alice = c.contributor(UNIT);

    assert_eq!(
        c.ledger.try_contribute(&alice, &0),
        Err(Ok(Error::InvalidContribution))
    );
    assert_eq!(
        c.ledger.try_contribute(&alice, &-UNIT),
        Err(Ok(Error::InvalidContribution))
    );

    assert_eq!(c.ledger.total_funds_raised(), 0);
    assert_eq!(c.ledger.get_contribution(&alice), 0);
    assert_eq!(c.asset.balance(&alice), UNIT);
    assert_eq!(c.rewards.balance(&alice), 0);
}

#[test]
fn test_single_contribution_meeting_goal_completes_funding() {
    let c = setup();
    let alice = c.contributor(GOAL);

    c.ledger.contribute(&alice, &GOAL);

    assert!(c.ledger.is_funding_complete());
    assert_eq!(c.ledger.total_funds_raised(), GOAL);
    assert_eq!(c.ledger.status(), CampaignStatus::GoalReached);
}

#[test]
fn test_funding_progress_is_tracked() {
    let c = setup();
    let alice = c.contributor(GOAL);
    let half = GOAL / 2;

    c.ledger.contribute(&alice, &half);
    assert_eq!(c.ledger.total_funds_raised(), half);
    assert!(!c.ledger.is_funding_complete());

    c.ledger.contribute(&alice, &half);
    assert_eq!(c.ledger.total_funds_raised(), GOAL);
    assert!(c.ledger.is_funding_complete());
}

#[test]
fn test_contribution_after_goal_is_rejected() {
    let c = setup();
    let alice = c.contributor(GOAL);
    let bob = c.contributor(UNIT);

    c.ledger.contribute(&alice, &GOAL);

    assert_eq!(
        c.ledger.try_contribute(&bob, &1),
        Err(Ok(Error::GoalAlreadyReached))
    );
    assert_eq!(c.ledger.total_funds_raised(), c.ledger.funding_goal());
    assert_eq!(c.ledger.get_contribution(&bob), 0);
    assert_eq!(c.asset.balance(&bob), UNIT);
}

#[test]
fn test_overshooting_contribution_is_accepted_in_full() {
    let c = setup();
    let alice = c.contributor(40 * UNIT);
    let bob = c.contributor(30 * UNIT);

    c.ledger.contribute(&alice, &(40 * UNIT));
    c.ledger.contribute(&bob, &(30 * UNIT));

    assert_eq!(c.ledger.total_funds_raised(), 70 * UNIT);
    assert_eq!(c.ledger.held_balance(), 70 * UNIT);
    assert_eq!(c.rewards.balance(&bob), 30 * 100);
    assert!(c.ledger.is_funding_complete());
}

// ─────────────────────────────────────────────────────────
// Rewards
// ─────────────────────────────────────────────────────────

#[test]
fn test_token_reward_is_proportional() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &(2 * UNIT));

    let expected = 2 * UNIT * i128::from(REWARD_RATE) / UNIT;
    assert_eq!(expected, 200);
    assert_eq!(c.rewards.balance(&alice), expected);
    assert_eq!(c.rewards.total_supply(), expected);
}

#[test]
fn test_no_badge_below_threshold() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &UNIT);

    assert!(!c.ledger.has_received_badge(&alice));
    assert_eq!(c.badge.balance(&alice), 0);
}

#[test]
fn test_badge_on_single_threshold_contribution() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &NFT_THRESHOLD);

    assert!(c.ledger.has_received_badge(&alice));
    assert_eq!(c.badge.balance(&alice), 1);
    assert_eq!(c.badge.badge_of(&alice), Some(0));
}

#[test]
fn test_badge_follows_cumulative_total_and_is_issued_once() {
    let c = setup();
    let alice = c.contributor(20 * UNIT);

    c.ledger.contribute(&alice, &(2 * UNIT));
    assert!(!c.ledger.has_received_badge(&alice));
    assert_eq!(c.badge.next_badge_id(), 0);

    c.ledger.contribute(&alice, &(3 * UNIT));
    assert!(c.ledger.has_received_badge(&alice));
    assert_eq!(c.badge.badge_of(&alice), Some(0));
    assert_eq!(c.badge.next_badge_id(), 1);

    c.ledger.contribute(&alice, &(5 * UNIT));
    assert_eq!(c.ledger.get_contribution(&alice), 10 * UNIT);
    assert_eq!(c.badge.balance(&alice), 1);
    assert_eq!(c.badge.next_badge_id(), 1);
}

#[test]
fn test_badge_ids_follow_issuance_order() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);
    let bob = c.contributor(10 * UNIT);
    let carol = c.contributor(10 * UNIT);

    c.ledger.contribute(&bob, &NFT_THRESHOLD);
    c.ledger.contribute(&carol, &UNIT);
    c.ledger.contribute(&alice, &NFT_THRESHOLD);

    assert_eq!(c.badge.badge_of(&bob), Some(0));
    assert_eq!(c.badge.badge_of(&alice), Some(1));
    assert_eq!(c.badge.badge_of(&carol), None);
    assert_eq!(c.badge.owner_of(&1), Some(alice));
}

#[test]
fn test_issuers_reject_direct_callers() {
    let c = setup();
    let mallory = Address::generate(&c.env);

    assert_eq!(
        c.rewards.try_issue_reward(&mallory, &mallory, &UNIT),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        c.badge.try_consider_badge(&mallory, &mallory, &NFT_THRESHOLD),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_high_precision_asset_with_widest_rate_is_rewarded() {
    let unit = 10i128.pow(30);
    let c = setup_with(10 * unit, u32::MAX, 30, unit / 2);
    let amount = 9 * unit / 10;
    let alice = c.contributor(amount);

    c.ledger.contribute(&alice, &amount);

    assert_eq!(c.ledger.total_funds_raised(), amount);
    // 0.9 · (2^32 - 1), floored.
    assert_eq!(c.rewards.balance(&alice), 3_865_470_565);
    assert!(c.ledger.has_received_badge(&alice));
}

// ─────────────────────────────────────────────────────────
// Atomicity
// ─────────────────────────────────────────────────────────

#[test]
fn test_reward_overflow_rolls_back_whole_contribution() {
    // Decimals 0 and the widest rate make any large contribution overflow.
    let c = setup_with(i128::MAX, u32::MAX, 0, 1);
    let amount = i128::MAX / 2;
    let alice = c.contributor(amount);

    assert_eq!(
        c.ledger.try_contribute(&alice, &amount),
        Err(Ok(Error::ArithmeticOverflow))
    );

    assert_eq!(c.ledger.total_funds_raised(), 0);
    assert_eq!(c.ledger.get_contribution(&alice), 0);
    assert_eq!(c.asset.balance(&alice), amount);
    assert_eq!(c.ledger.held_balance(), 0);
    assert_eq!(c.rewards.total_supply(), 0);
    assert!(!c.ledger.has_received_badge(&alice));
}

#[test]
fn test_unbound_issuers_abort_contribution() {
    let c = setup_unbound();
    let alice = c.contributor(10 * UNIT);

    assert_eq!(
        c.ledger.try_contribute(&alice, &UNIT),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(c.ledger.total_funds_raised(), 0);
    assert_eq!(c.asset.balance(&alice), 10 * UNIT);
}

// ─────────────────────────────────────────────────────────
// Withdrawal
// ─────────────────────────────────────────────────────────

#[test]
fn test_owner_withdraws_after_goal() {
    let c = setup();
    let alice = c.contributor(GOAL);
    c.ledger.contribute(&alice, &GOAL);

    let withdrawn = c.ledger.withdraw_funds(&c.owner);

    assert_eq!(withdrawn, GOAL);
    assert_eq!(c.asset.balance(&c.owner), GOAL);
    assert_eq!(c.ledger.held_balance(), 0);
    // The historical record survives the drain.
    assert_eq!(c.ledger.total_funds_raised(), GOAL);
    assert_eq!(c.ledger.get_contribution(&alice), GOAL);
    assert_eq!(c.ledger.status(), CampaignStatus::GoalReached);
}

#[test]
fn test_second_withdrawal_transfers_zero() {
    let c = setup();
    let alice = c.contributor(GOAL);
    c.ledger.contribute(&alice, &GOAL);

    assert_eq!(c.ledger.withdraw_funds(&c.owner), GOAL);
    assert_eq!(c.ledger.withdraw_funds(&c.owner), 0);
    assert_eq!(c.asset.balance(&c.owner), GOAL);
}

#[test]
fn test_owner_cannot_withdraw_before_goal() {
    let c = setup();
    let alice = c.contributor(GOAL);
    c.ledger.contribute(&alice, &(GOAL - 1));

    assert_eq!(
        c.ledger.try_withdraw_funds(&c.owner),
        Err(Ok(Error::GoalNotReached))
    );
    assert_eq!(c.ledger.held_balance(), GOAL - 1);
}

#[test]
fn test_non_owner_cannot_withdraw() {
    let c = setup();
    let alice = c.contributor(GOAL);

    assert_eq!(
        c.ledger.try_withdraw_funds(&alice),
        Err(Ok(Error::Unauthorized))
    );

    c.ledger.contribute(&alice, &GOAL);

    assert_eq!(
        c.ledger.try_withdraw_funds(&alice),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(c.ledger.held_balance(), GOAL);
}

// ─────────────────────────────────────────────────────────
// Invariants over a mixed sequence
// ─────────────────────────────────────────────────────────

#[test]
fn test_invariants_hold_across_campaign() {
    let c = setup();
    let before = c.ledger.get_campaign();
    let contributors: std::vec::Vec<Address> =
        (0..4).map(|_| c.contributor(GOAL)).collect();
    let steps: [(usize, i128); 7] = [
        (0, 2 * UNIT),
        (1, 6 * UNIT),
        (0, 3 * UNIT),
        (2, UNIT),
        (3, 4 * UNIT),
        (3, UNIT),
        (1, 40 * UNIT),
    ];

    let mut total_before = 0;
    for (who, amount) in steps {
        let contributor = &contributors[who];
        let badged_before = c.ledger.has_received_badge(contributor);
        let next_id_before = c.badge.next_badge_id();

        c.ledger.contribute(contributor, &amount);

        let badged_after = c.ledger.has_received_badge(contributor);
        let minted = u64::from(!badged_before && badged_after);
        assert_badge_flag_monotonic(badged_before, badged_after);
        assert_badge_counter_step(next_id_before, c.badge.next_badge_id(), minted);

        let total_after = c.ledger.total_funds_raised();
        assert_total_monotonic(total_before, total_after);
        total_before = total_after;

        assert_all_ledger_invariants(&c.ledger, &contributors);
    }

    assert!(c.ledger.is_funding_complete());
    assert_eq!(c.ledger.total_funds_raised(), 57 * UNIT);
    // Contributors 0, 1 and 3 reached 5 units; contributor 2 did not.
    assert_eq!(c.badge.next_badge_id(), 3);

    c.ledger.withdraw_funds(&c.owner);
    assert_all_ledger_invariants(&c.ledger, &contributors);
    assert_config_unchanged(&before, &c.ledger.get_campaign());
}
