extern crate std;

use soroban_sdk::{testutils::Events, vec, Address, Env, IntoVal, Symbol, TryIntoVal, Val, Vec};

use crowdfund_shared::events::{
    ContributionReceived, FundsWithdrawn, NftRewardSent, TokenRewardSent, CONTRIBUTION_RECEIVED,
    FUNDS_WITHDRAWN, NFT_REWARD_SENT, TOKEN_REWARD_SENT,
};

use crate::test::setup;

const UNIT: i128 = 10_000_000;

struct Emitted {
    position: usize,
    contract: Address,
    topics: Vec<Val>,
    data: Val,
}

/// Every recorded event whose leading topic is `name`, oldest first.
fn events_named(env: &Env, name: Symbol) -> std::vec::Vec<Emitted> {
    env.events()
        .all()
        .iter()
        .enumerate()
        .filter_map(|(position, (contract, topics, data))| {
            let first: Symbol = topics.get(0)?.try_into_val(env).ok()?;
            (first == name).then_some(Emitted {
                position,
                contract,
                topics,
                data,
            })
        })
        .collect()
}

fn last_named(env: &Env, name: Symbol) -> Emitted {
    events_named(env, name)
        .pop()
        .expect("No matching event found")
}

#[test]
fn test_contribution_received_event() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &UNIT);

    let event = last_named(&c.env, CONTRIBUTION_RECEIVED);
    assert_eq!(event.contract, c.ledger.address);

    // Topic: (symbol_short!("contrib"), contributor)
    let expected_topics = vec![
        &c.env,
        CONTRIBUTION_RECEIVED.into_val(&c.env),
        alice.into_val(&c.env),
    ];
    assert_eq!(event.topics, expected_topics);

    let data: ContributionReceived = event.data.try_into_val(&c.env).unwrap();
    assert_eq!(
        data,
        ContributionReceived {
            contributor: alice.clone(),
            amount: UNIT,
        }
    );
}

#[test]
fn test_token_reward_sent_event() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &(2 * UNIT));

    let event = last_named(&c.env, TOKEN_REWARD_SENT);
    assert_eq!(event.contract, c.rewards.address);

    let data: TokenRewardSent = event.data.try_into_val(&c.env).unwrap();
    assert_eq!(
        data,
        TokenRewardSent {
            contributor: alice.clone(),
            tokens: 200,
        }
    );
}

#[test]
fn test_nft_reward_sent_event_carries_first_id() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &(5 * UNIT));

    let event = last_named(&c.env, NFT_REWARD_SENT);
    assert_eq!(event.contract, c.badge.address);

    let data: NftRewardSent = event.data.try_into_val(&c.env).unwrap();
    assert_eq!(
        data,
        NftRewardSent {
            contributor: alice.clone(),
            badge_id: 0,
        }
    );
}

#[test]
fn test_events_are_ordered_contribution_reward_badge() {
    let c = setup();
    let alice = c.contributor(10 * UNIT);

    c.ledger.contribute(&alice, &(5 * UNIT));

    let contribution = last_named(&c.env, CONTRIBUTION_RECEIVED);
    let reward = last_named(&c.env, TOKEN_REWARD_SENT);
    let badge = last_named(&c.env, NFT_REWARD_SENT);

    assert!(contribution.position < reward.position);
    assert!(reward.position < badge.position);
}

#[test]
fn test_rejected_contribution_emits_nothing() {
    let c = setup();
    let alice = c.contributor(UNIT);

    let _ = c.ledger.try_contribute(&alice, &0);

    assert!(events_named(&c.env, CONTRIBUTION_RECEIVED).is_empty());
    assert!(events_named(&c.env, TOKEN_REWARD_SENT).is_empty());
    assert!(events_named(&c.env, NFT_REWARD_SENT).is_empty());
}

#[test]
fn test_below_threshold_contribution_emits_no_badge_event() {
    let c = setup();
    let alice = c.contributor(UNIT);

    c.ledger.contribute(&alice, &UNIT);

    assert!(events_named(&c.env, NFT_REWARD_SENT).is_empty());
}

#[test]
fn test_funds_withdrawn_event() {
    let c = setup();
    let goal = c.ledger.funding_goal();
    let alice = c.contributor(goal);
    c.ledger.contribute(&alice, &goal);

    c.ledger.withdraw_funds(&c.owner);

    let event = last_named(&c.env, FUNDS_WITHDRAWN);
    assert_eq!(event.contract, c.ledger.address);
    let expected_topics = vec![
        &c.env,
        FUNDS_WITHDRAWN.into_val(&c.env),
        c.owner.into_val(&c.env),
    ];
    assert_eq!(event.topics, expected_topics);

    let data: FundsWithdrawn = event.data.try_into_val(&c.env).unwrap();
    assert_eq!(
        data,
        FundsWithdrawn {
            owner: c.owner.clone(),
            amount: goal,
        }
    );
}

#[test]
fn test_repeated_withdrawal_reports_zero() {
    let c = setup();
    let goal = c.ledger.funding_goal();
    let alice = c.contributor(goal);
    c.ledger.contribute(&alice, &goal);
    c.ledger.withdraw_funds(&c.owner);

    c.ledger.withdraw_funds(&c.owner);

    let data: FundsWithdrawn = last_named(&c.env, FUNDS_WITHDRAWN)
        .data
        .try_into_val(&c.env)
        .unwrap();
    assert_eq!(data.amount, 0);
}
