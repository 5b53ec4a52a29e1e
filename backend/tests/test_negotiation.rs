//! Tests for the negotiation coordinator
//!
//! Negotiating agents are built with real learning state but only their
//! `negotiate` behavior is exercised here, so every trace below is exact:
//! within a pass each revision lands in the bid map before the next agent's
//! turn.

use auction_simulator_core_rs::agents::{
    BiddingAgent, FixedBidAgent, LearningParams, NegotiatingAgent,
};
use auction_simulator_core_rs::negotiation::{
    finalize_bids, NegotiationCoordinator, DEFAULT_NEGOTIATION_PASSES,
};
use auction_simulator_core_rs::oracle::{AdvisoryOracle, FixedOracle};
use auction_simulator_core_rs::CompetitorBids;

fn agents() -> Vec<Box<dyn BiddingAgent>> {
    vec![
        Box::new(NegotiatingAgent::new(
            "Alpha".to_string(),
            LearningParams::default(),
        )),
        Box::new(NegotiatingAgent::new(
            "Beta".to_string(),
            LearningParams::default(),
        )),
        Box::new(FixedBidAgent::new("Gamma".to_string(), 100.0)),
    ]
}

fn initial_bids() -> CompetitorBids {
    [
        ("Alpha".to_string(), 95.0),
        ("Beta".to_string(), 98.0),
        ("Gamma".to_string(), 100.0),
    ]
    .into()
}

#[test]
fn test_sequential_visibility_within_pass() {
    let mut agents = agents();
    let mut bids = initial_bids();

    // Pass 1: Alpha undercuts the map minimum (its own 95) to 94; Beta then
    // sees 94 already and lands on 93. Two more passes shave 2 each.
    NegotiationCoordinator::new(3).negotiate_bids(&mut agents, &mut bids, 100.0, 5, None);

    assert_eq!(bids["Alpha"], 90.0);
    assert_eq!(bids["Beta"], 89.0);
    assert!(
        bids["Beta"] < bids["Alpha"],
        "Beta must have seen Alpha's same-pass revision"
    );
}

#[test]
fn test_non_negotiators_keep_original_bid() {
    let mut agents = agents();
    let mut bids = initial_bids();

    NegotiationCoordinator::new(3).negotiate_bids(&mut agents, &mut bids, 100.0, 5, None);

    assert_eq!(bids["Gamma"], 100.0);
}

#[test]
fn test_pass_count_is_fixed_and_exhausted() {
    let mut one_pass_agents = agents();
    let mut one_pass_bids = initial_bids();
    NegotiationCoordinator::new(1).negotiate_bids(
        &mut one_pass_agents,
        &mut one_pass_bids,
        100.0,
        5,
        None,
    );
    assert_eq!(one_pass_bids["Alpha"], 94.0);
    assert_eq!(one_pass_bids["Beta"], 93.0);

    // The same protocol with more passes keeps shaving: the pass count is
    // what bounds the sub-protocol, nothing else.
    let mut five_pass_agents = agents();
    let mut five_pass_bids = initial_bids();
    NegotiationCoordinator::new(5).negotiate_bids(
        &mut five_pass_agents,
        &mut five_pass_bids,
        100.0,
        5,
        None,
    );
    assert_eq!(five_pass_bids["Alpha"], 86.0);
    assert_eq!(five_pass_bids["Beta"], 85.0);
}

#[test]
fn test_default_pass_count() {
    assert_eq!(DEFAULT_NEGOTIATION_PASSES, 3);
    assert_eq!(
        NegotiationCoordinator::default().passes(),
        DEFAULT_NEGOTIATION_PASSES
    );
}

#[test]
fn test_advisory_suggestion_blended_into_counter_bids() {
    let mut agents = agents();
    let mut bids = initial_bids();
    let oracle = FixedOracle::new(100.0);

    // Alpha: baseline 94, blended to 97. Beta: min is then 97, baseline 96,
    // blended to 98.
    NegotiationCoordinator::new(1).negotiate_bids(
        &mut agents,
        &mut bids,
        100.0,
        5,
        Some(&oracle as &dyn AdvisoryOracle),
    );

    assert_eq!(bids["Alpha"], 97.0);
    assert_eq!(bids["Beta"], 98.0);
    assert_eq!(bids["Gamma"], 100.0);
}

#[test]
fn test_finalize_orders_ascending_with_name_tiebreak() {
    let bids: CompetitorBids = [
        ("Beta".to_string(), 10.0),
        ("Alpha".to_string(), 10.0),
        ("Gamma".to_string(), 5.0),
    ]
    .into();

    let ordered = finalize_bids(&bids);
    assert_eq!(
        ordered,
        vec![
            ("Gamma".to_string(), 5.0),
            ("Alpha".to_string(), 10.0),
            ("Beta".to_string(), 10.0),
        ]
    );
}

#[test]
fn test_finalize_empty_map() {
    assert!(finalize_bids(&CompetitorBids::new()).is_empty());
}
