use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use auction_collect::errors::AuctionError;
use auction_collect::instructions::utils::{apply_bid, compute_fee_split, consume_nonce};
use auction_collect::state::{Auction, AuctionStatus, BidderRecord, SignerNonce};

const DURATION: u32 = 86_400;
const MIN_EXTENSION: u32 = 60;
const RESERVE: u64 = 100;
const MIN_INCREMENT: u64 = 10;

fn new_auction(seller: Pubkey) -> Auction {
    Auction {
        seller,
        item_id: 42,
        currency: Pubkey::new_unique(),
        recipient: Pubkey::new_unique(),
        available_from: 1_000,
        duration: DURATION,
        min_extension: MIN_EXTENSION,
        reserve_price: RESERVE,
        min_increment: MIN_INCREMENT,
        referral_fee_bps: 1_000,
        restricted_to_followers: false,
        started_at: 0,
        end_time: 0,
        winner: Pubkey::default(),
        winning_bid: 0,
        status: AuctionStatus::Created,
        bump: 254,
    }
}

fn new_record() -> BidderRecord {
    BidderRecord {
        auction: Pubkey::default(),
        bidder: Pubkey::default(),
        referrer: Pubkey::default(),
        bid_count: 0,
        bump: 0,
    }
}

fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => panic!("unexpected program error: {}", e),
    }
}

fn code_of(expected: AuctionError) -> u32 {
    error_code(Error::from(expected))
}

#[test]
fn first_bid_opens_the_window() {
    let seller = Pubkey::new_unique();
    let bidder = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut record = new_record();
    let auction_key = Pubkey::new_unique();
    let now = 2_000;

    let outcome = apply_bid(
        &mut auction,
        &mut record,
        auction_key,
        bidder,
        seller, // no referral
        RESERVE,
        now,
    )
    .unwrap();

    assert!(outcome.refund.is_none());
    assert_eq!(auction.started_at, now);
    assert_eq!(auction.end_time, now + DURATION as i64);
    assert_eq!(outcome.end_time, auction.end_time);
    assert_eq!(auction.winner, bidder);
    assert_eq!(auction.winning_bid, RESERVE);
    assert_eq!(auction.status, AuctionStatus::Open);
    assert_eq!(record.bid_count, 1);
}

#[test]
fn bid_below_reserve_is_rejected() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut record = new_record();

    let err = apply_bid(
        &mut auction,
        &mut record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        RESERVE - 50,
        2_000,
    )
    .unwrap_err();

    assert_eq!(error_code(err), code_of(AuctionError::BidTooLow));
    assert!(!auction.has_winner());
    assert_eq!(auction.end_time, 0);
}

#[test]
fn bid_before_available_from_is_rejected() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut record = new_record();

    let err = apply_bid(
        &mut auction,
        &mut record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        RESERVE,
        999, // before available_from = 1000
    )
    .unwrap_err();

    assert_eq!(error_code(err), code_of(AuctionError::AuctionNotOpen));
}

#[test]
fn bid_after_end_time_is_rejected() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut record = new_record();
    apply_bid(
        &mut auction,
        &mut record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        RESERVE,
        2_000,
    )
    .unwrap();

    let late = auction.end_time + 1;
    let mut other_record = new_record();
    let err = apply_bid(
        &mut auction,
        &mut other_record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        RESERVE * 2,
        late,
    )
    .unwrap_err();

    assert_eq!(error_code(err), code_of(AuctionError::AuctionNotOpen));
}

#[test]
fn outbid_refunds_previous_winner_in_full() {
    let seller = Pubkey::new_unique();
    let first = Pubkey::new_unique();
    let second = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut first_record = new_record();
    let mut second_record = new_record();
    let auction_key = Pubkey::new_unique();

    apply_bid(
        &mut auction,
        &mut first_record,
        auction_key,
        first,
        seller,
        100,
        2_000,
    )
    .unwrap();

    // below the minimum increment
    let err = apply_bid(
        &mut auction,
        &mut second_record,
        auction_key,
        second,
        seller,
        105,
        2_100,
    )
    .unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::BidTooLow));
    assert_eq!(auction.winner, first);

    let outcome = apply_bid(
        &mut auction,
        &mut second_record,
        auction_key,
        second,
        seller,
        110,
        2_100,
    )
    .unwrap();

    assert_eq!(outcome.refund, Some((first, 100)));
    assert_eq!(auction.winner, second);
    assert_eq!(auction.winning_bid, 110);
}

#[test]
fn winning_bid_is_monotonically_non_decreasing() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let auction_key = Pubkey::new_unique();
    let mut now = 2_000;
    let mut last_winning = 0u64;

    for amount in [100u64, 150, 149, 160, 160, 200] {
        let mut record = new_record();
        let result = apply_bid(
            &mut auction,
            &mut record,
            auction_key,
            Pubkey::new_unique(),
            seller,
            amount,
            now,
        );
        if result.is_ok() {
            assert!(auction.winning_bid >= last_winning);
            assert_eq!(auction.winning_bid, amount);
        } else {
            assert_eq!(auction.winning_bid, last_winning);
        }
        last_winning = auction.winning_bid;
        now += 10;
    }
}

#[test]
fn bid_near_the_end_extends_the_window() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let auction_key = Pubkey::new_unique();
    let mut record = new_record();
    apply_bid(
        &mut auction,
        &mut record,
        auction_key,
        Pubkey::new_unique(),
        seller,
        100,
        2_000,
    )
    .unwrap();
    let end = auction.end_time;

    // far from the end: no extension
    let mut far_record = new_record();
    apply_bid(
        &mut auction,
        &mut far_record,
        auction_key,
        Pubkey::new_unique(),
        seller,
        150,
        end - 100,
    )
    .unwrap();
    assert_eq!(auction.end_time, end);

    // inside the anti-snipe window: pushed to now + min_extension
    let mut late_record = new_record();
    apply_bid(
        &mut auction,
        &mut late_record,
        auction_key,
        Pubkey::new_unique(),
        seller,
        200,
        end - 10,
    )
    .unwrap();
    assert_eq!(auction.end_time, end - 10 + MIN_EXTENSION as i64);
    assert_eq!(auction.end_time, end + 50);
}

#[test]
fn referrer_attribution_is_write_once() {
    let seller = Pubkey::new_unique();
    let bidder = Pubkey::new_unique();
    let first_referrer = Pubkey::new_unique();
    let second_referrer = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut record = new_record();
    let auction_key = Pubkey::new_unique();

    apply_bid(
        &mut auction,
        &mut record,
        auction_key,
        bidder,
        first_referrer,
        100,
        2_000,
    )
    .unwrap();
    assert_eq!(record.referrer, first_referrer);

    // outbid by someone else, then the same bidder returns with another referrer
    let mut rival_record = new_record();
    apply_bid(
        &mut auction,
        &mut rival_record,
        auction_key,
        Pubkey::new_unique(),
        seller,
        150,
        2_050,
    )
    .unwrap();

    apply_bid(
        &mut auction,
        &mut record,
        auction_key,
        bidder,
        second_referrer,
        200,
        2_100,
    )
    .unwrap();
    assert_eq!(record.referrer, first_referrer);
    assert_eq!(record.bid_count, 2);
}

#[test]
fn settlement_gate_is_idempotent() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);

    // no bid ever: still open
    let err = auction.ensure_settleable(i64::MAX).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::AuctionStillOpen));

    let mut record = new_record();
    apply_bid(
        &mut auction,
        &mut record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        100,
        2_000,
    )
    .unwrap();

    // window still running
    let err = auction.ensure_settleable(auction.end_time).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::AuctionStillOpen));

    // window elapsed: settleable exactly once
    let after = auction.end_time + 1;
    auction.ensure_settleable(after).unwrap();
    auction.status = AuctionStatus::FeeSettled;
    let err = auction.ensure_settleable(after).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::FeeAlreadyProcessed));

    auction.status = AuctionStatus::Collected;
    let err = auction.ensure_settleable(after).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::FeeAlreadyProcessed));
}

#[test]
fn collection_gate_is_idempotent() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    let mut record = new_record();
    apply_bid(
        &mut auction,
        &mut record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        100,
        2_000,
    )
    .unwrap();

    let err = auction.ensure_claimable(auction.end_time).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::AuctionStillOpen));

    let after = auction.end_time + 1;
    auction.ensure_claimable(after).unwrap();

    // claim is allowed whether or not fees were settled first
    auction.status = AuctionStatus::FeeSettled;
    auction.ensure_claimable(after).unwrap();

    auction.status = AuctionStatus::Collected;
    let err = auction.ensure_claimable(after).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::AlreadyCollected));
}

#[test]
fn follow_snapshot_uses_auction_start_once_open() {
    let seller = Pubkey::new_unique();
    let mut auction = new_auction(seller);
    assert_eq!(auction.follow_snapshot_time(5_000), 5_000);

    let mut record = new_record();
    apply_bid(
        &mut auction,
        &mut record,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        seller,
        100,
        2_000,
    )
    .unwrap();

    // later bids are gated against the start snapshot, not "now"
    assert_eq!(auction.follow_snapshot_time(50_000), 2_000);
}

#[test]
fn consumed_nonce_cannot_be_replayed() {
    let bidder = Pubkey::new_unique();
    let mut record = SignerNonce {
        authority: Pubkey::default(),
        nonce: 0,
        bump: 0,
    };

    consume_nonce(&mut record, bidder, 0, 253).unwrap();
    assert_eq!(record.authority, bidder);
    assert_eq!(record.nonce, 1);

    // same intent again
    let err = consume_nonce(&mut record, bidder, 0, 253).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::SignatureInvalid));

    // skipping ahead is also rejected
    let err = consume_nonce(&mut record, bidder, 5, 253).unwrap_err();
    assert_eq!(error_code(err), code_of(AuctionError::SignatureInvalid));

    consume_nonce(&mut record, bidder, 1, 253).unwrap();
    assert_eq!(record.nonce, 2);
}

#[test]
fn settlement_amounts_match_the_fee_model() {
    // reserve auction won at 1000 with an attributed referrer
    let split = compute_fee_split(1_000, 50, 1_000, true).unwrap();
    assert_eq!(
        (split.treasury, split.referrer, split.recipient),
        (5, 99, 896)
    );

    // same auction without referral attribution
    let split = compute_fee_split(1_000, 50, 1_000, false).unwrap();
    assert_eq!(
        (split.treasury, split.referrer, split.recipient),
        (5, 0, 995)
    );
}
