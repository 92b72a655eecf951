use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use fee_collect::errors::CollectError;
use fee_collect::instructions::utils::{
    compute_collect_split, recipient_amounts, validate_recipient_shares,
};
use fee_collect::state::{CollectConfig, RecipientShare};

fn new_collect(seller: Pubkey, recipients: Vec<RecipientShare>) -> CollectConfig {
    CollectConfig {
        seller,
        item_id: 7,
        amount: 1_000,
        currency: Pubkey::new_unique(),
        referral_fee_bps: 1_000,
        follower_only: false,
        collect_limit: 0,
        current_collects: 0,
        end_timestamp: 0,
        recipients,
        bump: 254,
    }
}

fn shares(bps: &[u16]) -> Vec<RecipientShare> {
    bps.iter()
        .map(|&split_bps| RecipientShare {
            recipient: Pubkey::new_unique(),
            split_bps,
        })
        .collect()
}

fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => panic!("unexpected program error: {}", e),
    }
}

fn code_of(expected: CollectError) -> u32 {
    error_code(Error::from(expected))
}

#[test]
fn open_ended_collect_never_expires() {
    let collect = new_collect(Pubkey::new_unique(), shares(&[10_000]));
    collect.ensure_collectible(0).unwrap();
    collect.ensure_collectible(i64::MAX).unwrap();
}

#[test]
fn collect_rejected_after_end_timestamp() {
    let mut collect = new_collect(Pubkey::new_unique(), shares(&[10_000]));
    collect.end_timestamp = 5_000;

    collect.ensure_collectible(5_000).unwrap();
    let err = collect.ensure_collectible(5_001).unwrap_err();
    assert_eq!(error_code(err), code_of(CollectError::CollectExpired));
}

#[test]
fn collect_limit_is_enforced() {
    let mut collect = new_collect(Pubkey::new_unique(), shares(&[10_000]));
    collect.collect_limit = 3;

    for _ in 0..3 {
        collect.ensure_collectible(1_000).unwrap();
        collect.current_collects += 1;
    }
    let err = collect.ensure_collectible(1_000).unwrap_err();
    assert_eq!(error_code(err), code_of(CollectError::CollectLimitExceeded));
}

#[test]
fn split_table_rejected_when_not_exactly_full() {
    let err = validate_recipient_shares(&shares(&[6_000, 3_000])).unwrap_err();
    assert_eq!(
        error_code(err),
        code_of(CollectError::InvalidRecipientSplits)
    );

    let err = validate_recipient_shares(&shares(&[])).unwrap_err();
    assert_eq!(
        error_code(err),
        code_of(CollectError::InvalidRecipientSplits)
    );
}

#[test]
fn single_recipient_payment_conserves_value() {
    // gross 1000, treasury 50 bps, referral 1000 bps on the adjusted amount
    let split = compute_collect_split(1_000, 50, 1_000, true).unwrap();
    let amounts = recipient_amounts(split.adjusted, &shares(&[10_000])).unwrap();

    assert_eq!(split.treasury, 5);
    assert_eq!(split.referrer, 99);
    assert_eq!(amounts, vec![896]);
    assert_eq!(
        split.treasury + split.referrer + amounts.iter().sum::<u64>(),
        1_000
    );
}

#[test]
fn seller_as_referrer_means_no_referral_cut() {
    let split = compute_collect_split(1_000, 50, 1_000, false).unwrap();
    assert_eq!(split.referrer, 0);
    assert_eq!(split.adjusted, 995);
}

#[test]
fn multi_recipient_payment_may_leave_dust() {
    let table = shares(&[3_333, 3_333, 3_334]);
    let split = compute_collect_split(1_000, 50, 1_000, true).unwrap();
    let amounts = recipient_amounts(split.adjusted, &table).unwrap();

    let distributed: u64 = amounts.iter().sum();
    assert!(distributed <= split.adjusted);
    assert!((split.adjusted - distributed) < table.len() as u64);
    // 896 * 3333 / 10000 floors to 298, twice, plus 896 * 3334 / 10000 = 298
    assert_eq!(amounts, vec![298, 298, 298]);
    assert_eq!(split.adjusted - distributed, 2);
}

#[test]
fn free_collect_pays_nobody() {
    let mut collect = new_collect(Pubkey::new_unique(), shares(&[5_000, 5_000]));
    collect.amount = 0;

    let split = compute_collect_split(collect.amount, 50, 1_000, true).unwrap();
    let amounts = recipient_amounts(split.adjusted, &collect.recipients).unwrap();
    assert_eq!((split.treasury, split.referrer), (0, 0));
    assert!(amounts.iter().all(|&a| a == 0));
}
