use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::CollectError;
use crate::state::{RecipientShare, MAX_RECIPIENTS};

// ---------------------------------------------------------------------------
// Fee math
// ---------------------------------------------------------------------------

pub struct CollectBreakdown {
    pub treasury: u64,
    pub referrer: u64,
    /// Post-fee amount to be split among the configured recipients
    pub adjusted: u64,
}

/// Floor share of `amount` at `bps` basis points.
pub fn bps_share(amount: u64, bps: u16) -> Result<u64> {
    require!(bps <= 10_000, CollectError::InvalidFeePercentage);
    Ok(((amount as u128) * (bps as u128) / 10_000) as u64)
}

/// Takes the treasury cut off the gross, then the referral cut off the
/// post-treasury amount when a referral applies.
pub fn compute_collect_split(
    gross: u64,
    treasury_fee_bps: u16,
    referral_fee_bps: u16,
    referral_applies: bool,
) -> Result<CollectBreakdown> {
    let treasury = bps_share(gross, treasury_fee_bps)?;
    let mut adjusted = gross
        .checked_sub(treasury)
        .ok_or(CollectError::MathOverflow)?;

    let referrer = if referral_applies && referral_fee_bps > 0 {
        bps_share(adjusted, referral_fee_bps)?
    } else {
        0
    };
    adjusted = adjusted
        .checked_sub(referrer)
        .ok_or(CollectError::MathOverflow)?;

    Ok(CollectBreakdown {
        treasury,
        referrer,
        adjusted,
    })
}

/// Validates a recipient split table at item creation: 1 to 5 entries, no
/// zero shares, shares summing to exactly 10000 bps.
pub fn validate_recipient_shares(recipients: &[RecipientShare]) -> Result<()> {
    require!(
        !recipients.is_empty() && recipients.len() <= MAX_RECIPIENTS,
        CollectError::InvalidRecipientSplits
    );
    let mut total: u32 = 0;
    for share in recipients {
        require!(share.split_bps > 0, CollectError::InvalidRecipientSplits);
        total += share.split_bps as u32;
    }
    require!(total == 10_000, CollectError::InvalidRecipientSplits);
    Ok(())
}

/// Per-recipient payout amounts for the post-fee `adjusted` amount. A single
/// recipient receives the full remainder; multiple recipients each receive
/// the floor of their share, leaving up to `recipients.len() - 1` units with
/// the payer.
pub fn recipient_amounts(adjusted: u64, recipients: &[RecipientShare]) -> Result<Vec<u64>> {
    if recipients.len() == 1 {
        return Ok(vec![adjusted]);
    }
    recipients
        .iter()
        .map(|share| bps_share(adjusted, share.split_bps))
        .collect()
}

// ---------------------------------------------------------------------------
// Token transfer helper
// ---------------------------------------------------------------------------

/// Transfers from the collector's token account, collector signing. The
/// destination arrives as a raw account info so remaining-accounts payouts
/// can reuse the same path.
pub fn pay<'info>(
    from: &Account<'info, TokenAccount>,
    to: &AccountInfo<'info>,
    authority: &Signer<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.clone(),
        authority: authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

// ---------------------------------------------------------------------------
// Currency whitelist
// ---------------------------------------------------------------------------

/// The whitelist check is pure existence: the currency PDA must be a live
/// account owned by this program. Callers pin the address via seeds, so a
/// missing or revoked (closed) entry is the only way to land here.
pub fn ensure_currency_allowed(allowed_currency: &AccountInfo, program_id: &Pubkey) -> Result<()> {
    require!(
        allowed_currency.owner == program_id && !allowed_currency.data_is_empty(),
        CollectError::CurrencyNotAllowed
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Follower gate
// ---------------------------------------------------------------------------

/// Follow record layout expected from the configured graph program:
/// 8-byte discriminator, then owner / follower / followed_at.
#[derive(AnchorDeserialize)]
struct FollowRecord {
    owner: Pubkey,
    follower: Pubkey,
    followed_at: i64,
}

/// Verifies that `collector` follows `seller` as of `now`, by reading a
/// follow record account owned by the trusted graph program. Any malformed
/// or mismatched record fails closed.
pub fn check_follow_record(
    follow_record: &AccountInfo,
    graph_program: &Pubkey,
    seller: &Pubkey,
    collector: &Pubkey,
    now: i64,
) -> Result<()> {
    require!(follow_record.owner == graph_program, CollectError::NotFollowing);
    let data = follow_record
        .try_borrow_data()
        .map_err(|_| error!(CollectError::NotFollowing))?;
    require!(data.len() > 8, CollectError::NotFollowing);
    let record = FollowRecord::deserialize(&mut &data[8..])
        .map_err(|_| error!(CollectError::NotFollowing))?;
    require!(
        record.owner == *seller && record.follower == *collector,
        CollectError::NotFollowing
    );
    require!(record.followed_at <= now, CollectError::NotFollowing);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(bps: &[u16]) -> Vec<RecipientShare> {
        bps.iter()
            .map(|&split_bps| RecipientShare {
                recipient: Pubkey::new_unique(),
                split_bps,
            })
            .collect()
    }

    #[test]
    fn split_validation_accepts_exact_totals() {
        validate_recipient_shares(&shares(&[10_000])).unwrap();
        validate_recipient_shares(&shares(&[5_000, 5_000])).unwrap();
        validate_recipient_shares(&shares(&[3_333, 3_333, 3_334])).unwrap();
        validate_recipient_shares(&shares(&[2_000, 2_000, 2_000, 2_000, 2_000])).unwrap();
    }

    #[test]
    fn split_validation_rejects_bad_tables() {
        assert!(validate_recipient_shares(&shares(&[])).is_err());
        assert!(validate_recipient_shares(&shares(&[9_999])).is_err());
        assert!(validate_recipient_shares(&shares(&[5_000, 5_001])).is_err());
        assert!(validate_recipient_shares(&shares(&[10_000, 0])).is_err());
        assert!(
            validate_recipient_shares(&shares(&[2_000, 2_000, 2_000, 2_000, 1_000, 1_000]))
                .is_err()
        );
    }

    #[test]
    fn collect_split_worked_example() {
        // gross 1000, treasury 0.5%, referral 10% of the post-treasury amount
        let split = compute_collect_split(1_000, 50, 1_000, true).unwrap();
        assert_eq!(split.treasury, 5);
        assert_eq!(split.referrer, 99);
        assert_eq!(split.adjusted, 896);
    }

    #[test]
    fn single_recipient_gets_the_full_remainder() {
        let amounts = recipient_amounts(896, &shares(&[10_000])).unwrap();
        assert_eq!(amounts, vec![896]);
    }

    #[test]
    fn multi_recipient_floors_leave_dust_with_the_payer() {
        // 101 split three ways floors to 33 + 33 + 33, two units undistributed
        let amounts = recipient_amounts(101, &shares(&[3_333, 3_333, 3_334])).unwrap();
        assert_eq!(amounts, vec![33, 33, 33]);
        assert_eq!(amounts.iter().sum::<u64>(), 99);
    }

    #[test]
    fn dust_is_bounded_by_recipient_count() {
        for adjusted in [0u64, 1, 7, 99, 101, 9_999, 1_000_000] {
            for table in [
                shares(&[10_000]),
                shares(&[5_000, 5_000]),
                shares(&[3_333, 3_333, 3_334]),
                shares(&[1, 1, 1, 1, 9_996]),
            ] {
                let amounts = recipient_amounts(adjusted, &table).unwrap();
                let distributed: u64 = amounts.iter().sum();
                assert!(distributed <= adjusted);
                assert!((adjusted - distributed) < table.len() as u64);
                if table.len() == 1 {
                    assert_eq!(distributed, adjusted);
                }
            }
        }
    }

    #[test]
    fn free_collect_splits_to_zero() {
        let split = compute_collect_split(0, 50, 1_000, true).unwrap();
        assert_eq!((split.treasury, split.referrer, split.adjusted), (0, 0, 0));
    }

    fn follow_record_data(owner: &Pubkey, follower: &Pubkey, followed_at: i64) -> Vec<u8> {
        // 8-byte discriminator, then the record fields
        let mut data = vec![0u8; 8];
        data.extend_from_slice(owner.as_ref());
        data.extend_from_slice(follower.as_ref());
        data.extend_from_slice(&followed_at.to_le_bytes());
        data
    }

    #[test]
    fn follow_gate_checks_the_record_fields() {
        let graph = Pubkey::new_unique();
        let seller = Pubkey::new_unique();
        let collector = Pubkey::new_unique();
        let key = Pubkey::new_unique();

        let mut lamports = 1_000_000u64;
        let mut data = follow_record_data(&seller, &collector, 500);
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &graph, false, 0);
        check_follow_record(&info, &graph, &seller, &collector, 500).unwrap();
        // followed after "now"
        assert!(check_follow_record(&info, &graph, &seller, &collector, 499).is_err());

        // record owned by some other program fails closed
        let mut lamports = 1_000_000u64;
        let mut data = follow_record_data(&seller, &collector, 0);
        let other_program = Pubkey::new_unique();
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &other_program,
            false,
            0,
        );
        assert!(check_follow_record(&info, &graph, &seller, &collector, 500).is_err());

        // record naming a different collector fails closed
        let mut lamports = 1_000_000u64;
        let mut data = follow_record_data(&seller, &Pubkey::new_unique(), 0);
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &graph, false, 0);
        assert!(check_follow_record(&info, &graph, &seller, &collector, 500).is_err());
    }

    #[test]
    fn currency_gate_requires_a_live_whitelist_entry() {
        let program_id = Pubkey::new_unique();
        let key = Pubkey::new_unique();

        let mut lamports = 1_000_000u64;
        let mut data = vec![0u8; 8 + 33];
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &program_id,
            false,
            0,
        );
        ensure_currency_allowed(&info, &program_id).unwrap();

        // never initialized: system-owned with no data
        let system = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &system,
            false,
            0,
        );
        assert!(ensure_currency_allowed(&info, &program_id).is_err());
    }
}
