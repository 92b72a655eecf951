use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::AuctionError;
use crate::events::FeesSettled;
use crate::state::*;

/// Domain tag mixed into every signed bid intent.
pub const BID_INTENT_TAG: &[u8] = b"auction-collect:bid:v1";

// ---------------------------------------------------------------------------
// Bid validation
// ---------------------------------------------------------------------------

/// Pure decision function: is `amount` an acceptable new bid given the
/// current auction state?
pub fn is_valid_bid(auction: &Auction, amount: u64) -> bool {
    if !auction.has_winner() {
        amount >= auction.reserve_price
    } else if amount <= auction.winning_bid {
        false
    } else {
        auction.min_increment == 0 || amount - auction.winning_bid >= auction.min_increment
    }
}

/// Outcome of a state-level bid application: who to refund (previous winner
/// and locked amount) and the resulting end time.
#[derive(Debug)]
pub struct BidOutcome {
    pub refund: Option<(Pubkey, u64)>,
    pub end_time: i64,
}

/// Applies a bid to the auction record and the bidder's per-auction record.
/// Pure state transition: timing gate, bid validation, write-once referrer
/// attribution, window opening on the first bid and anti-snipe extension on
/// later ones. Fund movement is the caller's responsibility.
pub fn apply_bid(
    auction: &mut Auction,
    record: &mut BidderRecord,
    auction_key: Pubkey,
    bidder: Pubkey,
    referrer: Pubkey,
    amount: u64,
    now: i64,
) -> Result<BidOutcome> {
    auction.ensure_biddable(now)?;
    require!(is_valid_bid(auction, amount), AuctionError::BidTooLow);

    if record.bid_count == 0 {
        record.auction = auction_key;
        record.bidder = bidder;
        record.referrer = referrer;
    }
    record.bid_count = record
        .bid_count
        .checked_add(1)
        .ok_or(AuctionError::MathOverflow)?;

    let refund = if auction.has_winner() {
        Some((auction.winner, auction.winning_bid))
    } else {
        None
    };

    if refund.is_none() {
        auction.started_at = now;
        auction.end_time = now
            .checked_add(auction.duration as i64)
            .ok_or(AuctionError::MathOverflow)?;
        auction.status = AuctionStatus::Open;
    } else if auction.end_time.saturating_sub(now) < auction.min_extension as i64 {
        auction.end_time = now
            .checked_add(auction.min_extension as i64)
            .ok_or(AuctionError::MathOverflow)?;
    }

    auction.winner = bidder;
    auction.winning_bid = amount;

    Ok(BidOutcome {
        refund,
        end_time: auction.end_time,
    })
}

// ---------------------------------------------------------------------------
// Fee math
// ---------------------------------------------------------------------------

pub struct FeeBreakdown {
    pub treasury: u64,
    pub referrer: u64,
    pub recipient: u64,
}

/// Floor share of `amount` at `bps` basis points. Never rounds up, so payees
/// never receive more than their exact share.
pub fn bps_share(amount: u64, bps: u16) -> Result<u64> {
    require!(bps <= 10_000, AuctionError::InvalidFeePercentage);
    Ok(((amount as u128) * (bps as u128) / 10_000) as u64)
}

/// Splits a gross amount into treasury / referrer / recipient shares. The
/// referral fee is computed on the post-treasury amount, so referral payouts
/// cannot reduce the treasury's effective take.
pub fn compute_fee_split(
    gross: u64,
    treasury_fee_bps: u16,
    referral_fee_bps: u16,
    referral_applies: bool,
) -> Result<FeeBreakdown> {
    let treasury = bps_share(gross, treasury_fee_bps)?;
    let mut adjusted = gross
        .checked_sub(treasury)
        .ok_or(AuctionError::MathOverflow)?;

    let referrer = if referral_applies && referral_fee_bps > 0 {
        bps_share(adjusted, referral_fee_bps)?
    } else {
        0
    };
    adjusted = adjusted
        .checked_sub(referrer)
        .ok_or(AuctionError::MathOverflow)?;

    Ok(FeeBreakdown {
        treasury,
        referrer,
        recipient: adjusted,
    })
}

// ---------------------------------------------------------------------------
// Token transfer helpers
// ---------------------------------------------------------------------------

pub fn transfer_tokens<'info>(
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

pub fn transfer_tokens_with_signer<'info>(
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &AccountInfo<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: authority.clone(),
    };
    let cpi_ctx =
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer_seeds);
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
        AuctionError::CurrencyNotAllowed
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

/// Verifies that `bidder` followed `seller` at or before `as_of`, by reading
/// a follow record account owned by the trusted graph program. Any malformed
/// or mismatched record fails closed.
pub fn check_follow_record(
    follow_record: &AccountInfo,
    graph_program: &Pubkey,
    seller: &Pubkey,
    bidder: &Pubkey,
    as_of: i64,
) -> Result<()> {
    require!(follow_record.owner == graph_program, AuctionError::NotFollowing);
    let data = follow_record
        .try_borrow_data()
        .map_err(|_| error!(AuctionError::NotFollowing))?;
    require!(data.len() > 8, AuctionError::NotFollowing);
    let record = FollowRecord::deserialize(&mut &data[8..])
        .map_err(|_| error!(AuctionError::NotFollowing))?;
    require!(
        record.owner == *seller && record.follower == *bidder,
        AuctionError::NotFollowing
    );
    require!(record.followed_at <= as_of, AuctionError::NotFollowing);
    Ok(())
}

// ---------------------------------------------------------------------------
// Delegated bid authorization
// ---------------------------------------------------------------------------

/// The message a bidder signs to delegate a bid: domain tag, auction key,
/// amount, referrer, nonce, deadline. The referrer is part of the signed
/// data so a relayer cannot swap in their own key for the attribution.
pub fn bid_intent_message(
    auction: &Pubkey,
    amount: u64,
    referrer: &Pubkey,
    nonce: u64,
    deadline: i64,
) -> Vec<u8> {
    let mut msg = Vec::with_capacity(BID_INTENT_TAG.len() + 32 + 8 + 32 + 8 + 8);
    msg.extend_from_slice(BID_INTENT_TAG);
    msg.extend_from_slice(auction.as_ref());
    msg.extend_from_slice(&amount.to_le_bytes());
    msg.extend_from_slice(referrer.as_ref());
    msg.extend_from_slice(&nonce.to_le_bytes());
    msg.extend_from_slice(&deadline.to_le_bytes());
    msg
}

/// Validates and consumes a signer nonce. Initializes the record on first
/// use, requires `nonce` to match the current counter, then increments it so
/// the same intent can never be submitted twice.
pub fn consume_nonce(
    record: &mut SignerNonce,
    authority: Pubkey,
    nonce: u64,
    bump: u8,
) -> Result<()> {
    if record.authority == Pubkey::default() {
        record.authority = authority;
        record.bump = bump;
    }
    require!(nonce == record.nonce, AuctionError::SignatureInvalid);
    record.nonce = record
        .nonce
        .checked_add(1)
        .ok_or(AuctionError::MathOverflow)?;
    Ok(())
}

fn read_u16(data: &[u8], at: usize) -> Result<usize> {
    let bytes: [u8; 2] = data
        .get(at..at + 2)
        .and_then(|s| s.try_into().ok())
        .ok_or(AuctionError::SignatureInvalid)?;
    Ok(u16::from_le_bytes(bytes) as usize)
}

/// Parses the data of an ed25519-program verification instruction and
/// returns the verified signer and message. Layout: count byte, padding,
/// one offsets block (seven u16 fields), then the payloads. All payloads
/// must live inside this same instruction.
pub fn parse_ed25519_verification(data: &[u8]) -> Result<(Pubkey, &[u8])> {
    require!(data.len() >= 16, AuctionError::SignatureInvalid);
    require!(data[0] == 1, AuctionError::SignatureInvalid);

    let sig_offset = read_u16(data, 2)?;
    let sig_ix = read_u16(data, 4)?;
    let pk_offset = read_u16(data, 6)?;
    let pk_ix = read_u16(data, 8)?;
    let msg_offset = read_u16(data, 10)?;
    let msg_len = read_u16(data, 12)?;
    let msg_ix = read_u16(data, 14)?;

    // u16::MAX means "this instruction" in the ed25519 offsets encoding
    let current = u16::MAX as usize;
    require!(
        sig_ix == current && pk_ix == current && msg_ix == current,
        AuctionError::SignatureInvalid
    );
    require!(
        sig_offset
            .checked_add(64)
            .map_or(false, |end| end <= data.len()),
        AuctionError::SignatureInvalid
    );

    let pk_end = pk_offset
        .checked_add(32)
        .ok_or(AuctionError::SignatureInvalid)?;
    require!(pk_end <= data.len(), AuctionError::SignatureInvalid);
    let msg_end = msg_offset
        .checked_add(msg_len)
        .ok_or(AuctionError::SignatureInvalid)?;
    require!(msg_end <= data.len(), AuctionError::SignatureInvalid);

    let mut pk_bytes = [0u8; 32];
    pk_bytes.copy_from_slice(&data[pk_offset..pk_end]);
    Ok((Pubkey::new_from_array(pk_bytes), &data[msg_offset..msg_end]))
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// Distributes the winning bid held in escrow: treasury cut, then the
/// referral cut of the post-treasury amount when a referrer is attributed,
/// then the full remainder to the recipient. Transitions the auction to
/// FeeSettled. At most once per auction; callers gate on the status machine
/// before invoking.
pub fn execute_settlement<'info>(
    config: &mut Account<'info, ModuleConfig>,
    auction: &mut Account<'info, Auction>,
    winner_record: &Account<'info, BidderRecord>,
    escrow_token: &Account<'info, TokenAccount>,
    treasury_token: &Account<'info, TokenAccount>,
    referrer_token: &Account<'info, TokenAccount>,
    recipient_token: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    let gross = auction.winning_bid;
    let referral_applies = winner_record.referrer != auction.seller;
    let split = compute_fee_split(
        gross,
        config.treasury_fee_bps,
        auction.referral_fee_bps,
        referral_applies,
    )?;

    if split.referrer > 0 {
        require!(
            referrer_token.owner == winner_record.referrer,
            AuctionError::InvalidReferrerAccount
        );
    }

    let seller = auction.seller;
    let item_id_bytes = auction.item_id.to_le_bytes();
    let bump = auction.bump;
    let seeds: &[&[u8]] = &[b"auction", seller.as_ref(), &item_id_bytes, &[bump]];
    let signer = &[seeds];
    let authority = auction.to_account_info();

    if split.treasury > 0 {
        transfer_tokens_with_signer(
            escrow_token,
            treasury_token,
            &authority,
            token_program,
            split.treasury,
            signer,
        )?;
    }
    if split.referrer > 0 {
        transfer_tokens_with_signer(
            escrow_token,
            referrer_token,
            &authority,
            token_program,
            split.referrer,
            signer,
        )?;
    }
    if split.recipient > 0 {
        transfer_tokens_with_signer(
            escrow_token,
            recipient_token,
            &authority,
            token_program,
            split.recipient,
            signer,
        )?;
    }

    auction.status = AuctionStatus::FeeSettled;
    config.total_volume = config
        .total_volume
        .checked_add(gross)
        .ok_or(AuctionError::MathOverflow)?;
    config.total_fees_collected = config
        .total_fees_collected
        .checked_add(split.treasury)
        .ok_or(AuctionError::MathOverflow)?;

    emit!(FeesSettled {
        auction: auction.key(),
        gross,
        treasury_fee: split.treasury,
        referral_fee: split.referrer,
        recipient_amount: split.recipient,
    });

    Ok(())
}
