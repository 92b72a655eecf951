use anchor_lang::prelude::*;

use crate::errors::AuctionError;

/// Per-item auction record.
/// Seeds: [b"auction", seller, item_id le bytes]
#[account]
#[derive(InitSpace)]
pub struct Auction {
    /// Item owner; also the "no referral" sentinel for referrer attribution
    pub seller: Pubkey,
    pub item_id: u64,
    /// Currency mint used for every transfer in this auction
    pub currency: Pubkey,
    /// Payee of the settlement proceeds after fees
    pub recipient: Pubkey,
    /// No bid is accepted before this timestamp
    pub available_from: i64,
    /// Seconds added to the end time by the first bid
    pub duration: u32,
    /// Minimum seconds that must remain between a bid and the end time;
    /// bids inside this window push the end time forward
    pub min_extension: u32,
    /// Minimum accepted amount for the first bid
    pub reserve_price: u64,
    /// Minimum amount a new bid must exceed the winning bid by (0 = any higher)
    pub min_increment: u64,
    /// Referral fee in basis points of the post-treasury amount
    pub referral_fee_bps: u16,
    pub restricted_to_followers: bool,
    /// Timestamp of the first bid (0 until the window opens)
    pub started_at: i64,
    /// Unix timestamp when bidding closes (0 until the first bid, extended on anti-snipe)
    pub end_time: i64,
    /// Current best bidder, Pubkey::default() if no bids
    pub winner: Pubkey,
    /// Current best amount, 0 if no bids
    pub winning_bid: u64,
    pub status: AuctionStatus,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum AuctionStatus {
    /// Record created, no bid placed yet
    Created,
    /// First bid accepted, window running or elapsed
    Open,
    /// Fees distributed, item not yet claimed by the winner
    FeeSettled,
    /// Winner claimed the item; terminal
    Collected,
}

impl Auction {
    pub fn has_winner(&self) -> bool {
        self.winner != Pubkey::default()
    }

    /// The timestamp follower relationships are evaluated against. Once the
    /// window is open this is the auction-start snapshot, so relationship
    /// changes mid-auction cannot invalidate legitimate late bids.
    pub fn follow_snapshot_time(&self, now: i64) -> i64 {
        if self.started_at > 0 {
            self.started_at
        } else {
            now
        }
    }

    /// Timing gate for a new bid: not before `available_from`, and once a bid
    /// exists not after `end_time`. Terminal statuses never accept bids.
    pub fn ensure_biddable(&self, now: i64) -> Result<()> {
        require!(
            matches!(self.status, AuctionStatus::Created | AuctionStatus::Open),
            AuctionError::AuctionNotOpen
        );
        require!(now >= self.available_from, AuctionError::AuctionNotOpen);
        if self.has_winner() {
            require!(now <= self.end_time, AuctionError::AuctionNotOpen);
        }
        Ok(())
    }

    /// Gate for permissionless fee settlement: a bid must exist, the window
    /// must have elapsed, and fees must not have been processed before.
    pub fn ensure_settleable(&self, now: i64) -> Result<()> {
        match self.status {
            AuctionStatus::Created => err!(AuctionError::AuctionStillOpen),
            AuctionStatus::FeeSettled | AuctionStatus::Collected => {
                err!(AuctionError::FeeAlreadyProcessed)
            }
            AuctionStatus::Open => {
                require!(now > self.end_time, AuctionError::AuctionStillOpen);
                Ok(())
            }
        }
    }

    /// Gate for the winner's claim: at most once, only after the window closed.
    pub fn ensure_claimable(&self, now: i64) -> Result<()> {
        require!(
            self.status != AuctionStatus::Collected,
            AuctionError::AlreadyCollected
        );
        require!(self.has_winner(), AuctionError::AuctionStillOpen);
        require!(now > self.end_time, AuctionError::AuctionStillOpen);
        Ok(())
    }
}

/// Per-bidder state within one auction. The referrer is first-touch
/// attribution: written on the bidder's first bid and immutable thereafter.
/// Seeds: [b"bidder", auction, bidder]
#[account]
#[derive(InitSpace)]
pub struct BidderRecord {
    pub auction: Pubkey,
    pub bidder: Pubkey,
    /// Referrer credited for this bidder; the seller key means "no referral"
    pub referrer: Pubkey,
    pub bid_count: u32,
    pub bump: u8,
}

/// Strictly incrementing replay-protection counter, global per signer.
/// Seeds: [b"nonce", authority]
#[account]
#[derive(InitSpace)]
pub struct SignerNonce {
    pub authority: Pubkey,
    pub nonce: u64,
    pub bump: u8,
}
