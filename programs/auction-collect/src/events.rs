use anchor_lang::prelude::*;

#[event]
pub struct ModuleInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub treasury_fee_bps: u16,
    pub graph_program: Pubkey,
}

#[event]
pub struct TreasuryFeeUpdated {
    pub old_fee_bps: u16,
    pub new_fee_bps: u16,
}

#[event]
pub struct ModulePauseToggled {
    pub admin: Pubkey,
    pub is_paused: bool,
}

#[event]
pub struct CurrencyAllowed {
    pub mint: Pubkey,
}

#[event]
pub struct CurrencyRevoked {
    pub mint: Pubkey,
}

#[event]
pub struct AuctionCreated {
    pub auction: Pubkey,
    pub seller: Pubkey,
    pub item_id: u64,
    pub currency: Pubkey,
    pub reserve_price: u64,
    pub available_from: i64,
    pub duration: u32,
}

#[event]
pub struct BidPlaced {
    pub auction: Pubkey,
    pub bidder: Pubkey,
    /// First-touch referrer recorded for this bidder; equals the seller when
    /// no referral applies.
    pub referrer: Pubkey,
    pub amount: u64,
    pub end_time: i64,
}

#[event]
pub struct BidRefunded {
    pub auction: Pubkey,
    pub bidder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct FeesSettled {
    pub auction: Pubkey,
    pub gross: u64,
    pub treasury_fee: u64,
    pub referral_fee: u64,
    pub recipient_amount: u64,
}

#[event]
pub struct CollectionFinalized {
    pub auction: Pubkey,
    pub winner: Pubkey,
    pub referrer: Pubkey,
    pub winning_bid: u64,
}
