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
pub struct CollectCreated {
    pub collect: Pubkey,
    pub seller: Pubkey,
    pub item_id: u64,
    pub currency: Pubkey,
    pub amount: u64,
    pub recipient_count: u8,
}

#[event]
pub struct Collected {
    pub collect: Pubkey,
    pub collector: Pubkey,
    /// Referrer credited for this collect; equals the seller when no
    /// referral applies.
    pub referrer: Pubkey,
    pub amount: u64,
    pub treasury_fee: u64,
    pub referral_fee: u64,
    pub collect_number: u64,
}
