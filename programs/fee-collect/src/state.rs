use anchor_lang::prelude::*;

use crate::errors::CollectError;

/// Hard cap on configured payout recipients per collect item.
pub const MAX_RECIPIENTS: usize = 5;

#[account]
#[derive(InitSpace)]
pub struct ModuleConfig {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub treasury_fee_bps: u16,
    /// Program trusted to own follow records for follower-gated items
    pub graph_program: Pubkey,
    pub is_paused: bool,
    pub total_volume: u64,
    pub total_fees_collected: u64,
    pub bump: u8,
}

/// Whitelist marker for a payment mint. Existence of the PDA is the whole
/// check.
#[account]
#[derive(InitSpace)]
pub struct AllowedCurrency {
    pub mint: Pubkey,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace)]
pub struct RecipientShare {
    pub recipient: Pubkey,
    pub split_bps: u16,
}

/// Per-item collect record. Price and split configuration are fixed at
/// creation; only the running collect counter mutates afterwards.
#[account]
#[derive(InitSpace)]
pub struct CollectConfig {
    pub seller: Pubkey,
    pub item_id: u64,
    /// Price per collect; zero means a free (but still gated) collect
    pub amount: u64,
    pub currency: Pubkey,
    pub referral_fee_bps: u16,
    pub follower_only: bool,
    /// Maximum number of collects, zero for unlimited
    pub collect_limit: u64,
    pub current_collects: u64,
    /// Unix timestamp after which collects are rejected, zero for no expiry
    pub end_timestamp: i64,
    // keep in sync with MAX_RECIPIENTS
    #[max_len(5)]
    pub recipients: Vec<RecipientShare>,
    pub bump: u8,
}

impl CollectConfig {
    pub fn ensure_collectible(&self, now: i64) -> Result<()> {
        if self.end_timestamp != 0 {
            require!(now <= self.end_timestamp, CollectError::CollectExpired);
        }
        if self.collect_limit != 0 {
            require!(
                self.current_collects < self.collect_limit,
                CollectError::CollectLimitExceeded
            );
        }
        Ok(())
    }
}
