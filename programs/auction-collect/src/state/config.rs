use anchor_lang::prelude::*;

/// Singleton module configuration.
/// Seeds: [b"config"]
#[account]
#[derive(InitSpace)]
pub struct ModuleConfig {
    pub admin: Pubkey,
    /// Receiver of the protocol treasury cut
    pub treasury: Pubkey,
    /// Treasury fee in basis points (100 = 1%), read at settlement time
    pub treasury_fee_bps: u16,
    /// Program trusted to own follow records for follower-gated auctions
    pub graph_program: Pubkey,
    pub is_paused: bool,
    pub total_volume: u64,
    pub total_fees_collected: u64,
    pub bump: u8,
}

/// Existence of this record whitelists a currency mint.
/// Seeds: [b"currency", mint]
#[account]
#[derive(InitSpace)]
pub struct AllowedCurrency {
    pub mint: Pubkey,
    pub bump: u8,
}
