use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("FeeLyewXG3AajQ3db6LMQULdpeiJDKYYWSf36N1ijBBN");

#[program]
pub mod fee_collect {
    use super::*;

    /// Initialize the module with admin, treasury and graph-program settings
    pub fn initialize_module(ctx: Context<InitializeModule>, treasury_fee_bps: u16) -> Result<()> {
        instructions::admin::initialize_module(ctx, treasury_fee_bps)
    }

    /// Update the treasury fee rate (admin only)
    pub fn set_treasury_fee(ctx: Context<SetTreasuryFee>, new_fee_bps: u16) -> Result<()> {
        instructions::admin::set_treasury_fee(ctx, new_fee_bps)
    }

    /// Emergency pause: blocks item creation and collects (admin only)
    pub fn pause_module(ctx: Context<SetPause>) -> Result<()> {
        instructions::admin::pause_module(ctx)
    }

    /// Lift an emergency pause (admin only)
    pub fn unpause_module(ctx: Context<SetPause>) -> Result<()> {
        instructions::admin::unpause_module(ctx)
    }

    /// Whitelist a currency mint for new collect items (admin only)
    pub fn allow_currency(ctx: Context<AllowCurrency>) -> Result<()> {
        instructions::admin::allow_currency(ctx)
    }

    /// Remove a currency mint from the whitelist (admin only)
    pub fn revoke_currency(ctx: Context<RevokeCurrency>) -> Result<()> {
        instructions::admin::revoke_currency(ctx)
    }

    /// Create a fee-gated collect item with a fixed price and recipient
    /// split table
    pub fn create_collect(
        ctx: Context<CreateCollect>,
        item_id: u64,
        params: CreateCollectParams,
    ) -> Result<()> {
        instructions::create_collect::handler(ctx, item_id, params)
    }

    /// Pay for and perform a collect; recipient token accounts are passed
    /// as remaining accounts in split-table order
    pub fn process_collect<'info>(
        ctx: Context<'_, '_, '_, 'info, ProcessCollect<'info>>,
        referrer: Pubkey,
    ) -> Result<()> {
        instructions::process_collect::handler(ctx, referrer)
    }
}
