use anchor_lang::prelude::*;

use crate::errors::AuctionError;
use crate::events::ModuleInitialized;
use crate::state::ModuleConfig;

#[derive(Accounts)]
pub struct InitializeModule<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + ModuleConfig::INIT_SPACE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, ModuleConfig>,

    /// CHECK: receiver of the treasury cut, stored as-is
    pub treasury: UncheckedAccount<'info>,

    /// CHECK: program trusted to own follow records, stored as-is
    pub graph_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeModule>, treasury_fee_bps: u16) -> Result<()> {
    require!(treasury_fee_bps <= 10_000, AuctionError::InvalidFeePercentage);

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.treasury = ctx.accounts.treasury.key();
    config.treasury_fee_bps = treasury_fee_bps;
    config.graph_program = ctx.accounts.graph_program.key();
    config.is_paused = false;
    config.total_volume = 0;
    config.total_fees_collected = 0;
    config.bump = *ctx.bumps.get("config").unwrap();

    emit!(ModuleInitialized {
        admin: config.admin,
        treasury: config.treasury,
        treasury_fee_bps,
        graph_program: config.graph_program,
    });

    Ok(())
}
