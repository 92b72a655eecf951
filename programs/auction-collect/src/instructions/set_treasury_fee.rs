use anchor_lang::prelude::*;

use crate::errors::AuctionError;
use crate::events::TreasuryFeeUpdated;
use crate::state::ModuleConfig;

#[derive(Accounts)]
pub struct SetTreasuryFee<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ AuctionError::UnauthorizedAdmin
    )]
    pub config: Account<'info, ModuleConfig>,
}

pub fn handler(ctx: Context<SetTreasuryFee>, new_fee_bps: u16) -> Result<()> {
    require!(new_fee_bps <= 10_000, AuctionError::InvalidFeePercentage);

    let config = &mut ctx.accounts.config;
    let old_fee_bps = config.treasury_fee_bps;
    config.treasury_fee_bps = new_fee_bps;

    emit!(TreasuryFeeUpdated {
        old_fee_bps,
        new_fee_bps,
    });

    Ok(())
}
