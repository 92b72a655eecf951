use anchor_lang::prelude::*;

use crate::errors::AuctionError;
use crate::events::ModulePauseToggled;
use crate::state::ModuleConfig;

#[derive(Accounts)]
pub struct UnpauseModule<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ AuctionError::UnauthorizedAdmin,
        constraint = config.is_paused @ AuctionError::ModuleNotPaused
    )]
    pub config: Account<'info, ModuleConfig>,
}

pub fn handler(ctx: Context<UnpauseModule>) -> Result<()> {
    ctx.accounts.config.is_paused = false;

    emit!(ModulePauseToggled {
        admin: ctx.accounts.admin.key(),
        is_paused: false,
    });

    Ok(())
}
