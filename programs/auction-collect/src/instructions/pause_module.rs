use anchor_lang::prelude::*;

use crate::errors::AuctionError;
use crate::events::ModulePauseToggled;
use crate::state::ModuleConfig;

#[derive(Accounts)]
pub struct PauseModule<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ AuctionError::UnauthorizedAdmin,
        constraint = !config.is_paused @ AuctionError::ModulePaused
    )]
    pub config: Account<'info, ModuleConfig>,
}

pub fn handler(ctx: Context<PauseModule>) -> Result<()> {
    ctx.accounts.config.is_paused = true;

    emit!(ModulePauseToggled {
        admin: ctx.accounts.admin.key(),
        is_paused: true,
    });

    Ok(())
}
