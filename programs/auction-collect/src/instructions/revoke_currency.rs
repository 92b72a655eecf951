use anchor_lang::prelude::*;

use crate::errors::AuctionError;
use crate::events::CurrencyRevoked;
use crate::state::{AllowedCurrency, ModuleConfig};

#[derive(Accounts)]
pub struct RevokeCurrency<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ AuctionError::UnauthorizedAdmin
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        mut,
        close = admin,
        seeds = [b"currency", allowed_currency.mint.as_ref()],
        bump = allowed_currency.bump
    )]
    pub allowed_currency: Account<'info, AllowedCurrency>,
}

pub fn handler(ctx: Context<RevokeCurrency>) -> Result<()> {
    emit!(CurrencyRevoked {
        mint: ctx.accounts.allowed_currency.mint,
    });

    Ok(())
}
