use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::errors::AuctionError;
use crate::events::CurrencyAllowed;
use crate::state::{AllowedCurrency, ModuleConfig};

#[derive(Accounts)]
pub struct AllowCurrency<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ AuctionError::UnauthorizedAdmin
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        init,
        payer = admin,
        space = 8 + AllowedCurrency::INIT_SPACE,
        seeds = [b"currency", mint.key().as_ref()],
        bump
    )]
    pub allowed_currency: Account<'info, AllowedCurrency>,

    pub mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<AllowCurrency>) -> Result<()> {
    let allowed = &mut ctx.accounts.allowed_currency;
    allowed.mint = ctx.accounts.mint.key();
    allowed.bump = *ctx.bumps.get("allowed_currency").unwrap();

    emit!(CurrencyAllowed {
        mint: allowed.mint,
    });

    Ok(())
}
