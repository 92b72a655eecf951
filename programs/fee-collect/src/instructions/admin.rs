use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::errors::CollectError;
use crate::events::{
    CurrencyAllowed, CurrencyRevoked, ModuleInitialized, ModulePauseToggled, TreasuryFeeUpdated,
};
use crate::state::{AllowedCurrency, ModuleConfig};

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

pub fn initialize_module(ctx: Context<InitializeModule>, treasury_fee_bps: u16) -> Result<()> {
    require!(treasury_fee_bps <= 10_000, CollectError::InvalidFeePercentage);

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

#[derive(Accounts)]
pub struct SetTreasuryFee<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ CollectError::UnauthorizedAdmin
    )]
    pub config: Account<'info, ModuleConfig>,
}

pub fn set_treasury_fee(ctx: Context<SetTreasuryFee>, new_fee_bps: u16) -> Result<()> {
    require!(new_fee_bps <= 10_000, CollectError::InvalidFeePercentage);

    let config = &mut ctx.accounts.config;
    let old_fee_bps = config.treasury_fee_bps;
    config.treasury_fee_bps = new_fee_bps;

    emit!(TreasuryFeeUpdated {
        old_fee_bps,
        new_fee_bps,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ CollectError::UnauthorizedAdmin
    )]
    pub config: Account<'info, ModuleConfig>,
}

pub fn pause_module(ctx: Context<SetPause>) -> Result<()> {
    require!(!ctx.accounts.config.is_paused, CollectError::ModulePaused);
    ctx.accounts.config.is_paused = true;

    emit!(ModulePauseToggled {
        admin: ctx.accounts.admin.key(),
        is_paused: true,
    });

    Ok(())
}

pub fn unpause_module(ctx: Context<SetPause>) -> Result<()> {
    require!(ctx.accounts.config.is_paused, CollectError::ModuleNotPaused);
    ctx.accounts.config.is_paused = false;

    emit!(ModulePauseToggled {
        admin: ctx.accounts.admin.key(),
        is_paused: false,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AllowCurrency<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ CollectError::UnauthorizedAdmin
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

pub fn allow_currency(ctx: Context<AllowCurrency>) -> Result<()> {
    let allowed = &mut ctx.accounts.allowed_currency;
    allowed.mint = ctx.accounts.mint.key();
    allowed.bump = *ctx.bumps.get("allowed_currency").unwrap();

    emit!(CurrencyAllowed {
        mint: allowed.mint,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RevokeCurrency<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ CollectError::UnauthorizedAdmin
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

pub fn revoke_currency(ctx: Context<RevokeCurrency>) -> Result<()> {
    emit!(CurrencyRevoked {
        mint: ctx.accounts.allowed_currency.mint,
    });

    Ok(())
}
