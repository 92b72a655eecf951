use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::errors::CollectError;
use crate::events::CollectCreated;
use crate::instructions::utils;
use crate::state::{CollectConfig, ModuleConfig, RecipientShare};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateCollectParams {
    /// Price per collect; zero makes the item free to collect
    pub amount: u64,
    pub referral_fee_bps: u16,
    pub follower_only: bool,
    /// Maximum number of collects, zero for unlimited
    pub collect_limit: u64,
    /// Unix timestamp after which collects are rejected, zero for no expiry
    pub end_timestamp: i64,
    pub recipients: Vec<RecipientShare>,
}

#[derive(Accounts)]
#[instruction(item_id: u64)]
pub struct CreateCollect<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = !config.is_paused @ CollectError::ModulePaused
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        init,
        payer = seller,
        space = 8 + CollectConfig::INIT_SPACE,
        seeds = [b"collect", seller.key().as_ref(), &item_id.to_le_bytes()],
        bump
    )]
    pub collect: Account<'info, CollectConfig>,

    /// CHECK: currency whitelist PDA; seeds pin the address, existence is
    /// validated in the handler so a missing entry is CurrencyNotAllowed
    #[account(
        seeds = [b"currency", currency_mint.key().as_ref()],
        bump
    )]
    pub allowed_currency: UncheckedAccount<'info>,

    pub currency_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateCollect>, item_id: u64, params: CreateCollectParams) -> Result<()> {
    utils::ensure_currency_allowed(&ctx.accounts.allowed_currency, ctx.program_id)?;
    require!(
        params.referral_fee_bps <= 10_000,
        CollectError::InvalidFeePercentage
    );
    if params.end_timestamp != 0 {
        let now = Clock::get()?.unix_timestamp;
        require!(params.end_timestamp > now, CollectError::InvalidConfig);
    }
    utils::validate_recipient_shares(&params.recipients)?;

    let collect = &mut ctx.accounts.collect;
    collect.seller = ctx.accounts.seller.key();
    collect.item_id = item_id;
    collect.amount = params.amount;
    collect.currency = ctx.accounts.currency_mint.key();
    collect.referral_fee_bps = params.referral_fee_bps;
    collect.follower_only = params.follower_only;
    collect.collect_limit = params.collect_limit;
    collect.current_collects = 0;
    collect.end_timestamp = params.end_timestamp;
    collect.recipients = params.recipients;
    collect.bump = *ctx.bumps.get("collect").unwrap();

    emit!(CollectCreated {
        collect: collect.key(),
        seller: collect.seller,
        item_id,
        currency: collect.currency,
        amount: collect.amount,
        recipient_count: collect.recipients.len() as u8,
    });

    Ok(())
}
