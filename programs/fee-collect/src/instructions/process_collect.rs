use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::CollectError;
use crate::events::Collected;
use crate::instructions::utils;
use crate::state::{CollectConfig, ModuleConfig};

/// A collect payment. The collector pays directly from their own token
/// account, so no escrow is involved; recipient token accounts arrive as
/// remaining accounts in the order the splits were configured.
#[derive(Accounts)]
pub struct ProcessCollect<'info> {
    pub collector: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = !config.is_paused @ CollectError::ModulePaused
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        mut,
        seeds = [b"collect", collect.seller.as_ref(), &collect.item_id.to_le_bytes()],
        bump = collect.bump
    )]
    pub collect: Account<'info, CollectConfig>,

    #[account(
        mut,
        constraint = collector_token.owner == collector.key(),
        constraint = collector_token.mint == collect.currency
    )]
    pub collector_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_token.owner == config.treasury,
        constraint = treasury_token.mint == collect.currency
    )]
    pub treasury_token: Account<'info, TokenAccount>,

    /// Token account of the claimed referrer; its owner is validated in the
    /// handler when a referral cut is due
    #[account(
        mut,
        constraint = referrer_token.mint == collect.currency
    )]
    pub referrer_token: Account<'info, TokenAccount>,

    /// CHECK: follow record owned by the configured graph program; read and
    /// validated in the handler when the item is follower-gated
    pub follow_record: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ProcessCollect<'info>>,
    referrer: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.collect.ensure_collectible(now)?;

    // this family checks the relationship at collect time, not at creation
    if ctx.accounts.collect.follower_only {
        utils::check_follow_record(
            &ctx.accounts.follow_record,
            &ctx.accounts.config.graph_program,
            &ctx.accounts.collect.seller,
            &ctx.accounts.collector.key(),
            now,
        )?;
    }

    let collect = &ctx.accounts.collect;
    let referral_applies = referrer != collect.seller;
    let split = utils::compute_collect_split(
        collect.amount,
        ctx.accounts.config.treasury_fee_bps,
        collect.referral_fee_bps,
        referral_applies,
    )?;
    let amounts = utils::recipient_amounts(split.adjusted, &collect.recipients)?;

    require!(
        ctx.remaining_accounts.len() == collect.recipients.len(),
        CollectError::InvalidRecipientAccounts
    );

    if split.treasury > 0 {
        let treasury_info = ctx.accounts.treasury_token.to_account_info();
        utils::pay(
            &ctx.accounts.collector_token,
            &treasury_info,
            &ctx.accounts.collector,
            &ctx.accounts.token_program,
            split.treasury,
        )?;
    }

    if split.referrer > 0 {
        require!(
            ctx.accounts.referrer_token.owner == referrer,
            CollectError::InvalidReferrerAccount
        );
        let referrer_info = ctx.accounts.referrer_token.to_account_info();
        utils::pay(
            &ctx.accounts.collector_token,
            &referrer_info,
            &ctx.accounts.collector,
            &ctx.accounts.token_program,
            split.referrer,
        )?;
    }

    let shares = ctx.accounts.collect.recipients.clone();
    for ((share, amount), info) in shares
        .iter()
        .zip(amounts.iter())
        .zip(ctx.remaining_accounts.iter())
    {
        let token_account = Account::<TokenAccount>::try_from(info)
            .map_err(|_| error!(CollectError::InvalidRecipientAccounts))?;
        require!(
            token_account.owner == share.recipient
                && token_account.mint == ctx.accounts.collect.currency,
            CollectError::InvalidRecipientAccounts
        );
        if *amount > 0 {
            utils::pay(
                &ctx.accounts.collector_token,
                info,
                &ctx.accounts.collector,
                &ctx.accounts.token_program,
                *amount,
            )?;
        }
    }

    let collect = &mut ctx.accounts.collect;
    collect.current_collects = collect
        .current_collects
        .checked_add(1)
        .ok_or(CollectError::MathOverflow)?;

    let config = &mut ctx.accounts.config;
    config.total_volume = config
        .total_volume
        .checked_add(collect.amount)
        .ok_or(CollectError::MathOverflow)?;
    config.total_fees_collected = config
        .total_fees_collected
        .checked_add(split.treasury)
        .ok_or(CollectError::MathOverflow)?;

    emit!(Collected {
        collect: collect.key(),
        collector: ctx.accounts.collector.key(),
        referrer,
        amount: collect.amount,
        treasury_fee: split.treasury,
        referral_fee: split.referrer,
        collect_number: collect.current_collects,
    });

    Ok(())
}
