use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::instructions::utils;
use crate::state::{Auction, BidderRecord, ModuleConfig};

/// Permissionless fee settlement once the bidding window has closed. The
/// winner's ultimate claim may never happen, so fee distribution is callable
/// by anyone, independently of collection.
#[derive(Accounts)]
pub struct SettleFees<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        mut,
        seeds = [b"auction", auction.seller.as_ref(), &auction.item_id.to_le_bytes()],
        bump = auction.bump
    )]
    pub auction: Account<'info, Auction>,

    #[account(
        seeds = [b"bidder", auction.key().as_ref(), auction.winner.as_ref()],
        bump = winner_record.bump
    )]
    pub winner_record: Account<'info, BidderRecord>,

    #[account(
        mut,
        associated_token::mint = currency_mint,
        associated_token::authority = auction,
    )]
    pub escrow_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_token.owner == config.treasury,
        constraint = treasury_token.mint == auction.currency
    )]
    pub treasury_token: Account<'info, TokenAccount>,

    /// Token account of the winner's recorded referrer; its owner is
    /// validated during settlement when a referral cut is due
    #[account(
        mut,
        constraint = referrer_token.mint == auction.currency
    )]
    pub referrer_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient_token.owner == auction.recipient,
        constraint = recipient_token.mint == auction.currency
    )]
    pub recipient_token: Account<'info, TokenAccount>,

    #[account(address = auction.currency)]
    pub currency_mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<SettleFees>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.auction.ensure_settleable(now)?;

    utils::execute_settlement(
        &mut ctx.accounts.config,
        &mut ctx.accounts.auction,
        &ctx.accounts.winner_record,
        &ctx.accounts.escrow_token,
        &ctx.accounts.treasury_token,
        &ctx.accounts.referrer_token,
        &ctx.accounts.recipient_token,
        &ctx.accounts.token_program,
    )
}
