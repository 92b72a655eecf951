use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::AuctionError;
use crate::events::CollectionFinalized;
use crate::instructions::utils;
use crate::state::{Auction, AuctionStatus, BidderRecord, ModuleConfig};

/// The winner's claim. Validates the claimant and the claimed referrer
/// against the recorded state, settles fees if they have not been settled
/// yet, and moves the auction to its terminal state.
#[derive(Accounts)]
pub struct FinalizeCollection<'info> {
    pub claimant: Signer<'info>,

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

pub fn handler(ctx: Context<FinalizeCollection>, claimed_referrer: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    require!(
        ctx.accounts.claimant.key() == ctx.accounts.auction.winner,
        AuctionError::WinnerMismatch
    );
    require!(
        claimed_referrer == ctx.accounts.winner_record.referrer,
        AuctionError::ReferrerMismatch
    );
    ctx.accounts.auction.ensure_claimable(now)?;

    // Collection may run before anyone called settle_fees; settle here so a
    // claim never leaves funds stranded in escrow
    if ctx.accounts.auction.status == AuctionStatus::Open {
        utils::execute_settlement(
            &mut ctx.accounts.config,
            &mut ctx.accounts.auction,
            &ctx.accounts.winner_record,
            &ctx.accounts.escrow_token,
            &ctx.accounts.treasury_token,
            &ctx.accounts.referrer_token,
            &ctx.accounts.recipient_token,
            &ctx.accounts.token_program,
        )?;
    }

    let auction = &mut ctx.accounts.auction;
    auction.status = AuctionStatus::Collected;

    emit!(CollectionFinalized {
        auction: auction.key(),
        winner: auction.winner,
        referrer: ctx.accounts.winner_record.referrer,
        winning_bid: auction.winning_bid,
    });

    Ok(())
}
