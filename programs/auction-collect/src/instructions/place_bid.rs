use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::AuctionError;
use crate::events::{BidPlaced, BidRefunded};
use crate::instructions::utils;
use crate::state::{Auction, BidderRecord, ModuleConfig};

#[derive(Accounts)]
pub struct PlaceBid<'info> {
    #[account(mut)]
    pub bidder: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = !config.is_paused @ AuctionError::ModulePaused
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        mut,
        seeds = [b"auction", auction.seller.as_ref(), &auction.item_id.to_le_bytes()],
        bump = auction.bump,
        constraint = auction.seller != bidder.key() @ AuctionError::SelfBidNotAllowed
    )]
    pub auction: Account<'info, Auction>,

    #[account(
        init_if_needed,
        payer = bidder,
        space = 8 + BidderRecord::INIT_SPACE,
        seeds = [b"bidder", auction.key().as_ref(), bidder.key().as_ref()],
        bump
    )]
    pub bidder_record: Account<'info, BidderRecord>,

    #[account(
        mut,
        constraint = bidder_token.owner == bidder.key(),
        constraint = bidder_token.mint == auction.currency
    )]
    pub bidder_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = currency_mint,
        associated_token::authority = auction,
    )]
    pub escrow_token: Account<'info, TokenAccount>,

    /// Token account refunded when this bid outbids a previous winner; its
    /// owner is validated in the handler. Unused on the first bid.
    #[account(
        mut,
        constraint = prev_winner_token.mint == auction.currency
    )]
    pub prev_winner_token: Account<'info, TokenAccount>,

    #[account(address = auction.currency)]
    pub currency_mint: Account<'info, Mint>,

    /// CHECK: follow record owned by the configured graph program; only read
    /// when the auction is follower-gated
    pub follow_record: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBid>, amount: u64, referrer: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let auction_key = ctx.accounts.auction.key();
    let bidder_key = ctx.accounts.bidder.key();

    {
        let auction = &ctx.accounts.auction;
        auction.ensure_biddable(now)?;
        require!(utils::is_valid_bid(auction, amount), AuctionError::BidTooLow);
        if auction.restricted_to_followers {
            utils::check_follow_record(
                &ctx.accounts.follow_record.to_account_info(),
                &ctx.accounts.config.graph_program,
                &auction.seller,
                &bidder_key,
                auction.follow_snapshot_time(now),
            )?;
        }
    }

    // Refund the previous winner's locked amount in full before the new bid
    // replaces it
    if ctx.accounts.auction.has_winner() {
        let prev_winner = ctx.accounts.auction.winner;
        let prev_amount = ctx.accounts.auction.winning_bid;
        require!(
            ctx.accounts.prev_winner_token.owner == prev_winner,
            AuctionError::InvalidRefundAccount
        );

        let seller = ctx.accounts.auction.seller;
        let item_id_bytes = ctx.accounts.auction.item_id.to_le_bytes();
        let bump = ctx.accounts.auction.bump;
        let seeds: &[&[u8]] = &[b"auction", seller.as_ref(), &item_id_bytes, &[bump]];
        let signer = &[seeds];
        let authority = ctx.accounts.auction.to_account_info();

        utils::transfer_tokens_with_signer(
            &ctx.accounts.escrow_token,
            &ctx.accounts.prev_winner_token,
            &authority,
            &ctx.accounts.token_program,
            prev_amount,
            signer,
        )?;

        emit!(BidRefunded {
            auction: auction_key,
            bidder: prev_winner,
            amount: prev_amount,
        });
    }

    // Lock the new bid into escrow
    utils::transfer_tokens(
        &ctx.accounts.bidder_token,
        &ctx.accounts.escrow_token,
        &ctx.accounts.bidder,
        &ctx.accounts.token_program,
        amount,
    )?;

    if ctx.accounts.bidder_record.bid_count == 0 {
        ctx.accounts.bidder_record.bump = *ctx.bumps.get("bidder_record").unwrap();
    }

    let outcome = utils::apply_bid(
        &mut ctx.accounts.auction,
        &mut ctx.accounts.bidder_record,
        auction_key,
        bidder_key,
        referrer,
        amount,
        now,
    )?;

    emit!(BidPlaced {
        auction: auction_key,
        bidder: bidder_key,
        referrer: ctx.accounts.bidder_record.referrer,
        amount,
        end_time: outcome.end_time,
    });

    Ok(())
}
