use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::AuctionError;
use crate::events::AuctionCreated;
use crate::instructions::utils;
use crate::state::{Auction, AuctionStatus, ModuleConfig};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateAuctionParams {
    pub available_from: i64,
    pub duration: u32,
    pub min_extension: u32,
    pub reserve_price: u64,
    pub min_increment: u64,
    pub referral_fee_bps: u16,
    pub restricted_to_followers: bool,
}

#[derive(Accounts)]
#[instruction(item_id: u64)]
pub struct CreateAuction<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        constraint = !config.is_paused @ AuctionError::ModulePaused
    )]
    pub config: Account<'info, ModuleConfig>,

    #[account(
        init,
        payer = seller,
        space = 8 + Auction::INIT_SPACE,
        seeds = [b"auction", seller.key().as_ref(), &item_id.to_le_bytes()],
        bump
    )]
    pub auction: Account<'info, Auction>,

    /// CHECK: currency whitelist PDA; seeds pin the address, existence is
    /// validated in the handler so a missing entry is CurrencyNotAllowed
    #[account(
        seeds = [b"currency", currency_mint.key().as_ref()],
        bump
    )]
    pub allowed_currency: UncheckedAccount<'info>,

    pub currency_mint: Account<'info, Mint>,

    /// Escrow for bid funds, owned by the auction PDA
    #[account(
        init,
        payer = seller,
        associated_token::mint = currency_mint,
        associated_token::authority = auction,
    )]
    pub escrow_token: Account<'info, TokenAccount>,

    /// CHECK: payee of the settlement proceeds, stored as-is
    pub recipient: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateAuction>, item_id: u64, params: CreateAuctionParams) -> Result<()> {
    utils::ensure_currency_allowed(&ctx.accounts.allowed_currency, ctx.program_id)?;
    require!(params.duration > 0, AuctionError::InvalidConfig);
    require!(
        params.duration >= params.min_extension,
        AuctionError::InvalidConfig
    );
    require!(
        params.referral_fee_bps <= 10_000,
        AuctionError::InvalidFeePercentage
    );

    let auction = &mut ctx.accounts.auction;
    auction.seller = ctx.accounts.seller.key();
    auction.item_id = item_id;
    auction.currency = ctx.accounts.currency_mint.key();
    auction.recipient = ctx.accounts.recipient.key();
    auction.available_from = params.available_from;
    auction.duration = params.duration;
    auction.min_extension = params.min_extension;
    auction.reserve_price = params.reserve_price;
    auction.min_increment = params.min_increment;
    auction.referral_fee_bps = params.referral_fee_bps;
    auction.restricted_to_followers = params.restricted_to_followers;
    auction.started_at = 0;
    auction.end_time = 0;
    auction.winner = Pubkey::default();
    auction.winning_bid = 0;
    auction.status = AuctionStatus::Created;
    auction.bump = *ctx.bumps.get("auction").unwrap();

    emit!(AuctionCreated {
        auction: auction.key(),
        seller: auction.seller,
        item_id,
        currency: auction.currency,
        reserve_price: auction.reserve_price,
        available_from: auction.available_from,
        duration: auction.duration,
    });

    Ok(())
}
