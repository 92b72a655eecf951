use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::sysvar;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::AuctionError;
use crate::events::{BidPlaced, BidRefunded};
use crate::instructions::utils;
use crate::state::{Auction, BidderRecord, ModuleConfig, SignerNonce};

/// Delegated bid: the bidder signs an off-chain intent over
/// (auction, amount, referrer, nonce, deadline) and anyone may relay it. The
/// transaction must carry an ed25519-program verification instruction
/// immediately before this one, and the bidder must have delegated the bid
/// amount on their token account to the auction PDA.
#[derive(Accounts)]
pub struct PlaceBidWithSig<'info> {
    #[account(mut)]
    pub relayer: Signer<'info>,

    /// CHECK: the bid intent signer; verified against the ed25519 instruction
    pub bidder: UncheckedAccount<'info>,

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
        payer = relayer,
        space = 8 + BidderRecord::INIT_SPACE,
        seeds = [b"bidder", auction.key().as_ref(), bidder.key().as_ref()],
        bump
    )]
    pub bidder_record: Account<'info, BidderRecord>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + SignerNonce::INIT_SPACE,
        seeds = [b"nonce", bidder.key().as_ref()],
        bump
    )]
    pub signer_nonce: Account<'info, SignerNonce>,

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

    /// CHECK: address-constrained to the instructions sysvar
    #[account(address = sysvar::instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<PlaceBidWithSig>,
    amount: u64,
    referrer: Pubkey,
    nonce: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let auction_key = ctx.accounts.auction.key();
    let bidder_key = ctx.accounts.bidder.key();

    // The instruction right before this one must be an ed25519 verification
    // of the bid intent, signed by the bidder
    let sysvar_info = ctx.accounts.instructions_sysvar.to_account_info();
    let current_index = load_current_index_checked(&sysvar_info)
        .map_err(|_| error!(AuctionError::SignatureInvalid))? as usize;
    require!(current_index > 0, AuctionError::SignatureInvalid);
    let verification = load_instruction_at_checked(current_index - 1, &sysvar_info)
        .map_err(|_| error!(AuctionError::SignatureInvalid))?;
    require!(
        verification.program_id == ed25519_program::ID,
        AuctionError::SignatureInvalid
    );
    let (signer, message) = utils::parse_ed25519_verification(&verification.data)?;
    require!(signer == bidder_key, AuctionError::SignatureInvalid);
    let expected = utils::bid_intent_message(&auction_key, amount, &referrer, nonce, deadline);
    require!(
        message == expected.as_slice(),
        AuctionError::SignatureInvalid
    );

    // Consume the nonce; a replayed intent can never reach the bid path
    let nonce_bump = *ctx.bumps.get("signer_nonce").unwrap();
    utils::consume_nonce(&mut ctx.accounts.signer_nonce, bidder_key, nonce, nonce_bump)?;
    require!(deadline >= now, AuctionError::SignatureExpired);

    // The escrow pull runs under the auction PDA as token delegate
    match ctx.accounts.bidder_token.delegate {
        COption::Some(delegate) if delegate == auction_key => {}
        _ => return err!(AuctionError::InvalidDelegation),
    }
    require!(
        ctx.accounts.bidder_token.delegated_amount >= amount,
        AuctionError::InvalidDelegation
    );

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

    let seller = ctx.accounts.auction.seller;
    let item_id_bytes = ctx.accounts.auction.item_id.to_le_bytes();
    let bump = ctx.accounts.auction.bump;
    let seeds: &[&[u8]] = &[b"auction", seller.as_ref(), &item_id_bytes, &[bump]];
    let signer_seeds = &[seeds];
    let authority = ctx.accounts.auction.to_account_info();

    if ctx.accounts.auction.has_winner() {
        let prev_winner = ctx.accounts.auction.winner;
        let prev_amount = ctx.accounts.auction.winning_bid;
        require!(
            ctx.accounts.prev_winner_token.owner == prev_winner,
            AuctionError::InvalidRefundAccount
        );

        utils::transfer_tokens_with_signer(
            &ctx.accounts.escrow_token,
            &ctx.accounts.prev_winner_token,
            &authority,
            &ctx.accounts.token_program,
            prev_amount,
            signer_seeds,
        )?;

        emit!(BidRefunded {
            auction: auction_key,
            bidder: prev_winner,
            amount: prev_amount,
        });
    }

    utils::transfer_tokens_with_signer(
        &ctx.accounts.bidder_token,
        &ctx.accounts.escrow_token,
        &authority,
        &ctx.accounts.token_program,
        amount,
        signer_seeds,
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
