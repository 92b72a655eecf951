use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("AucL6ERva8NAEsbWFcnjor55dL7XSxJT6SzBypQbEh3g");

#[program]
pub mod auction_collect {
    use super::*;

    /// Initialize the module with admin, treasury and graph-program settings
    pub fn initialize_module(ctx: Context<InitializeModule>, treasury_fee_bps: u16) -> Result<()> {
        instructions::initialize_module::handler(ctx, treasury_fee_bps)
    }

    /// Update the treasury fee rate (admin only)
    pub fn set_treasury_fee(ctx: Context<SetTreasuryFee>, new_fee_bps: u16) -> Result<()> {
        instructions::set_treasury_fee::handler(ctx, new_fee_bps)
    }

    /// Emergency pause: blocks auction creation and bidding (admin only)
    pub fn pause_module(ctx: Context<PauseModule>) -> Result<()> {
        instructions::pause_module::handler(ctx)
    }

    /// Lift an emergency pause (admin only)
    pub fn unpause_module(ctx: Context<UnpauseModule>) -> Result<()> {
        instructions::unpause_module::handler(ctx)
    }

    /// Whitelist a currency mint for new auctions (admin only)
    pub fn allow_currency(ctx: Context<AllowCurrency>) -> Result<()> {
        instructions::allow_currency::handler(ctx)
    }

    /// Remove a currency mint from the whitelist (admin only)
    pub fn revoke_currency(ctx: Context<RevokeCurrency>) -> Result<()> {
        instructions::revoke_currency::handler(ctx)
    }

    /// Create the auction record and bid escrow for an item
    pub fn create_auction(
        ctx: Context<CreateAuction>,
        item_id: u64,
        params: CreateAuctionParams,
    ) -> Result<()> {
        instructions::create_auction::handler(ctx, item_id, params)
    }

    /// Place a bid; opens the window on the first bid and applies the
    /// anti-snipe extension on later ones
    pub fn place_bid(ctx: Context<PlaceBid>, amount: u64, referrer: Pubkey) -> Result<()> {
        instructions::place_bid::handler(ctx, amount, referrer)
    }

    /// Relay a bid signed off-chain by the bidder (nonce + deadline bound)
    pub fn place_bid_with_sig(
        ctx: Context<PlaceBidWithSig>,
        amount: u64,
        referrer: Pubkey,
        nonce: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::place_bid_with_sig::handler(ctx, amount, referrer, nonce, deadline)
    }

    /// Distribute the winning bid once the window closed (permissionless)
    pub fn settle_fees(ctx: Context<SettleFees>) -> Result<()> {
        instructions::settle_fees::handler(ctx)
    }

    /// Winner's claim: verifies winner/referrer, settles fees if needed and
    /// closes out the auction
    pub fn finalize_collection(
        ctx: Context<FinalizeCollection>,
        claimed_referrer: Pubkey,
    ) -> Result<()> {
        instructions::finalize_collection::handler(ctx, claimed_referrer)
    }
}
