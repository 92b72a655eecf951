use anchor_lang::prelude::*;

#[error_code]
pub enum AuctionError {
    // Configuration errors
    #[msg("Invalid auction configuration")]
    InvalidConfig,
    #[msg("Invalid fee percentage (max 10000 bps)")]
    InvalidFeePercentage,
    #[msg("Currency is not on the allowed list")]
    CurrencyNotAllowed,

    // Timing errors
    #[msg("Auction is not open for bids")]
    AuctionNotOpen,
    #[msg("Auction is still open")]
    AuctionStillOpen,

    // Bid errors
    #[msg("Bid too low")]
    BidTooLow,
    #[msg("Seller cannot bid on own auction")]
    SelfBidNotAllowed,
    #[msg("Bidder does not follow the seller as of auction start")]
    NotFollowing,
    #[msg("Refund account does not belong to the previous winner")]
    InvalidRefundAccount,
    #[msg("Bid escrow has not been delegated for this amount")]
    InvalidDelegation,

    // Settlement errors
    #[msg("Fees already processed for this auction")]
    FeeAlreadyProcessed,
    #[msg("Auction already collected")]
    AlreadyCollected,
    #[msg("Claimant does not match the recorded winner")]
    WinnerMismatch,
    #[msg("Claimed referrer does not match the recorded referrer")]
    ReferrerMismatch,
    #[msg("Referrer token account does not belong to the recorded referrer")]
    InvalidReferrerAccount,

    // Delegated bid authorization errors
    #[msg("Signature verification failed")]
    SignatureInvalid,
    #[msg("Signed bid intent has expired")]
    SignatureExpired,

    // Module management errors
    #[msg("Module is paused")]
    ModulePaused,
    #[msg("Module is not paused")]
    ModuleNotPaused,
    #[msg("Unauthorized admin")]
    UnauthorizedAdmin,

    // Arithmetic errors
    #[msg("Math overflow")]
    MathOverflow,
}
