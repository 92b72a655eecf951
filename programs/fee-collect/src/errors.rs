use anchor_lang::prelude::*;

#[error_code]
pub enum CollectError {
    // Configuration errors
    #[msg("Invalid collect configuration")]
    InvalidConfig,
    #[msg("Invalid fee percentage (max 10000 bps)")]
    InvalidFeePercentage,
    #[msg("Recipient splits must be 1-5 entries summing to 10000 bps")]
    InvalidRecipientSplits,
    #[msg("Currency is not on the allowed list")]
    CurrencyNotAllowed,

    // Collect errors
    #[msg("Collect window has expired")]
    CollectExpired,
    #[msg("Collect limit reached")]
    CollectLimitExceeded,
    #[msg("Collector does not follow the seller")]
    NotFollowing,
    #[msg("Recipient token accounts do not match the configured splits")]
    InvalidRecipientAccounts,
    #[msg("Referrer token account does not belong to the referrer")]
    InvalidReferrerAccount,

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
