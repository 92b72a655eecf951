pub mod allow_currency;
pub mod create_auction;
pub mod finalize_collection;
pub mod initialize_module;
pub mod pause_module;
pub mod place_bid;
pub mod place_bid_with_sig;
pub mod revoke_currency;
pub mod set_treasury_fee;
pub mod settle_fees;
pub mod unpause_module;
pub mod utils;

pub use allow_currency::*;
pub use create_auction::*;
pub use finalize_collection::*;
pub use initialize_module::*;
pub use pause_module::*;
pub use place_bid::*;
pub use place_bid_with_sig::*;
pub use revoke_currency::*;
pub use set_treasury_fee::*;
pub use settle_fees::*;
pub use unpause_module::*;
