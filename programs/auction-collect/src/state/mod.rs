pub mod auction;
pub mod config;

pub use auction::*;
pub use config::*;
