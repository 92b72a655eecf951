pub mod admin;
pub mod create_collect;
pub mod process_collect;
pub mod utils;

pub use admin::*;
pub use create_collect::*;
pub use process_collect::*;
