//! Position module - share balance replay over the trade ledger.

mod position_tracker;
mod share_balance;


pub use position_tracker::PositionTracker;
pub use share_balance::ShareBalance;
