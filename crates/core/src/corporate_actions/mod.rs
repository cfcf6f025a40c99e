//! Corporate actions module - stock splits and lot conventions.

mod corporate_action_policy;
mod split_model;


pub use corporate_action_policy::{CorporateActionPolicy, LotAdjustment};
pub use split_model::SplitEvent;
