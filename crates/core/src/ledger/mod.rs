//! Ledger module - broker trade records for one account.

mod ledger_model;
mod trade_ledger;


pub use ledger_model::{
    TradeDirection, TradeRecord, LOCALIZED_BUY_LABEL, LOCALIZED_SELL_LABEL,
};
pub use trade_ledger::TradeLedger;
