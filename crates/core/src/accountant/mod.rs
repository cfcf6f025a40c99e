//! Accountant module - the query surface over one position.

mod accountant_model;
mod accountant_service;
mod accountant_traits;


pub use accountant_model::StockConfig;
pub use accountant_service::DividendAccountant;
pub use accountant_traits::AccountantServiceTrait;
