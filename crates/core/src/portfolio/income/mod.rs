//! Income module - dividend payments attributed to a position.

mod payment_attributor;
mod payment_model;


pub use payment_attributor::PaymentAttributor;
pub use payment_model::Payment;
