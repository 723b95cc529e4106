pub mod cart;
pub mod checkout;
pub mod error;
pub mod ledger;

pub use cart::{CartLine, CartService, CartSummary};
pub use checkout::{BookingDetails, CheckoutService};
pub use error::BookingError;
pub use ledger::{LedgerService, NewTransaction};
