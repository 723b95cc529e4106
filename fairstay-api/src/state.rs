use std::sync::Arc;

use fairstay_booking::{CartService, CheckoutService, LedgerService};
use fairstay_core::repository::PackageRepository;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub packages: Arc<dyn PackageRepository>,
    pub cart: Arc<CartService>,
    pub checkout: Arc<CheckoutService>,
    pub ledger: Arc<LedgerService>,
    pub auth: AuthConfig,
}
