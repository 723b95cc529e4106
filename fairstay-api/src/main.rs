use std::net::SocketAddr;
use std::sync::Arc;

use fairstay_api::{
    app,
    state::{AppState, AuthConfig},
};
use fairstay_booking::{CartService, CheckoutService, LedgerService};
use fairstay_core::payment::MockPaymentAdapter;
use fairstay_core::repository::{CartRepository, PackageRepository, TransactionRepository};
use fairstay_store::{
    app_config::Config, InMemoryCartStore, InMemoryPackageStore, InMemoryTransactionStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fairstay_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Fairstay API on port {}", config.server.port);

    // All stores are process-resident; a restart discards every package,
    // cart and transaction.
    let packages: Arc<dyn PackageRepository> = Arc::new(InMemoryPackageStore::new());
    let carts: Arc<dyn CartRepository> = Arc::new(InMemoryCartStore::new());
    let transactions: Arc<dyn TransactionRepository> = Arc::new(InMemoryTransactionStore::new());

    let state = AppState {
        packages: packages.clone(),
        cart: Arc::new(CartService::new(packages.clone(), carts.clone())),
        checkout: Arc::new(CheckoutService::new(
            packages,
            carts,
            transactions.clone(),
            Arc::new(MockPaymentAdapter),
        )),
        ledger: Arc::new(LedgerService::new(transactions)),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
