use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use fairstay_catalog::Package;
use fairstay_core::cart::Cart;
use fairstay_core::repository::{CartRepository, PackageRepository};

use crate::error::BookingError;

/// A cart line enriched with its live catalog package.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub package_id: Uuid,
    pub quantity: u32,
    pub package: Package,
}

/// What the cart endpoints return: enriched lines, the derived total and the
/// summed quantity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub total_amount: Decimal,
    pub item_count: u32,
}

impl CartSummary {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            item_count: 0,
        }
    }
}

/// Per-user cart engine. Totals are never stored: every summary is computed
/// from the catalog's current prices, and lines whose package has left the
/// catalog are dropped at the next mutation.
pub struct CartService {
    packages: Arc<dyn PackageRepository>,
    carts: Arc<dyn CartRepository>,
}

impl CartService {
    pub fn new(packages: Arc<dyn PackageRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self { packages, carts }
    }

    /// Add a package to the user's cart, creating the cart on first use.
    /// Adding an already-present package increments its quantity.
    pub async fn add(
        &self,
        user_id: &str,
        package_id: Uuid,
        quantity: u32,
    ) -> Result<CartSummary, BookingError> {
        if quantity == 0 {
            return Err(BookingError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
        // The package must exist before the cart is touched
        if self.packages.get(package_id).await?.is_none() {
            return Err(BookingError::PackageNotFound(package_id));
        }

        let mut cart = match self.carts.find(user_id).await? {
            Some(cart) => cart,
            None => Cart::new(user_id.to_string()),
        };
        cart.add_item(package_id, quantity);

        self.prune_and_save(cart).await
    }

    /// Set the quantity of a line. Zero behaves as `remove`; a negative
    /// quantity is rejected. Fails if the user has no cart at all.
    pub async fn update_quantity(
        &self,
        user_id: &str,
        package_id: Uuid,
        quantity: i64,
    ) -> Result<CartSummary, BookingError> {
        let quantity = u32::try_from(quantity).map_err(|_| {
            BookingError::Validation("quantity must be a non-negative number".to_string())
        })?;
        let mut cart = self
            .carts
            .find(user_id)
            .await?
            .ok_or_else(|| BookingError::CartNotFound(user_id.to_string()))?;

        cart.set_quantity(package_id, quantity);

        self.prune_and_save(cart).await
    }

    /// Remove a line. Never fails: a missing cart or a package id that is
    /// not in it both answer with the current (possibly empty) summary.
    pub async fn remove(
        &self,
        user_id: &str,
        package_id: Uuid,
    ) -> Result<CartSummary, BookingError> {
        let Some(mut cart) = self.carts.find(user_id).await? else {
            return Ok(CartSummary::empty());
        };
        cart.remove_item(package_id);

        self.prune_and_save(cart).await
    }

    /// Empty an existing cart; a user without a cart is a no-op.
    pub async fn clear(&self, user_id: &str) -> Result<(), BookingError> {
        if let Some(mut cart) = self.carts.find(user_id).await? {
            cart.clear();
            self.carts.save(cart).await?;
        }
        Ok(())
    }

    /// The zero-value summary if the user has no cart; never fails.
    pub async fn summary(&self, user_id: &str) -> Result<CartSummary, BookingError> {
        match self.carts.find(user_id).await? {
            Some(cart) => {
                let lines = self.resolve(&cart).await?;
                Ok(summarize(lines))
            }
            None => Ok(CartSummary::empty()),
        }
    }

    // Persist the cart minus any line whose package has vanished, and answer
    // with the summary of what survived.
    async fn prune_and_save(&self, mut cart: Cart) -> Result<CartSummary, BookingError> {
        let lines = self.resolve(&cart).await?;
        let live: HashSet<Uuid> = lines.iter().map(|line| line.package_id).collect();
        cart.retain_packages(|id| live.contains(&id));
        self.carts.save(cart).await?;
        Ok(summarize(lines))
    }

    async fn resolve(&self, cart: &Cart) -> Result<Vec<CartLine>, BookingError> {
        let mut lines = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            if let Some(package) = self.packages.get(item.package_id).await? {
                lines.push(CartLine {
                    package_id: item.package_id,
                    quantity: item.quantity,
                    package,
                });
            }
        }
        Ok(lines)
    }
}

fn summarize(lines: Vec<CartLine>) -> CartSummary {
    let total_amount = lines
        .iter()
        .map(|line| line.package.price * Decimal::from(line.quantity))
        .sum();
    let item_count = lines.iter().map(|line| line.quantity).sum();
    CartSummary {
        items: lines,
        total_amount,
        item_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairstay_catalog::{Capacity, NewPackage, PackagePatch};
    use fairstay_store::{InMemoryCartStore, InMemoryPackageStore};
    use rust_decimal_macros::dec;

    async fn seed_package(
        packages: &Arc<dyn PackageRepository>,
        name: &str,
        price: Decimal,
    ) -> Package {
        let package = NewPackage {
            name: name.to_string(),
            price,
            capacity: Some(Capacity { min: 1, max: 4 }),
            ..Default::default()
        }
        .build()
        .unwrap();
        packages.create(package.clone()).await.unwrap();
        package
    }

    fn service() -> (CartService, Arc<dyn PackageRepository>) {
        let packages: Arc<dyn PackageRepository> = Arc::new(InMemoryPackageStore::new());
        let carts: Arc<dyn CartRepository> = Arc::new(InMemoryCartStore::new());
        (CartService::new(packages.clone(), carts), packages)
    }

    #[tokio::test]
    async fn add_creates_the_cart_lazily_and_prices_it() {
        let (cart, packages) = service();
        let villa = seed_package(&packages, "Beach Villa", dec!(100)).await;

        let summary = cart.add("user-1", villa.id, 2).await.unwrap();

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_amount, dec!(200));
        assert_eq!(summary.items[0].package.name, "Beach Villa");
    }

    #[tokio::test]
    async fn add_increments_an_existing_line() {
        let (cart, packages) = service();
        let villa = seed_package(&packages, "Beach Villa", dec!(100)).await;

        cart.add("user-1", villa.id, 1).await.unwrap();
        let summary = cart.add("user-1", villa.id, 2).await.unwrap();

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_amount, dec!(300));
    }

    #[tokio::test]
    async fn add_unknown_package_fails_without_creating_a_cart() {
        let (cart, _) = service();

        let err = cart.add("user-1", Uuid::new_v4(), 1).await.unwrap_err();

        assert!(matches!(err, BookingError::PackageNotFound(_)));
        let summary = cart.summary("user-1").await.unwrap();
        assert!(summary.items.is_empty());
    }

    #[tokio::test]
    async fn add_rejects_zero_quantity() {
        let (cart, packages) = service();
        let villa = seed_package(&packages, "Beach Villa", dec!(100)).await;

        let err = cart.add("user-1", villa.id, 0).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn total_tracks_mixed_packages() {
        // Worked example: {A: 100 x 2, B: 50 x 1} -> count 3, total 250
        let (cart, packages) = service();
        let a = seed_package(&packages, "Package A", dec!(100)).await;
        let b = seed_package(&packages, "Package B", dec!(50)).await;

        cart.add("user-1", a.id, 2).await.unwrap();
        let summary = cart.add("user-1", b.id, 1).await.unwrap();

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_amount, dec!(250));
    }

    #[tokio::test]
    async fn add_then_remove_restores_the_prior_state() {
        let (cart, packages) = service();
        let a = seed_package(&packages, "Package A", dec!(100)).await;
        let b = seed_package(&packages, "Package B", dec!(50)).await;

        cart.add("user-1", a.id, 2).await.unwrap();
        let before = cart.summary("user-1").await.unwrap();

        cart.add("user-1", b.id, 1).await.unwrap();
        let after = cart.remove("user-1", b.id).await.unwrap();

        assert_eq!(after.item_count, before.item_count);
        assert_eq!(after.total_amount, before.total_amount);
        assert_eq!(after.items.len(), before.items.len());
    }

    #[tokio::test]
    async fn update_to_zero_is_equivalent_to_remove() {
        let (cart, packages) = service();
        let a = seed_package(&packages, "Package A", dec!(100)).await;
        let b = seed_package(&packages, "Package B", dec!(50)).await;

        cart.add("user-1", a.id, 2).await.unwrap();
        cart.add("user-1", b.id, 1).await.unwrap();

        let via_update = cart.update_quantity("user-1", b.id, 0).await.unwrap();

        assert_eq!(via_update.items.len(), 1);
        assert_eq!(via_update.item_count, 2);
        assert_eq!(via_update.total_amount, dec!(200));
    }

    #[tokio::test]
    async fn update_rejects_negative_quantity() {
        let (cart, packages) = service();
        let villa = seed_package(&packages, "Beach Villa", dec!(100)).await;
        cart.add("user-1", villa.id, 1).await.unwrap();

        let err = cart
            .update_quantity("user-1", villa.id, -3)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn update_without_a_cart_is_not_found() {
        let (cart, packages) = service();
        let villa = seed_package(&packages, "Beach Villa", dec!(100)).await;

        let err = cart
            .update_quantity("user-1", villa.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::CartNotFound(_)));
    }

    #[tokio::test]
    async fn remove_without_a_cart_answers_the_empty_summary() {
        let (cart, _) = service();

        let summary = cart.remove("user-1", Uuid::new_v4()).await.unwrap();

        assert!(summary.items.is_empty());
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert_eq!(summary.item_count, 0);
    }

    #[tokio::test]
    async fn clear_empties_the_cart() {
        let (cart, packages) = service();
        let villa = seed_package(&packages, "Beach Villa", dec!(100)).await;
        cart.add("user-1", villa.id, 3).await.unwrap();

        cart.clear("user-1").await.unwrap();
        // Clearing a user without a cart stays a no-op
        cart.clear("user-2").await.unwrap();

        let summary = cart.summary("user-1").await.unwrap();
        assert!(summary.items.is_empty());
        assert_eq!(summary.total_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn summary_reflects_a_later_price_change() {
        let (cart, packages) = service();
        let mut villa = seed_package(&packages, "Beach Villa", dec!(100)).await;
        cart.add("user-1", villa.id, 2).await.unwrap();

        PackagePatch {
            price: Some(dec!(150)),
            ..Default::default()
        }
        .apply(&mut villa)
        .unwrap();
        packages.update(villa).await.unwrap();

        let summary = cart.summary("user-1").await.unwrap();
        assert_eq!(summary.total_amount, dec!(300));
    }

    #[tokio::test]
    async fn vanished_packages_are_dropped_from_summaries() {
        let (cart, packages) = service();
        let a = seed_package(&packages, "Package A", dec!(100)).await;
        let b = seed_package(&packages, "Package B", dec!(50)).await;
        cart.add("user-1", a.id, 2).await.unwrap();
        cart.add("user-1", b.id, 1).await.unwrap();

        packages.delete(b.id).await.unwrap();

        let summary = cart.summary("user-1").await.unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.total_amount, dec!(200));
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn summary_serializes_with_wire_field_names() {
        let summary = CartSummary::empty();
        let value = serde_json::to_value(summary).unwrap();
        assert!(value.get("totalAmount").is_some());
        assert!(value.get("itemCount").is_some());
    }
}
