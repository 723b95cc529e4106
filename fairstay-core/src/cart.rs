use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a cart: a package reference and how many times it is booked.
/// Unique per package id within a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub package_id: Uuid,
    pub quantity: u32,
}

/// A user's shopping cart. Exactly one per user id, created lazily on the
/// first add. Holds item lines only; totals are derived from live catalog
/// prices at read time and never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Increment an existing line or insert a new one.
    pub fn add_item(&mut self, package_id: Uuid, quantity: u32) {
        match self.items.iter_mut().find(|item| item.package_id == package_id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem { package_id, quantity }),
        }
        self.updated_at = Utc::now();
    }

    /// Set the quantity of an existing line. Zero removes the line; a
    /// package id that is not in the cart is a no-op.
    pub fn set_quantity(&mut self, package_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.remove_item(package_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.package_id == package_id) {
            item.quantity = quantity;
            self.updated_at = Utc::now();
        }
    }

    /// Remove the line for the given package, if present.
    pub fn remove_item(&mut self, package_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.package_id != package_id);
        let removed = self.items.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Drop lines whose package id fails the predicate (pruning items whose
    /// package has left the catalog).
    pub fn retain_packages<F: Fn(Uuid) -> bool>(&mut self, keep: F) {
        let before = self.items.len();
        self.items.retain(|item| keep(item.package_id));
        if self.items.len() != before {
            self.updated_at = Utc::now();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_increments_existing_line() {
        let mut cart = Cart::new("user-1".to_string());
        let pkg = Uuid::new_v4();

        cart.add_item(pkg, 1);
        cart.add_item(pkg, 2);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new("user-1".to_string());
        let pkg = Uuid::new_v4();

        cart.add_item(pkg, 2);
        cart.set_quantity(pkg, 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_for_unknown_package_is_noop() {
        let mut cart = Cart::new("user-1".to_string());
        cart.add_item(Uuid::new_v4(), 1);

        cart.set_quantity(Uuid::new_v4(), 5);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn remove_item_reports_whether_anything_changed() {
        let mut cart = Cart::new("user-1".to_string());
        let pkg = Uuid::new_v4();
        cart.add_item(pkg, 1);

        assert!(cart.remove_item(pkg));
        assert!(!cart.remove_item(pkg));
    }
}
