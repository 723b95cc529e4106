use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use fairstay_core::cart::Cart;
use fairstay_core::repository::CartRepository;
use fairstay_core::StoreError;

/// One cart per user id, kept in process memory.
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<String, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartStore {
    async fn find(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.read().get(user_id).cloned())
    }

    async fn save(&self, cart: Cart) -> Result<(), StoreError> {
        self.carts.write().insert(cart.user_id.clone(), cart);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn save_then_find_round_trips() {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new("user-1".to_string());
        cart.add_item(Uuid::new_v4(), 2);

        store.save(cart.clone()).await.unwrap();
        let found = store.find("user-1").await.unwrap().unwrap();

        assert_eq!(found.items, cart.items);
        assert!(store.find("user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_the_existing_cart() {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new("user-1".to_string());
        cart.add_item(Uuid::new_v4(), 1);
        store.save(cart.clone()).await.unwrap();

        cart.clear();
        store.save(cart).await.unwrap();

        assert!(store.find("user-1").await.unwrap().unwrap().is_empty());
    }
}
