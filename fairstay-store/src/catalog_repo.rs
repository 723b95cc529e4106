use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use fairstay_catalog::Package;
use fairstay_core::repository::PackageRepository;
use fairstay_core::StoreError;

/// Process-resident package catalog. Everything here is lost on restart.
#[derive(Default)]
pub struct InMemoryPackageStore {
    packages: RwLock<HashMap<Uuid, Package>>,
}

impl InMemoryPackageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PackageRepository for InMemoryPackageStore {
    async fn create(&self, package: Package) -> Result<(), StoreError> {
        self.packages.write().insert(package.id, package);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Package>, StoreError> {
        Ok(self.packages.read().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Package>, StoreError> {
        let mut all: Vec<Package> = self.packages.read().values().cloned().collect();
        // Stable listing order regardless of map iteration order
        all.sort_by_key(|package| package.created_at);
        Ok(all)
    }

    async fn update(&self, package: Package) -> Result<(), StoreError> {
        self.packages.write().insert(package.id, package);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Package>, StoreError> {
        Ok(self.packages.write().remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairstay_catalog::{Capacity, NewPackage};
    use rust_decimal_macros::dec;

    fn sample(name: &str) -> Package {
        NewPackage {
            name: name.to_string(),
            price: dec!(4999),
            capacity: Some(Capacity { min: 2, max: 4 }),
            ..Default::default()
        }
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let store = InMemoryPackageStore::new();
        let package = sample("Mountain View Suite");
        let id = package.id;

        store.create(package).await.unwrap();
        let deleted = store.delete(id).await.unwrap().unwrap();

        assert_eq!(deleted.id, id);
        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.delete(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_every_package() {
        let store = InMemoryPackageStore::new();
        store.create(sample("Treehouse Retreat")).await.unwrap();
        store.create(sample("Desert Camp")).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 2);
    }
}
