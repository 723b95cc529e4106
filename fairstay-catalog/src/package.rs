use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Guest capacity range for a stay package
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capacity {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// A bookable stay package in the catalog.
///
/// Past transactions hold a frozen snapshot of the fields they need, so
/// editing or deleting a package never rewrites booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: String,
    pub image: String,
    pub features: Vec<String>,
    pub category: String,
    pub capacity: Capacity,
    pub room_type: String,
    pub amenities: Vec<String>,
    pub location: Location,
    pub rating: f64,
    pub reviews: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Package not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid package: {0}")]
    Validation(String),
}

// Required: non-empty name, positive price, a sane capacity range, rating
// within the 0..=5 scale.
fn validate_fields(
    name: &str,
    price: Decimal,
    capacity: &Capacity,
    rating: f64,
) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("name is required".to_string()));
    }
    if price <= Decimal::ZERO {
        return Err(CatalogError::Validation("price must be positive".to_string()));
    }
    if capacity.min == 0 {
        return Err(CatalogError::Validation(
            "capacity minimum must be at least 1".to_string(),
        ));
    }
    if capacity.min > capacity.max {
        return Err(CatalogError::Validation(
            "capacity minimum cannot exceed maximum".to_string(),
        ));
    }
    if !(0.0..=5.0).contains(&rating) {
        return Err(CatalogError::Validation(
            "rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}

/// Fields accepted when creating a package. Everything is optional at the
/// wire level; `build` enforces what is actually required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPackage {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: String,
    pub image: String,
    pub features: Vec<String>,
    pub category: String,
    pub capacity: Option<Capacity>,
    pub room_type: String,
    pub amenities: Vec<String>,
    pub location: Location,
    pub rating: f64,
    pub reviews: u32,
}

impl NewPackage {
    /// Validate and turn the draft into a catalog entry with a fresh id.
    pub fn build(self) -> Result<Package, CatalogError> {
        let capacity = self
            .capacity
            .ok_or_else(|| CatalogError::Validation("capacity is required".to_string()))?;
        validate_fields(&self.name, self.price, &capacity, self.rating)?;

        let now = Utc::now();
        Ok(Package {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            price: self.price,
            duration: self.duration,
            image: self.image,
            features: self.features,
            category: self.category,
            capacity,
            room_type: self.room_type,
            amenities: self.amenities,
            location: self.location,
            rating: self.rating,
            reviews: self.reviews,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Merge-patch for package updates: only provided fields overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub features: Option<Vec<String>>,
    pub category: Option<String>,
    pub capacity: Option<Capacity>,
    pub room_type: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub location: Option<Location>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
}

impl PackagePatch {
    /// Apply the patch. The package is left untouched if the patched result
    /// fails validation.
    pub fn apply(self, package: &mut Package) -> Result<(), CatalogError> {
        let mut next = package.clone();

        if let Some(name) = self.name {
            next.name = name;
        }
        if let Some(description) = self.description {
            next.description = description;
        }
        if let Some(price) = self.price {
            next.price = price;
        }
        if let Some(duration) = self.duration {
            next.duration = duration;
        }
        if let Some(image) = self.image {
            next.image = image;
        }
        if let Some(features) = self.features {
            next.features = features;
        }
        if let Some(category) = self.category {
            next.category = category;
        }
        if let Some(capacity) = self.capacity {
            next.capacity = capacity;
        }
        if let Some(room_type) = self.room_type {
            next.room_type = room_type;
        }
        if let Some(amenities) = self.amenities {
            next.amenities = amenities;
        }
        if let Some(location) = self.location {
            next.location = location;
        }
        if let Some(rating) = self.rating {
            next.rating = rating;
        }
        if let Some(reviews) = self.reviews {
            next.reviews = reviews;
        }

        validate_fields(&next.name, next.price, &next.capacity, next.rating)?;
        next.updated_at = Utc::now();
        *package = next;
        Ok(())
    }
}
