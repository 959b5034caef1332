use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{Product, ProductFormData},
    storage::ProductStorage,
};

/// Authoritative in-memory catalog. Every mutation is written through to
/// [`ProductStorage`].
pub struct CatalogStore {
    products: Vec<Product>,
    storage: ProductStorage,
    last_id: i64,
}

impl CatalogStore {
    /// Build the store from whatever `storage` holds, seeding it on first run.
    pub fn load(storage: ProductStorage) -> AppResult<Self> {
        let products = storage.load()?;
        Ok(Self {
            products,
            storage,
            last_id: 0,
        })
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Create a product from the form and put it at the front of the catalog.
    pub fn create(&mut self, form: ProductFormData) -> AppResult<Product> {
        let price = parse_price(&form.price)?;
        let product = build_product(self.next_id(), form, price);
        self.products.insert(0, product.clone());
        tracing::debug!(product_id = %product.id, "product created");
        self.persist();
        Ok(product)
    }

    /// Replace the product with `id`, keeping its position. Unknown ids are a
    /// no-op, whatever the form holds.
    pub fn update(&mut self, id: &str, form: ProductFormData) -> AppResult<Option<Product>> {
        let updated = match self.products.iter().position(|p| p.id == id) {
            Some(index) => {
                let price = parse_price(&form.price)?;
                let product = build_product(id.to_string(), form, price);
                self.products[index] = product.clone();
                tracing::debug!(product_id = %id, "product updated");
                Some(product)
            }
            None => {
                tracing::debug!(product_id = %id, "update skipped, product not in catalog");
                None
            }
        };
        self.persist();
        Ok(updated)
    }

    /// Remove the product with `id` if present.
    pub fn delete(&mut self, id: &str) -> Option<Product> {
        let removed = self
            .products
            .iter()
            .position(|p| p.id == id)
            .map(|index| self.products.remove(index));
        if removed.is_some() {
            tracing::debug!(product_id = %id, "product deleted");
        }
        self.persist();
        removed
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.products) {
            tracing::warn!(error = %err, "catalog save failed");
        }
    }

    // Millisecond timestamps, bumped past any id already handed out or stored.
    fn next_id(&mut self) -> String {
        let mut candidate = Utc::now().timestamp_millis().max(self.last_id + 1);
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }
}

fn parse_price(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("price must be a number, got {raw:?}")))
}

fn build_product(id: String, form: ProductFormData, price: f64) -> Product {
    Product {
        id,
        name: form.name,
        price,
        category: form.category,
        description: form.description,
        image_url: form.image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::HashSet;

    fn store() -> CatalogStore {
        CatalogStore::load(ProductStorage::new(MemoryStore::new())).unwrap()
    }

    fn form(name: &str, price: &str) -> ProductFormData {
        ProductFormData {
            name: name.into(),
            price: price.into(),
            category: "Home".into(),
            description: "Something nice".into(),
            image_url: "https://picsum.photos/400/400".into(),
        }
    }

    #[test]
    fn create_prepends_with_parsed_price() {
        let mut catalog = store();
        let created = catalog.create(form("Lamp", "19.5")).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.list()[0], created);
        assert_eq!(created.price, 19.5);
    }

    #[test]
    fn create_then_delete_restores_length() {
        let mut catalog = store();
        let before = catalog.len();
        let created = catalog.create(form("Lamp", "10")).unwrap();

        assert!(catalog.delete(&created.id).is_some());
        assert_eq!(catalog.len(), before);
        assert!(catalog.get(&created.id).is_none());
    }

    #[test]
    fn ids_stay_unique_across_rapid_creates() {
        let mut catalog = store();
        let ids: HashSet<String> = (0..20)
            .map(|i| catalog.create(form(&format!("Item {i}"), "1")).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn update_preserves_position_and_id() {
        let mut catalog = store();
        let target = catalog.list()[2].id.clone();

        let updated = catalog
            .update(&target, form("Pour-Over Deluxe", "55.25"))
            .unwrap()
            .unwrap();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.list()[2], updated);
        assert_eq!(updated.id, target);
        assert_eq!(updated.name, "Pour-Over Deluxe");
        assert_eq!(updated.price, 55.25);
        assert_eq!(updated.category, "Home");
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut catalog = store();
        let before = catalog.list().to_vec();

        assert!(catalog.update("missing", form("Ghost", "1")).unwrap().is_none());
        assert!(catalog.delete("missing").is_none());
        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn unknown_id_update_ignores_unparsable_price() {
        let mut catalog = store();
        assert!(catalog.update("missing", form("Ghost", "n/a")).unwrap().is_none());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn non_numeric_price_is_rejected_before_mutation() {
        let mut catalog = store();
        let err = catalog.create(form("Bad", "cheap")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn mutations_are_written_through() {
        let backing = std::sync::Arc::new(MemoryStore::new());
        let mut catalog = CatalogStore::load(ProductStorage::new(backing.clone())).unwrap();
        let created = catalog.create(form("Lamp", "12")).unwrap();
        catalog.delete("1");

        let reloaded = CatalogStore::load(ProductStorage::new(backing)).unwrap();
        assert_eq!(reloaded.list(), catalog.list());
        assert_eq!(reloaded.list()[0].id, created.id);
        assert!(reloaded.get("1").is_none());
    }
}
