use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{error::AppResult, models::Product, seed::seed_products};

/// Key under which the catalog is stored.
pub const PRODUCTS_KEY: &str = "luxemart_products";

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }
}

/// Durable store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        // Sibling temp file, then rename over the target.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the whole catalog under [`PRODUCTS_KEY`].
pub struct ProductStorage {
    store: Box<dyn KeyValueStore>,
}

impl ProductStorage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Load the catalog, seeding the store on first use.
    pub fn load(&self) -> AppResult<Vec<Product>> {
        match self.store.get(PRODUCTS_KEY)? {
            Some(stored) => {
                let products: Vec<Product> = serde_json::from_str(&stored)?;
                tracing::debug!(count = products.len(), "catalog loaded");
                Ok(products)
            }
            None => {
                let products = seed_products();
                self.save(&products)?;
                tracing::info!(count = products.len(), "catalog seeded");
                Ok(products)
            }
        }
    }

    /// Overwrite the stored catalog.
    pub fn save(&self, products: &[Product]) -> AppResult<()> {
        let serialized = serde_json::to_string(products)?;
        self.store.set(PRODUCTS_KEY, &serialized)
    }

    /// Replace whatever is stored with the seed catalog.
    pub fn reset(&self) -> AppResult<Vec<Product>> {
        let products = seed_products();
        self.save(&products)?;
        Ok(products)
    }
}
