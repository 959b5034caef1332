use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{services::description_service::DescriptionGenerator, storefront::Storefront};

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<Mutex<Storefront>>,
    pub describer: Arc<dyn DescriptionGenerator>,
}

impl AppState {
    pub fn new(storefront: Storefront, describer: impl DescriptionGenerator + 'static) -> Self {
        Self {
            storefront: Arc::new(Mutex::new(storefront)),
            describer: Arc::new(describer),
        }
    }
}
