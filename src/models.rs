use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Categories offered by the admin form. The model itself keeps `category`
/// as a plain string.
pub const CATEGORIES: [&str; 5] = ["Electronics", "Accessories", "Home", "Furniture", "Clothing"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub image_url: String,
}

impl Product {
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Staging record behind the admin form. Price stays a string until save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Product> for ProductFormData {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    #[default]
    Shop,
    Cart,
    AdminList,
    AdminForm,
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}
