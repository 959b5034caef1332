use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, Screen};

#[derive(Debug, Deserialize, ToSchema)]
pub struct NavigateRequest {
    pub screen: Screen,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    pub screen: Screen,
    pub editing: Option<Product>,
    pub cart_count: u64,
}
