use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustQuantityRequest {
    pub delta: i64,
}
