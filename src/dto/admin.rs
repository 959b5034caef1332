use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenFormRequest {
    /// Product to edit; omit to start a new one.
    pub product_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DescribeRequest {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DescriptionData {
    pub description: String,
}
