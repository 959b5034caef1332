use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::view::{NavigateRequest, ViewData},
    response::ApiResponse,
    state::AppState,
    storefront::Storefront,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(current_view).post(navigate))
}

fn view_data(shop: &Storefront) -> ViewData {
    ViewData {
        screen: shop.router().screen(),
        editing: shop.router().editing().cloned(),
        cart_count: shop.cart().item_count(),
    }
}

#[utoipa::path(
    get,
    path = "/api/view",
    responses(
        (status = 200, description = "Current screen, product under edit and cart badge count", body = ApiResponse<ViewData>)
    ),
    tag = "View"
)]
pub async fn current_view(State(state): State<AppState>) -> Json<ApiResponse<ViewData>> {
    let shop = state.storefront.lock().await;
    Json(ApiResponse::success("View", view_data(&shop), None))
}

#[utoipa::path(
    post,
    path = "/api/view",
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "Navigated", body = ApiResponse<ViewData>)
    ),
    tag = "View"
)]
pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Json<ApiResponse<ViewData>> {
    let mut shop = state.storefront.lock().await;
    shop.navigate(payload.screen);
    tracing::debug!(screen = ?payload.screen, "navigated");
    Json(ApiResponse::success("View", view_data(&shop), None))
}
