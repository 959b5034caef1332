use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::cart::{AddToCartRequest, AdjustQuantityRequest},
    error::AppResult,
    response::{ApiResponse, Meta},
    services::cart_service::CheckoutSummary,
    state::AppState,
    storefront::CartView,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart))
        .route("/checkout", post(checkout))
        .route("/{product_id}", patch(adjust_quantity).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart items with derived total and item count", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn cart_list(State(state): State<AppState>) -> Json<ApiResponse<CartView>> {
    let shop = state.storefront.lock().await;
    let view = shop.cart_view();
    let meta = Meta::new(view.items.len());
    Json(ApiResponse::success("OK", view, Some(meta)))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add one unit of a product", body = ApiResponse<CartView>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let mut shop = state.storefront.lock().await;
    shop.add_to_cart(&payload.product_id)?;
    Ok(Json(ApiResponse::success("Added to cart", shop.cart_view(), None)))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = AdjustQuantityRequest,
    responses(
        (status = 200, description = "Quantity adjusted; entries reaching zero are removed", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn adjust_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(payload): Json<AdjustQuantityRequest>,
) -> Json<ApiResponse<CartView>> {
    let mut shop = state.storefront.lock().await;
    shop.adjust_quantity(&product_id, payload.delta);
    Json(ApiResponse::success("Quantity updated", shop.cart_view(), None))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "OK", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<ApiResponse<CartView>> {
    let mut shop = state.storefront.lock().await;
    shop.remove_from_cart(&product_id);
    Json(ApiResponse::success("Removed from cart", shop.cart_view(), None))
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    responses(
        (status = 200, description = "Simulated checkout summary", body = ApiResponse<CheckoutSummary>),
    ),
    tag = "Cart"
)]
pub async fn checkout(State(state): State<AppState>) -> Json<ApiResponse<CheckoutSummary>> {
    let shop = state.storefront.lock().await;
    let summary = shop.checkout();
    tracing::info!(total = summary.total, items = summary.item_count, "checkout simulated");
    Json(ApiResponse::success("Checkout", summary, Some(Meta::empty())))
}
