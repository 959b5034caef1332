use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};

use crate::{
    dto::{
        admin::{DescribeRequest, DescriptionData, OpenFormRequest},
        products::DeleteProductQuery,
    },
    error::{AppError, AppResult},
    models::{Product, ProductFormData},
    response::{ApiResponse, Meta},
    services::admin_form::{AdminForm, FormPatch, GenerationTicket},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/describe", post(describe))
        .route(
            "/form",
            get(current_form).post(open_form).patch(update_form),
        )
        .route("/form/random-image", post(random_image))
        .route("/form/generate", post(generate_for_form))
        .route("/form/save", post(save_form))
        .route("/form/cancel", post(cancel_form))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductFormData,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid form data"),
    ),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductFormData>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let mut shop = state.storefront.lock().await;
    let product = shop.save_product(None, payload)?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(Json(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductFormData,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductFormData>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let mut shop = state.storefront.lock().await;
    let product = shop.save_product(Some(&id), payload)?;
    tracing::info!(product_id = %product.id, "product updated");
    Ok(Json(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID"),
        DeleteProductQuery,
    ),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<Product>),
        (status = 400, description = "Deletion not confirmed"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteProductQuery>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let mut shop = state.storefront.lock().await;
    let removed = shop
        .delete_product(&id, query.confirm)?
        .ok_or(AppError::NotFound)?;
    tracing::info!(product_id = %removed.id, "product deleted");
    Ok(Json(ApiResponse::success(
        "Deleted",
        removed,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/describe",
    request_body = DescribeRequest,
    responses(
        (status = 200, description = "Generated description or a fallback message", body = ApiResponse<DescriptionData>),
    ),
    tag = "Admin"
)]
pub async fn describe(
    State(state): State<AppState>,
    Json(payload): Json<DescribeRequest>,
) -> Json<ApiResponse<DescriptionData>> {
    let description = state
        .describer
        .generate(&payload.name, &payload.category)
        .await;
    Json(ApiResponse::success(
        "Description",
        DescriptionData { description },
        None,
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/form",
    responses(
        (status = 200, description = "Open admin form", body = ApiResponse<AdminForm>),
        (status = 404, description = "No form open"),
    ),
    tag = "Admin"
)]
pub async fn current_form(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AdminForm>>> {
    let shop = state.storefront.lock().await;
    let form = shop.form().cloned().ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Form", form, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/form",
    request_body = OpenFormRequest,
    responses(
        (status = 200, description = "Form opened, empty or prefilled from a product", body = ApiResponse<AdminForm>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Admin"
)]
pub async fn open_form(
    State(state): State<AppState>,
    Json(payload): Json<OpenFormRequest>,
) -> AppResult<Json<ApiResponse<AdminForm>>> {
    let mut shop = state.storefront.lock().await;
    let form = shop.open_form(payload.product_id.as_deref())?.clone();
    Ok(Json(ApiResponse::success("Form", form, None)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/form",
    request_body = FormPatch,
    responses(
        (status = 200, description = "Form fields updated", body = ApiResponse<AdminForm>),
        (status = 400, description = "No form open"),
    ),
    tag = "Admin"
)]
pub async fn update_form(
    State(state): State<AppState>,
    Json(payload): Json<FormPatch>,
) -> AppResult<Json<ApiResponse<AdminForm>>> {
    let mut shop = state.storefront.lock().await;
    let form = shop.update_form(payload)?.clone();
    Ok(Json(ApiResponse::success("Form", form, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/form/random-image",
    responses(
        (status = 200, description = "Placeholder image assigned", body = ApiResponse<AdminForm>),
        (status = 400, description = "No form open"),
    ),
    tag = "Admin"
)]
pub async fn random_image(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AdminForm>>> {
    let mut shop = state.storefront.lock().await;
    let form = shop.randomize_form_image()?.clone();
    Ok(Json(ApiResponse::success("Form", form, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/form/generate",
    responses(
        (status = 200, description = "Description generated into the form", body = ApiResponse<AdminForm>),
        (status = 400, description = "Name or category missing, or no form open"),
        (status = 409, description = "Generation already in progress"),
    ),
    tag = "Admin"
)]
pub async fn generate_for_form(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AdminForm>>> {
    let ticket = state.storefront.lock().await.begin_generation()?;
    let mut pending = PendingGeneration {
        state: state.clone(),
        ticket: Some(ticket.clone()),
    };

    // The lock is not held across the external call.
    let description = state
        .describer
        .generate(&ticket.name, &ticket.category)
        .await;

    let mut shop = state.storefront.lock().await;
    pending.ticket = None;
    if !shop.complete_generation(&ticket, description) {
        tracing::debug!(form_id = %ticket.form_id, "discarding description for closed form");
        return Err(AppError::Conflict("admin form was closed".to_string()));
    }
    let form = shop.form().cloned().ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Form", form, None)))
}

/// Clears the form's in-flight flag if the request is dropped before the
/// generated text is stored.
struct PendingGeneration {
    state: AppState,
    ticket: Option<GenerationTicket>,
}

impl Drop for PendingGeneration {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(form_id = %ticket.form_id, "no runtime to release abandoned generation");
            return;
        };
        let state = self.state.clone();
        runtime.spawn(async move {
            if state.storefront.lock().await.abandon_generation(&ticket) {
                tracing::debug!(form_id = %ticket.form_id, "released abandoned description generation");
            }
        });
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/form/save",
    responses(
        (status = 200, description = "Form saved to the catalog", body = ApiResponse<Product>),
        (status = 400, description = "Invalid form data"),
        (status = 404, description = "No form open, or edited product no longer exists"),
    ),
    tag = "Admin"
)]
pub async fn save_form(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Product>>> {
    let mut shop = state.storefront.lock().await;
    let product = shop.submit_form()?;
    tracing::info!(product_id = %product.id, "product saved from form");
    Ok(Json(ApiResponse::success(
        "Saved",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/form/cancel",
    responses(
        (status = 200, description = "Form discarded", body = ApiResponse<serde_json::Value>),
    ),
    tag = "Admin"
)]
pub async fn cancel_form(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let mut shop = state.storefront.lock().await;
    shop.cancel_form();
    Json(ApiResponse::success(
        "Cancelled",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
