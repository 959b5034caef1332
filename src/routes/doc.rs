use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{DescribeRequest, DescriptionData, OpenFormRequest},
        cart::{AddToCartRequest, AdjustQuantityRequest},
        products::ProductList,
        view::{NavigateRequest, ViewData},
    },
    models::{CartItem, Product, ProductFormData, Screen},
    response::{ApiResponse, Meta},
    routes::{admin, cart, health, products, view},
    services::{
        admin_form::{AdminForm, FormPatch},
        cart_service::CheckoutSummary,
    },
    storefront::CartView,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::adjust_quantity,
        cart::remove_from_cart,
        cart::checkout,
        view::current_view,
        view::navigate,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::describe,
        admin::current_form,
        admin::open_form,
        admin::update_form,
        admin::random_image,
        admin::generate_for_form,
        admin::save_form,
        admin::cancel_form
    ),
    components(
        schemas(
            Product,
            CartItem,
            ProductFormData,
            Screen,
            ProductList,
            CartView,
            CheckoutSummary,
            AddToCartRequest,
            AdjustQuantityRequest,
            NavigateRequest,
            ViewData,
            OpenFormRequest,
            DescribeRequest,
            DescriptionData,
            AdminForm,
            FormPatch,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<AdminForm>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog browsing"),
        (name = "Cart", description = "Shopping cart"),
        (name = "View", description = "Screen navigation"),
        (name = "Admin", description = "Catalog management and the product form"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
