use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{CartItem, Product, ProductFormData, Screen},
    services::{
        admin_form::{AdminForm, FormPatch, GenerationTicket, validate_form},
        cart_service::{CartStore, CheckoutSummary},
        catalog_service::CatalogStore,
        view_router::ViewRouter,
    },
    storage::ProductStorage,
};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
    pub item_count: u64,
}

/// All application state for one storefront session: catalog, cart, the
/// current view and the open admin form.
pub struct Storefront {
    catalog: CatalogStore,
    cart: CartStore,
    router: ViewRouter,
    form: Option<AdminForm>,
}

impl Storefront {
    pub fn load(storage: ProductStorage) -> AppResult<Self> {
        Ok(Self {
            catalog: CatalogStore::load(storage)?,
            cart: CartStore::new(),
            router: ViewRouter::new(),
            form: None,
        })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn form(&self) -> Option<&AdminForm> {
        self.form.as_ref()
    }

    pub fn product(&self, id: &str) -> AppResult<&Product> {
        self.catalog.get(id).ok_or(AppError::NotFound)
    }

    pub fn cart_view(&self) -> CartView {
        CartView {
            items: self.cart.items().to_vec(),
            total: self.cart.total(),
            item_count: self.cart.item_count(),
        }
    }

    pub fn add_to_cart(&mut self, product_id: &str) -> AppResult<()> {
        let product = self.catalog.get(product_id).ok_or(AppError::NotFound)?;
        self.cart.add(product);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) {
        self.cart.adjust_quantity(product_id, delta);
    }

    pub fn checkout(&self) -> CheckoutSummary {
        self.cart.checkout()
    }

    /// Switch screens. Leaving the admin form discards it; entering it with no
    /// form open starts a new product.
    pub fn navigate(&mut self, screen: Screen) {
        match screen {
            Screen::AdminForm if self.form.is_none() => {
                self.router.create();
                self.form = Some(AdminForm::open(None));
            }
            Screen::AdminForm => self.router.navigate(screen),
            _ => {
                self.form = None;
                self.router.navigate(screen);
            }
        }
    }

    /// Open the admin form, prefilled from `product_id` when editing.
    pub fn open_form(&mut self, product_id: Option<&str>) -> AppResult<&AdminForm> {
        let form = match product_id {
            Some(id) => {
                let product = self.catalog.get(id).ok_or(AppError::NotFound)?.clone();
                let form = AdminForm::open(Some(&product));
                self.router.edit(product);
                form
            }
            None => {
                self.router.create();
                AdminForm::open(None)
            }
        };
        Ok(self.form.insert(form))
    }

    pub fn update_form(&mut self, patch: FormPatch) -> AppResult<&AdminForm> {
        let form = self.form_mut()?;
        form.apply(patch);
        Ok(form)
    }

    pub fn randomize_form_image(&mut self) -> AppResult<&AdminForm> {
        let form = self.form_mut()?;
        form.randomize_image();
        Ok(form)
    }

    pub fn begin_generation(&mut self) -> AppResult<GenerationTicket> {
        self.form_mut()?.begin_generation()
    }

    /// Apply a finished generation. Results for a form that has since been
    /// closed or replaced are dropped.
    pub fn complete_generation(&mut self, ticket: &GenerationTicket, description: String) -> bool {
        match self.form.as_mut() {
            Some(form) => form.complete_generation(ticket, description),
            None => false,
        }
    }

    /// Clear the in-flight flag when a generation was dropped before finishing.
    pub fn abandon_generation(&mut self, ticket: &GenerationTicket) -> bool {
        match self.form.as_mut() {
            Some(form) => form.abandon_generation(ticket),
            None => false,
        }
    }

    /// Save the open form into the catalog and return to the admin list.
    pub fn submit_form(&mut self) -> AppResult<Product> {
        let form = self.form.as_ref().ok_or(AppError::NotFound)?;
        form.validate()?;
        let editing_id = form.editing_id.clone();
        let data = form.data.clone();

        let product = self.save_product(editing_id.as_deref(), data)?;
        self.form = None;
        self.router.finish_edit();
        Ok(product)
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.router.finish_edit();
    }

    /// Create a product, or update `editing_id` when given.
    pub fn save_product(&mut self, editing_id: Option<&str>, data: ProductFormData) -> AppResult<Product> {
        validate_form(&data)?;
        match editing_id {
            Some(id) => self.catalog.update(id, data)?.ok_or(AppError::NotFound),
            None => self.catalog.create(data),
        }
    }

    /// Delete a product once the user has confirmed.
    pub fn delete_product(&mut self, id: &str, confirmed: bool) -> AppResult<Option<Product>> {
        if !confirmed {
            return Err(AppError::BadRequest(
                "deleting a product must be confirmed".to_string(),
            ));
        }
        Ok(self.catalog.delete(id))
    }

    fn form_mut(&mut self) -> AppResult<&mut AdminForm> {
        self.form
            .as_mut()
            .ok_or_else(|| AppError::BadRequest("admin form is not open".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn storefront() -> Storefront {
        Storefront::load(ProductStorage::new(MemoryStore::new())).unwrap()
    }

    fn patch() -> FormPatch {
        FormPatch {
            name: Some("Linen Shirt".into()),
            price: Some("59.00".into()),
            category: Some("Clothing".into()),
            description: Some("Breathable".into()),
            image_url: Some("https://picsum.photos/400/400?random=9".into()),
        }
    }

    #[test]
    fn cart_view_derives_totals() {
        let mut shop = storefront();
        shop.add_to_cart("3").unwrap();
        shop.add_to_cart("3").unwrap();
        shop.add_to_cart("1").unwrap();

        let view = shop.cart_view();
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 3);
        assert!((view.total - (45.0 * 2.0 + 129.99)).abs() < 1e-9);
    }

    #[test]
    fn unknown_product_cannot_be_added() {
        let mut shop = storefront();
        assert!(matches!(shop.add_to_cart("nope"), Err(AppError::NotFound)));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn create_flow_prepends_and_returns_to_list() {
        let mut shop = storefront();
        shop.open_form(None).unwrap();
        assert_eq!(shop.router().screen(), Screen::AdminForm);
        shop.update_form(patch()).unwrap();

        let product = shop.submit_form().unwrap();
        assert_eq!(shop.catalog().list()[0], product);
        assert_eq!(product.price, 59.0);
        assert_eq!(shop.router().screen(), Screen::AdminList);
        assert!(shop.form().is_none());
    }

    #[test]
    fn edit_flow_keeps_id_and_position() {
        let mut shop = storefront();
        let form = shop.open_form(Some("2")).unwrap();
        assert_eq!(form.data.category, "Electronics");
        assert_eq!(shop.router().editing().map(|p| p.id.as_str()), Some("2"));

        shop.update_form(FormPatch {
            price: Some("199.00".into()),
            ..FormPatch::default()
        })
        .unwrap();
        let product = shop.submit_form().unwrap();

        assert_eq!(product.id, "2");
        assert_eq!(shop.catalog().list()[1].price, 199.0);
        assert_eq!(shop.catalog().len(), 4);
    }

    #[test]
    fn invalid_form_stays_open() {
        let mut shop = storefront();
        shop.open_form(None).unwrap();
        assert!(shop.submit_form().is_err());
        assert!(shop.form().is_some());
        assert_eq!(shop.catalog().len(), 4);
    }

    #[test]
    fn cancel_discards_form() {
        let mut shop = storefront();
        shop.open_form(Some("1")).unwrap();
        shop.cancel_form();
        assert!(shop.form().is_none());
        assert_eq!(shop.router().screen(), Screen::AdminList);
        assert!(shop.router().editing().is_none());
    }

    #[test]
    fn generation_result_after_leaving_form_is_dropped() {
        let mut shop = storefront();
        shop.open_form(None).unwrap();
        shop.update_form(patch()).unwrap();
        let ticket = shop.begin_generation().unwrap();

        shop.navigate(Screen::Shop);
        assert!(!shop.complete_generation(&ticket, "late".into()));

        shop.navigate(Screen::AdminForm);
        assert!(!shop.complete_generation(&ticket, "late".into()));
        assert_eq!(shop.form().unwrap().data.description, "");
    }

    #[test]
    fn abandoned_generation_unblocks_the_form() {
        let mut shop = storefront();
        shop.open_form(None).unwrap();
        shop.update_form(patch()).unwrap();
        let ticket = shop.begin_generation().unwrap();
        assert!(matches!(shop.begin_generation(), Err(AppError::Conflict(_))));

        assert!(shop.abandon_generation(&ticket));
        assert!(!shop.form().unwrap().generating);
        assert!(shop.begin_generation().is_ok());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut shop = storefront();
        assert!(shop.delete_product("1", false).is_err());
        assert_eq!(shop.catalog().len(), 4);

        let removed = shop.delete_product("1", true).unwrap();
        assert_eq!(removed.map(|p| p.id), Some("1".to_string()));
        assert!(shop.delete_product("1", true).unwrap().is_none());
    }
}
