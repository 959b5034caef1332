use crate::models::{Product, Screen};

/// Current screen and the product open in the admin form, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRouter {
    screen: Screen,
    editing: Option<Product>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn editing(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn edit(&mut self, product: Product) {
        self.editing = Some(product);
        self.screen = Screen::AdminForm;
    }

    pub fn create(&mut self) {
        self.editing = None;
        self.screen = Screen::AdminForm;
    }

    /// Leave the form after save or cancel.
    pub fn finish_edit(&mut self) {
        self.editing = None;
        self.screen = Screen::AdminList;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_products;

    #[test]
    fn starts_on_shop() {
        let router = ViewRouter::new();
        assert_eq!(router.screen(), Screen::Shop);
        assert!(router.editing().is_none());
    }

    #[test]
    fn edit_then_finish_returns_to_admin_list() {
        let mut router = ViewRouter::new();
        let product = seed_products().remove(0);

        router.edit(product.clone());
        assert_eq!(router.screen(), Screen::AdminForm);
        assert_eq!(router.editing(), Some(&product));

        router.finish_edit();
        assert_eq!(router.screen(), Screen::AdminList);
        assert!(router.editing().is_none());
    }

    #[test]
    fn create_clears_previous_edit() {
        let mut router = ViewRouter::new();
        router.edit(seed_products().remove(1));
        router.create();
        assert_eq!(router.screen(), Screen::AdminForm);
        assert!(router.editing().is_none());
    }
}
