use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Product, ProductFormData},
};

pub const MISSING_NAME_OR_CATEGORY: &str = "Please enter a product name and category first.";

/// Partial update of the form fields; absent fields are left alone.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Handle for one in-flight description generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    pub form_id: Uuid,
    pub name: String,
    pub category: String,
}

/// An open admin form: create when `editing_id` is `None`, edit otherwise.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminForm {
    pub id: Uuid,
    pub editing_id: Option<String>,
    pub data: ProductFormData,
    pub generating: bool,
}

impl AdminForm {
    pub fn open(editing: Option<&Product>) -> Self {
        Self {
            id: Uuid::new_v4(),
            editing_id: editing.map(|p| p.id.clone()),
            data: editing.map(ProductFormData::from).unwrap_or_default(),
            generating: false,
        }
    }

    pub fn apply(&mut self, patch: FormPatch) {
        let data = &mut self.data;
        if let Some(name) = patch.name {
            data.name = name;
        }
        if let Some(price) = patch.price {
            data.price = price;
        }
        if let Some(category) = patch.category {
            data.category = category;
        }
        if let Some(description) = patch.description {
            data.description = description;
        }
        if let Some(image_url) = patch.image_url {
            data.image_url = image_url;
        }
    }

    pub fn randomize_image(&mut self) {
        self.data.image_url = random_image_url();
    }

    /// Mark a generation as in flight. Refused while another one is pending.
    pub fn begin_generation(&mut self) -> AppResult<GenerationTicket> {
        if self.data.name.trim().is_empty() || self.data.category.trim().is_empty() {
            return Err(AppError::BadRequest(MISSING_NAME_OR_CATEGORY.to_string()));
        }
        if self.generating {
            return Err(AppError::Conflict(
                "description generation already in progress".to_string(),
            ));
        }
        self.generating = true;
        Ok(GenerationTicket {
            form_id: self.id,
            name: self.data.name.clone(),
            category: self.data.category.clone(),
        })
    }

    /// Store the generated text if `ticket` belongs to this form. Returns
    /// whether it was applied.
    pub fn complete_generation(&mut self, ticket: &GenerationTicket, description: String) -> bool {
        if ticket.form_id != self.id {
            return false;
        }
        self.data.description = description;
        self.generating = false;
        true
    }

    /// Release the in-flight flag for a generation that will never complete.
    pub fn abandon_generation(&mut self, ticket: &GenerationTicket) -> bool {
        if ticket.form_id != self.id || !self.generating {
            return false;
        }
        self.generating = false;
        true
    }

    /// Check the staged fields before they reach the catalog.
    pub fn validate(&self) -> AppResult<()> {
        validate_form(&self.data)
    }
}

pub fn validate_form(data: &ProductFormData) -> AppResult<()> {
    if data.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if data.category.trim().is_empty() {
        return Err(AppError::BadRequest("category is required".to_string()));
    }
    match data.price.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => {}
        _ => {
            return Err(AppError::BadRequest(
                "price must be a non-negative number".to_string(),
            ));
        }
    }
    if data.image_url.trim().is_empty() {
        return Err(AppError::BadRequest("image url is required".to_string()));
    }
    Ok(())
}

pub fn random_image_url() -> String {
    format!(
        "https://picsum.photos/400/400?random={}",
        Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_products;

    fn filled() -> AdminForm {
        let mut form = AdminForm::open(None);
        form.apply(FormPatch {
            name: Some("Desk Lamp".into()),
            price: Some("19.99".into()),
            category: Some("Home".into()),
            description: Some("Warm light".into()),
            image_url: Some("https://picsum.photos/400/400".into()),
        });
        form
    }

    #[test]
    fn edit_form_is_prefilled() {
        let product = seed_products().remove(0);
        let form = AdminForm::open(Some(&product));
        assert_eq!(form.editing_id.as_deref(), Some("1"));
        assert_eq!(form.data.name, product.name);
        assert_eq!(form.data.price, "129.99");
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut form = filled();
        form.apply(FormPatch {
            price: Some("5".into()),
            ..FormPatch::default()
        });
        assert_eq!(form.data.price, "5");
        assert_eq!(form.data.name, "Desk Lamp");
    }

    #[test]
    fn generation_needs_name_and_category() {
        let mut form = AdminForm::open(None);
        let err = form.begin_generation().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == MISSING_NAME_OR_CATEGORY));
        assert!(!form.generating);
    }

    #[test]
    fn second_generation_is_refused_while_pending() {
        let mut form = filled();
        let ticket = form.begin_generation().unwrap();
        assert!(matches!(form.begin_generation(), Err(AppError::Conflict(_))));

        assert!(form.complete_generation(&ticket, "Generated".into()));
        assert_eq!(form.data.description, "Generated");
        assert!(form.begin_generation().is_ok());
    }

    #[test]
    fn abandoned_generation_can_be_retried() {
        let mut form = filled();
        let ticket = form.begin_generation().unwrap();

        assert!(form.abandon_generation(&ticket));
        assert!(!form.generating);
        assert_eq!(form.data.description, "Warm light");
        assert!(form.begin_generation().is_ok());
    }

    #[test]
    fn abandon_ignores_other_forms() {
        let mut first = filled();
        let ticket = first.begin_generation().unwrap();

        let mut replacement = filled();
        replacement.begin_generation().unwrap();
        assert!(!replacement.abandon_generation(&ticket));
        assert!(replacement.generating);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut first = filled();
        let ticket = first.begin_generation().unwrap();

        let mut replacement = filled();
        assert!(!replacement.complete_generation(&ticket, "late".into()));
        assert_eq!(replacement.data.description, "Warm light");
    }

    #[test]
    fn validation_rejects_bad_price() {
        let mut form = filled();
        assert!(form.validate().is_ok());

        form.apply(FormPatch {
            price: Some("-1".into()),
            ..FormPatch::default()
        });
        assert!(form.validate().is_err());

        form.apply(FormPatch {
            price: Some("abc".into()),
            ..FormPatch::default()
        });
        assert!(form.validate().is_err());
    }

    #[test]
    fn random_image_points_at_placeholder_service() {
        let mut form = filled();
        form.randomize_image();
        assert!(form.data.image_url.starts_with("https://picsum.photos/400/400?random="));
    }
}
