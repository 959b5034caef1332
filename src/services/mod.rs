pub mod admin_form;
pub mod cart_service;
pub mod catalog_service;
pub mod description_service;
pub mod view_router;
