pub mod admin;
pub mod cart;
pub mod products;
pub mod view;
