use luxemart_storefront::{
    config::AppConfig,
    models::format_price,
    storage::{FileStore, ProductStorage},
};

/// Overwrite the stored catalog with the seed products.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let storage = ProductStorage::new(FileStore::open(&config.store_dir)?);
    let products = storage.reset()?;

    for product in &products {
        println!(
            "Seeded {} {} ({}, {})",
            product.id,
            product.name,
            product.category,
            format_price(product.price)
        );
    }
    println!(
        "Seed completed: {} products in {}",
        products.len(),
        config.store_dir.display()
    );
    Ok(())
}
