use crate::models::Product;

/// Catalog written on first run when no durable catalog exists.
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Minimalist Leather Watch",
            129.99,
            "Accessories",
            "A sleek, genuine leather watch featuring a minimalist dial and water resistance. Perfect for both casual and formal occasions.",
        ),
        product(
            "2",
            "Wireless Noise-Canceling Headphones",
            249.50,
            "Electronics",
            "Immerse yourself in music with active noise cancellation, 30-hour battery life, and ultra-comfortable ear cushions.",
        ),
        product(
            "3",
            "Ceramic Pour-Over Coffee Set",
            45.00,
            "Home",
            "Handcrafted ceramic pour-over set for the perfect morning brew. Includes dripper and serving carafe with a matte finish.",
        ),
        product(
            "4",
            "Ergonomic Office Chair",
            350.00,
            "Furniture",
            "Designed for all-day comfort with breathable mesh, adjustable lumbar support, and 4D armrests.",
        ),
    ]
}

fn product(id: &str, name: &str, price: f64, category: &str, description: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        category: category.to_string(),
        description: description.to_string(),
        image_url: format!("https://picsum.photos/400/400?random={id}"),
    }
}
