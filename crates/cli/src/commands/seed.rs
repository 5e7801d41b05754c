//! Seed the catalog with generated demo products.
//!
//! Products get sequential ids (`prod-1`, `prod-2`, ...) with values drawn
//! from fixed pools of categories, prices, ratings, review counts, and
//! discounts. Re-running the command skips ids that already exist.

use rand::prelude::*;
use secrecy::SecretString;
use tracing::info;

use clementine_api::db::{self, ProductRepository};
use clementine_api::models::Product;
use clementine_core::ProductId;

const CATEGORIES: &[&str] = &[
    "electronics",
    "clothing",
    "furniture",
    "toys",
    "books",
    "appliances",
    "beauty",
    "sports",
    "automotive",
    "jewelry",
];
const PRICES: &[f64] = &[
    199.99, 299.99, 399.99, 499.99, 599.99, 699.99, 799.99, 899.99, 999.99, 1099.99,
];
const REVIEWS: &[i32] = &[10, 25, 50, 75, 100, 150, 200, 300, 500, 1000];
const RATINGS: &[f64] = &[3.5, 4.0, 4.2, 4.5, 4.7, 4.8, 4.9, 5.0, 3.8, 3.9];
const ORIGINAL_PRICES: &[f64] = &[
    249.99, 349.99, 449.99, 549.99, 649.99, 749.99, 849.99, 949.99, 1049.99, 1149.99,
];
const DISCOUNTS: &[f64] = &[5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0];

/// Generate and insert `count` demo products.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or the insert fails.
pub async fn products(count: u32) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = std::env::var("API_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "API_DATABASE_URL not set")?;

    // Connect to database
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let mut rng = rand::rng();
    let products: Vec<Product> = (1..=count).map(|i| generate(&mut rng, i)).collect();

    let inserted = ProductRepository::new(&pool).insert_many(&products).await?;

    // Print summary
    info!("Seeding complete!");
    info!("  Products generated: {}", products.len());
    info!("  Products inserted: {inserted}");
    info!(
        "  Skipped (already exist): {}",
        products.len() as u64 - inserted
    );

    Ok(())
}

/// Generate one demo product.
fn generate(rng: &mut impl Rng, index: u32) -> Product {
    Product {
        id: ProductId::new(format!("prod-{index}")),
        name: format!("Dummy Product {index}"),
        description: format!("A test product for demonstration purposes - {index}"),
        price: pick(rng, PRICES),
        category: pick(rng, CATEGORIES).to_string(),
        rating: pick(rng, RATINGS),
        reviews: pick(rng, REVIEWS),
        is_new: rng.random_bool(0.5),
        original_price: Some(pick(rng, ORIGINAL_PRICES)),
        discount: Some(pick(rng, DISCOUNTS)),
    }
}

/// Pick one value from a non-empty pool.
fn pick<T: Copy>(rng: &mut impl Rng, pool: &[T]) -> T {
    *pool.choose(rng).expect("pool is non-empty")
}
