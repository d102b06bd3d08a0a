use dotenvy::dotenv;
use myshop_store::{
    Repository, Result,
    config::settings::{self, Settings},
    models::Product,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Upserts the catalogue entries listed in the settings file.
async fn seed_products(repo: &Repository, settings: &Settings) -> Result<usize> {
    for seed in &settings.products {
        repo.add_product(&Product::from(seed.clone())).await?;
    }
    Ok(settings.products.len())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;

    // 4. Open the store and make sure every collection exists
    let repo = Repository::connect(&settings)
        .await
        .inspect_err(|e| error!("Failed to initialize store: {}", e))?;

    // 5. Seed the catalogue
    let seeded = seed_products(&repo, &settings)
        .await
        .inspect_err(|e| error!("Failed to seed products: {}", e))?;
    info!("Seeded {} products from settings.", seeded);

    let catalogue = repo.get_all_products().await?;
    let orders = repo.get_all_orders().await?;
    info!(
        "Store ready: {} products, {} orders.",
        catalogue.len(),
        orders.len()
    );

    Ok(())
}
