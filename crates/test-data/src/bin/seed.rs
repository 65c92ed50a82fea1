//! Default seed script - rebuilds the schema and loads a dataset
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! SEED_DATASET=generated SEED_GENERATOR_SEED=7 cargo run -p test-data --bin seed
//! ```

use parks::DatabaseConfig;
use test_data::config::SeedConfig;
use test_data::pipeline::SeedPipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    parks::config::load_env_file(".")?;
    let db_config = DatabaseConfig::from_env()?;
    let seed_config = SeedConfig::from_env()?;

    let dataset = seed_config.dataset.load()?;
    tracing::info!("Loaded dataset from {:?}", seed_config.dataset);

    let pool = db_config.connect().await?;

    let result = SeedPipeline::new(pool.clone())
        .with_batch_size(seed_config.batch_size)
        .run(&dataset)
        .await;

    // Close the pool whether or not the run succeeded
    pool.close().await;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Seeding failed: {e}");
            return Err(e.into());
        }
    };

    // Summary output
    let summary = &report.summary;
    tracing::info!("Seed completed in {} ms", report.elapsed.as_millis());
    tracing::info!("  Parks: {}", summary.parks);
    tracing::info!("  Foods: {}", summary.foods);
    tracing::info!("  Rides: {}", summary.rides);
    tracing::info!("  Stalls: {}", summary.stalls);
    tracing::info!("  Stall foods: {}", summary.stalls_foods);

    Ok(())
}
