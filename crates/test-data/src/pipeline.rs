//! Full rebuild: drop, create, seed.

use std::time::{Duration, Instant};

use sqlx::PgPool;
use tracing::info;

use crate::dataset::Dataset;
use crate::db::{SchemaManager, SeedError, SeedSummary, Seeder};

/// Outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub summary: SeedSummary,
    /// Wall time for drop, create and seed together.
    pub elapsed: Duration,
}

/// Rebuilds the schema from scratch and seeds it.
///
/// Because every run starts from empty tables, running the pipeline again
/// with the same dataset yields the same rows rather than duplicates.
///
/// # Example
///
/// ```rust,ignore
/// let pool = DatabaseConfig::from_env()?.connect().await?;
/// let report = SeedPipeline::new(pool).run(&fixtures::test()?).await?;
/// assert_eq!(report.summary.parks, 3);
/// ```
#[derive(Clone)]
pub struct SeedPipeline {
    schema: SchemaManager,
    seeder: Seeder,
}

impl SeedPipeline {
    pub fn new(pool: PgPool) -> Self {
        Self {
            schema: SchemaManager::new(pool.clone()),
            seeder: Seeder::new(pool),
        }
    }

    /// Sets the number of rows per multi-row INSERT.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.seeder = self.seeder.with_batch_size(size);
        self
    }

    /// Drops all tables, recreates them and seeds `dataset`.
    ///
    /// A failed drop or create aborts the run before any seeding.
    pub async fn run(&self, dataset: &Dataset) -> Result<PipelineReport, SeedError> {
        let start = Instant::now();

        self.schema.drop_all().await?;
        self.schema.create_all().await?;
        let summary = self.seeder.run(dataset).await?;

        let elapsed = start.elapsed();
        info!("Pipeline finished in {} ms", elapsed.as_millis());

        Ok(PipelineReport { summary, elapsed })
    }

    pub fn schema(&self) -> &SchemaManager {
        &self.schema
    }

    pub fn seeder(&self) -> &Seeder {
        &self.seeder
    }
}
