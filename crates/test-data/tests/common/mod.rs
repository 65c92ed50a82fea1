#![allow(dead_code)]

//! Shared setup for database integration tests.
//!
//! Each test gets its own Postgres schema, so tests can drop and recreate
//! tables in parallel without seeing each other.

use std::env;

use parks::{Database, DatabaseConfig};
use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

pub struct TestDb {
    pub pool: PgPool,
    pub db: Database,
    admin: PgPool,
    schema: String,
}

/// Connects to a fresh schema, skipping tests if DATABASE_URL is not set.
pub async fn test_db() -> Option<TestDb> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let admin = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    let schema = format!("seed_test_{}", Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let pool = DatabaseConfig::new(database_url)
        .with_max_connections(2)
        .with_schema(schema.clone())
        .expect("Generated schema name should be valid")
        .connect()
        .await
        .expect("Failed to connect to test schema");

    Some(TestDb {
        db: Database::new(pool.clone()),
        pool,
        admin,
        schema,
    })
}

impl TestDb {
    /// Row counts in creation order: parks, foods, rides, stalls, stalls_foods.
    pub async fn counts(&self) -> [i64; 5] {
        let mut counts = [0; 5];
        for (i, table) in parks::models::Table::ALL.into_iter().enumerate() {
            counts[i] = self.db.count(table).await.expect("Failed to count rows");
        }
        counts
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await;
    }
}
