//! Table creation and teardown.

use parks::models::Table;
use sqlx::PgPool;
use tracing::{debug, info};

use super::SeedError;

/// CREATE statement for `table`.
pub fn ddl(table: Table) -> &'static str {
    match table {
        Table::Parks => {
            r#"
            CREATE TABLE parks (
                park_id SERIAL PRIMARY KEY,
                park_name VARCHAR NOT NULL,
                year_opened INT NOT NULL,
                annual_attendance INT NOT NULL
            )
            "#
        }
        Table::Foods => {
            r#"
            CREATE TABLE foods (
                food_id SERIAL PRIMARY KEY,
                food_name VARCHAR UNIQUE NOT NULL,
                vegan_option BOOLEAN NOT NULL
            )
            "#
        }
        Table::Rides => {
            r#"
            CREATE TABLE rides (
                ride_id SERIAL PRIMARY KEY,
                park_id INT NOT NULL REFERENCES parks(park_id),
                ride_name VARCHAR NOT NULL,
                year_opened INT NOT NULL,
                votes INT DEFAULT 0 NOT NULL
            )
            "#
        }
        Table::Stalls => {
            r#"
            CREATE TABLE stalls (
                stall_id SERIAL PRIMARY KEY,
                stall_name VARCHAR NOT NULL,
                park_id INT REFERENCES parks(park_id)
            )
            "#
        }
        Table::StallsFoods => {
            r#"
            CREATE TABLE stalls_foods (
                stall_id INT NOT NULL REFERENCES stalls(stall_id),
                food_id INT NOT NULL REFERENCES foods(food_id),
                PRIMARY KEY (stall_id, food_id)
            )
            "#
        }
    }
}

/// Creates and drops the five tables.
#[derive(Clone)]
pub struct SchemaManager {
    pool: PgPool,
}

impl SchemaManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drops every table that exists, children first.
    ///
    /// Stops at the first failing statement; tables later in the order are
    /// left in place.
    pub async fn drop_all(&self) -> Result<(), SeedError> {
        for table in Table::drop_order() {
            let sql = format!("DROP TABLE IF EXISTS {}", table.name());
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| SeedError::ddl(table.name(), e))?;
            debug!("Dropped table {}", table);
        }

        info!("Dropped all tables");
        Ok(())
    }

    /// Creates every table, parents first.
    ///
    /// Fails on the first statement that errors, including when a table
    /// already exists. No cleanup of already-created tables is attempted.
    pub async fn create_all(&self) -> Result<(), SeedError> {
        for table in Table::ALL {
            sqlx::query(ddl(table))
                .execute(&self.pool)
                .await
                .map_err(|e| SeedError::ddl(table.name(), e))?;
            debug!("Created table {}", table);
        }

        info!("Created all tables");
        Ok(())
    }

    /// Tables not present on the current search path.
    pub async fn missing_tables(&self) -> Result<Vec<Table>, SeedError> {
        let mut missing = Vec::new();

        for table in Table::ALL {
            let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
                .bind(table.name())
                .fetch_one(&self.pool)
                .await?;
            if !exists {
                missing.push(table);
            }
        }

        Ok(missing)
    }
}
