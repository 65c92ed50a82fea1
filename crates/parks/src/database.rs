use crate::errors::DbError;
use crate::models::{Food, Park, Ride, Stall, StallFood, Table};
use sqlx::PgPool;

/// Read-side access to a seeded schema.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn count(&self, table: Table) -> Result<i64, DbError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;

        Ok(count)
    }

    /// Whether `table` is visible on the current search path.
    pub async fn table_exists(&self, table: Table) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(table.name())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub async fn parks(&self) -> Result<Vec<Park>, DbError> {
        let parks = sqlx::query_as(
            r#"
            SELECT park_id, park_name, year_opened, annual_attendance
            FROM parks
            ORDER BY park_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(parks)
    }

    pub async fn foods(&self) -> Result<Vec<Food>, DbError> {
        let foods = sqlx::query_as(
            r#"
            SELECT food_id, food_name, vegan_option
            FROM foods
            ORDER BY food_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(foods)
    }

    pub async fn rides(&self) -> Result<Vec<Ride>, DbError> {
        let rides = sqlx::query_as(
            r#"
            SELECT ride_id, park_id, ride_name, year_opened, votes
            FROM rides
            ORDER BY ride_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    pub async fn stalls(&self) -> Result<Vec<Stall>, DbError> {
        let stalls = sqlx::query_as(
            r#"
            SELECT stall_id, stall_name, park_id
            FROM stalls
            ORDER BY stall_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stalls)
    }

    pub async fn stalls_foods(&self) -> Result<Vec<StallFood>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT stall_id, food_id
            FROM stalls_foods
            ORDER BY stall_id, food_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns `(ride_name, park_name)` for every ride.
    pub async fn ride_parks(&self) -> Result<Vec<(String, String)>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT r.ride_name, p.park_name
            FROM rides r
            JOIN parks p ON p.park_id = r.park_id
            ORDER BY r.ride_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns `(stall_name, food_name)` for every row of the join table.
    pub async fn stall_foods(&self) -> Result<Vec<(String, String)>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT s.stall_name, f.food_name
            FROM stalls_foods sf
            JOIN stalls s ON s.stall_id = sf.stall_id
            JOIN foods f ON f.food_id = sf.food_id
            ORDER BY sf.stall_id, sf.food_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
