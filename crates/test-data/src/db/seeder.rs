//! Transactional dataset seeding.

use parks::models::StallFood;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, warn};

use super::keys::{KeyMap, ResolvedKeys};
use super::SeedError;
use crate::dataset::{Dataset, FoodSeed, ParkSeed, RideSeed, StallSeed};

const DEFAULT_BATCH_SIZE: usize = 500;

/// Postgres accepts at most this many bind parameters per statement.
const MAX_BIND_PARAMS: usize = 65_535;

/// Row counts and key maps from a committed seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub parks: usize,
    pub foods: usize,
    pub rides: usize,
    pub stalls: usize,
    pub stalls_foods: usize,
    pub keys: ResolvedKeys,
}

/// Inserts a [`Dataset`] into the five tables as a single transaction.
#[derive(Clone)]
pub struct Seeder {
    pool: PgPool,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the number of rows per multi-row INSERT.
    ///
    /// Tables with many columns may get fewer rows per statement so the
    /// bind parameters stay within the Postgres limit.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Rows per INSERT for a table binding `columns` values per row.
    pub fn rows_per_statement(&self, columns: usize) -> usize {
        self.batch_size.min(MAX_BIND_PARAMS / columns.max(1))
    }

    /// Seeds the whole dataset, or nothing.
    ///
    /// Runs every insert on one pooled connection inside one transaction.
    /// On any error the transaction is rolled back, so rows inserted by
    /// earlier steps disappear too, and the error is returned unchanged.
    /// The connection goes back to the pool on every path.
    pub async fn run(&self, dataset: &Dataset) -> Result<SeedSummary, SeedError> {
        info!(
            "Seeding dataset: {} parks, {} foods, {} rides, {} stalls",
            dataset.parks.len(),
            dataset.foods.len(),
            dataset.rides.len(),
            dataset.stalls.len()
        );

        let mut tx = self.pool.begin().await?;

        match self.insert_all(&mut tx, dataset).await {
            Ok(summary) => {
                tx.commit().await?;
                info!("Seed committed");
                Ok(summary)
            }
            Err(e) => {
                error!("Seed failed, rolling back: {e}");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    async fn insert_all(
        &self,
        conn: &mut PgConnection,
        dataset: &Dataset,
    ) -> Result<SeedSummary, SeedError> {
        // Independent entities first; their ids feed the dependent inserts.
        let (parks, park_keys) = self.insert_parks(conn, &dataset.parks).await?;
        let (foods, food_keys) = self.insert_foods(conn, &dataset.foods).await?;

        let rides = self.insert_rides(conn, &dataset.rides, &park_keys).await?;
        let (stall_ids, stall_keys) = self
            .insert_stalls(conn, &dataset.stalls, &park_keys)
            .await?;

        // Stall ids are taken by position, so repeated stall names still
        // keep their own foods.
        let pairs = resolve_stall_foods(&dataset.stalls, &stall_ids, &food_keys)?;
        let stalls_foods = self.insert_stalls_foods(conn, &pairs).await?;

        Ok(SeedSummary {
            parks,
            foods,
            rides,
            stalls: stall_ids.len(),
            stalls_foods,
            keys: ResolvedKeys {
                parks: park_keys,
                foods: food_keys,
                stalls: stall_keys,
            },
        })
    }

    /// Inserts parks, returning the row count and the park name map.
    async fn insert_parks(
        &self,
        conn: &mut PgConnection,
        parks: &[ParkSeed],
    ) -> Result<(usize, KeyMap), SeedError> {
        info!("Seeding {} parks...", parks.len());

        let mut keys = KeyMap::new("park");
        let mut inserted = 0;

        for chunk in parks.chunks(self.rows_per_statement(3)) {
            let mut qb: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO parks (park_name, year_opened, annual_attendance) ");
            qb.push_values(chunk, |mut row, park| {
                row.push_bind(park.park_name.as_str())
                    .push_bind(park.year_opened)
                    .push_bind(park.annual_attendance);
            });
            qb.push(" RETURNING park_id, park_name");

            let rows: Vec<(i32, String)> = qb.build_query_as().fetch_all(&mut *conn).await?;
            inserted += rows.len();
            keys.extend(rows);
        }

        info!("Seeded {} parks", inserted);
        Ok((inserted, keys))
    }

    /// Inserts foods, returning the row count and the food name map.
    ///
    /// Duplicate names are rejected by the `foods.food_name` unique
    /// constraint.
    async fn insert_foods(
        &self,
        conn: &mut PgConnection,
        foods: &[FoodSeed],
    ) -> Result<(usize, KeyMap), SeedError> {
        info!("Seeding {} foods...", foods.len());

        let mut keys = KeyMap::new("food");
        let mut inserted = 0;

        for chunk in foods.chunks(self.rows_per_statement(2)) {
            let mut qb: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO foods (food_name, vegan_option) ");
            qb.push_values(chunk, |mut row, food| {
                row.push_bind(food.food_name.as_str())
                    .push_bind(food.vegan_option);
            });
            qb.push(" RETURNING food_id, food_name");

            let rows: Vec<(i32, String)> = qb.build_query_as().fetch_all(&mut *conn).await?;
            inserted += rows.len();
            keys.extend(rows);
        }

        info!("Seeded {} foods", inserted);
        Ok((inserted, keys))
    }

    /// Inserts rides with their park names swapped for park ids.
    async fn insert_rides(
        &self,
        conn: &mut PgConnection,
        rides: &[RideSeed],
        parks: &KeyMap,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} rides...", rides.len());

        let resolved = rides
            .iter()
            .map(|ride| {
                parks
                    .resolve(&ride.park_name, || format!("ride {:?}", ride.ride_name))
                    .map(|park_id| (ride, park_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut inserted = 0;

        for chunk in resolved.chunks(self.rows_per_statement(4)) {
            let mut qb: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO rides (ride_name, year_opened, votes, park_id) ");
            qb.push_values(chunk, |mut row, (ride, park_id)| {
                row.push_bind(ride.ride_name.as_str())
                    .push_bind(ride.year_opened)
                    .push_bind(ride.votes)
                    .push_bind(*park_id);
            });

            let result = qb.build().execute(&mut *conn).await?;
            inserted += result.rows_affected() as usize;
        }

        info!("Seeded {} rides", inserted);
        Ok(inserted)
    }

    /// Inserts stalls, returning their ids in input order and the stall
    /// name map.
    ///
    /// A stall without a park name is stored with a NULL `park_id`.
    async fn insert_stalls(
        &self,
        conn: &mut PgConnection,
        stalls: &[StallSeed],
        parks: &KeyMap,
    ) -> Result<(Vec<i32>, KeyMap), SeedError> {
        info!("Seeding {} stalls...", stalls.len());

        let resolved = stalls
            .iter()
            .map(|stall| {
                stall
                    .park_name
                    .as_deref()
                    .map(|name| parks.resolve(name, || format!("stall {:?}", stall.stall_name)))
                    .transpose()
                    .map(|park_id| (stall, park_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut keys = KeyMap::new("stall");
        let mut ids = Vec::with_capacity(stalls.len());

        for chunk in resolved.chunks(self.rows_per_statement(2)) {
            let mut qb: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO stalls (stall_name, park_id) ");
            qb.push_values(chunk, |mut row, (stall, park_id)| {
                row.push_bind(stall.stall_name.as_str()).push_bind(*park_id);
            });
            qb.push(" RETURNING stall_id");

            // Serial ids are drawn in VALUES order; RETURNING order is not
            // guaranteed, so sort before pairing with the chunk.
            let mut chunk_ids: Vec<i32> = qb.build_query_scalar().fetch_all(&mut *conn).await?;
            chunk_ids.sort_unstable();

            keys.extend(
                chunk_ids
                    .iter()
                    .zip(chunk)
                    .map(|(id, (stall, _))| (*id, stall.stall_name.clone())),
            );
            ids.extend(chunk_ids);
        }

        info!("Seeded {} stalls", ids.len());
        Ok((ids, keys))
    }

    /// Inserts all join rows in a single statement. Empty input is a no-op.
    async fn insert_stalls_foods(
        &self,
        conn: &mut PgConnection,
        pairs: &[StallFood],
    ) -> Result<usize, SeedError> {
        if pairs.is_empty() {
            debug!("No stall foods to seed");
            return Ok(0);
        }

        info!("Seeding {} stall foods...", pairs.len());

        let (stall_ids, food_ids): (Vec<i32>, Vec<i32>) =
            pairs.iter().map(|p| (p.stall_id, p.food_id)).unzip();

        let result = sqlx::query(
            r#"
            INSERT INTO stalls_foods (stall_id, food_id)
            SELECT * FROM UNNEST($1::int[], $2::int[])
            "#,
        )
        .bind(stall_ids)
        .bind(food_ids)
        .execute(&mut *conn)
        .await?;

        let inserted = result.rows_affected() as usize;
        info!("Seeded {} stall foods", inserted);
        Ok(inserted)
    }
}

/// Flattens each stall's served foods into `(stall_id, food_id)` pairs, in
/// stall order then serving order.
///
/// `stall_ids[i]` is the id stored for `stalls[i]`.
pub fn resolve_stall_foods(
    stalls: &[StallSeed],
    stall_ids: &[i32],
    foods: &KeyMap,
) -> Result<Vec<StallFood>, SeedError> {
    let mut pairs = Vec::with_capacity(stalls.iter().map(|s| s.foods_served.len()).sum());

    for (stall, &stall_id) in stalls.iter().zip(stall_ids) {
        for food in &stall.foods_served {
            let food_id = foods.resolve(food, || format!("stall {:?}", stall.stall_name))?;
            pairs.push(StallFood { stall_id, food_id });
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stall(name: &str, foods: &[&str]) -> StallSeed {
        StallSeed {
            stall_name: name.to_string(),
            park_name: None,
            foods_served: foods.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn foods() -> KeyMap {
        KeyMap::from_rows(
            "food",
            [
                (10, "Pretzel".to_string()),
                (11, "Hot Dog".to_string()),
                (12, "Lemonade".to_string()),
            ],
        )
    }

    fn seeder(batch_size: usize) -> Seeder {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/parks")
            .unwrap();
        Seeder::new(pool).with_batch_size(batch_size)
    }

    #[test]
    fn test_resolve_stall_foods() {
        let stalls = vec![
            stall("Snack Hut", &["Pretzel"]),
            stall("Cove Diner", &["Hot Dog", "Lemonade"]),
        ];

        let pairs = resolve_stall_foods(&stalls, &[100, 101], &foods()).unwrap();
        assert_eq!(
            pairs,
            vec![
                StallFood { stall_id: 100, food_id: 10 },
                StallFood { stall_id: 101, food_id: 11 },
                StallFood { stall_id: 101, food_id: 12 },
            ]
        );
    }

    #[test]
    fn test_repeated_stall_names_keep_their_foods() {
        let stalls = vec![stall("Kiosk", &["Pretzel"]), stall("Kiosk", &["Hot Dog"])];

        let pairs = resolve_stall_foods(&stalls, &[1, 2], &foods()).unwrap();
        assert_eq!(
            pairs,
            vec![
                StallFood { stall_id: 1, food_id: 10 },
                StallFood { stall_id: 2, food_id: 11 },
            ]
        );
    }

    #[test]
    fn test_resolve_stall_foods_empty() {
        let stalls = vec![stall("Snack Hut", &[])];
        assert!(resolve_stall_foods(&stalls, &[100], &foods()).unwrap().is_empty());
        assert!(resolve_stall_foods(&[], &[], &foods()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_stall_foods_unknown_food() {
        let stalls = vec![stall("Snack Hut", &["Pretzel", "Caviar"])];
        let err = resolve_stall_foods(&stalls, &[100], &foods()).unwrap_err();

        match err {
            SeedError::UnresolvedReference {
                entity,
                name,
                referenced_by,
            } => {
                assert_eq!(entity, "food");
                assert_eq!(name, "Caviar");
                assert_eq!(referenced_by, "stall \"Snack Hut\"");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_serving_kept_for_constraint() {
        // The composite key rejects this on insert; resolution passes it through.
        let stalls = vec![stall("Snack Hut", &["Pretzel", "Pretzel"])];
        let pairs = resolve_stall_foods(&stalls, &[100], &foods()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], pairs[1]);
    }

    #[tokio::test]
    async fn test_rows_per_statement_respects_bind_limit() {
        let small = seeder(500);
        assert_eq!(small.rows_per_statement(4), 500);

        let large = seeder(20_000);
        assert_eq!(large.batch_size(), 20_000);
        assert_eq!(large.rows_per_statement(4), 16_383);
        assert_eq!(large.rows_per_statement(3), 20_000);
        assert!(large.rows_per_statement(4) * 4 <= MAX_BIND_PARAMS);

        assert_eq!(seeder(0).rows_per_statement(2), 1);
    }
}
