//! Fluent builder for hand-written datasets.

use crate::dataset::{Dataset, FoodSeed, ParkSeed, RideSeed, StallSeed};

/// Builder for small datasets.
///
/// Records keep the order in which they are added. References are by name
/// and are not checked here; an unknown name fails when the dataset is
/// seeded.
///
/// # Example
///
/// ```rust
/// use test_data::builders::DatasetBuilder;
///
/// let dataset = DatasetBuilder::new()
///     .park("Funland", 1990, 500_000)
///     .food("Pretzel", true)
///     .ride("Loop", 1995, 10, "Funland")
///     .stall("Snack Hut", "Funland", ["Pretzel"])
///     .build();
///
/// assert_eq!(dataset.join_row_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    dataset: Dataset,
}

impl DatasetBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing dataset, e.g. a fixture.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Adds a park.
    pub fn park(
        mut self,
        name: impl Into<String>,
        year_opened: i32,
        annual_attendance: i32,
    ) -> Self {
        self.dataset.parks.push(ParkSeed {
            park_name: name.into(),
            year_opened,
            annual_attendance,
        });
        self
    }

    /// Adds a food.
    pub fn food(mut self, name: impl Into<String>, vegan_option: bool) -> Self {
        self.dataset.foods.push(FoodSeed {
            food_name: name.into(),
            vegan_option,
        });
        self
    }

    /// Adds a ride belonging to the park named `park_name`.
    pub fn ride(
        mut self,
        name: impl Into<String>,
        year_opened: i32,
        votes: i32,
        park_name: impl Into<String>,
    ) -> Self {
        self.dataset.rides.push(RideSeed {
            ride_name: name.into(),
            year_opened,
            votes,
            park_name: park_name.into(),
        });
        self
    }

    /// Adds a stall inside the park named `park_name`.
    pub fn stall<I, S>(
        self,
        name: impl Into<String>,
        park_name: impl Into<String>,
        foods: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stall_in(name, Some(park_name.into()), foods)
    }

    /// Adds a stall that belongs to no park.
    pub fn roaming_stall<I, S>(self, name: impl Into<String>, foods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stall_in(name, None, foods)
    }

    fn stall_in<I, S>(
        mut self,
        name: impl Into<String>,
        park_name: Option<String>,
        foods: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset.stalls.push(StallSeed {
            stall_name: name.into(),
            park_name,
            foods_served: foods.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn build(self) -> Dataset {
        self.dataset
    }
}
