//! Random but reproducible datasets.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use fake::{
    Fake,
    faker::{address::en::CityName, name::en::LastName},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rand_distr::{Distribution, Normal};

use crate::dataset::{Dataset, FoodSeed, ParkSeed, RideSeed, StallSeed};

const PARK_SUFFIXES: [&str; 6] = [
    "Adventure Park",
    "Pleasure Gardens",
    "World",
    "Funland",
    "Resort",
    "Kingdom",
];

const RIDE_PREFIXES: [&str; 10] = [
    "Thunder", "Storm", "Dragon", "Phantom", "Rapid", "Crystal", "Iron", "Sky", "Shadow", "Mega",
];

const RIDE_KINDS: [&str; 8] = [
    "Coaster", "Drop", "Flume", "Spinner", "Wheel", "Swing", "Loop", "Rapids",
];

const STALL_KINDS: [&str; 6] = ["Kitchen", "Grill", "Snacks", "Diner", "Cart", "Kiosk"];

const FOODS: [(&str, bool); 20] = [
    ("Hot Dog", false),
    ("Veggie Dog", true),
    ("Burger", false),
    ("Fish and Chips", false),
    ("Candy Floss", true),
    ("Doughnuts", false),
    ("Ice Cream", false),
    ("Sorbet", true),
    ("Pizza", false),
    ("Churros", true),
    ("Pretzel", true),
    ("Popcorn", true),
    ("Nachos", true),
    ("Falafel Wrap", true),
    ("Waffles", false),
    ("Corn Dog", false),
    ("Fries", true),
    ("Toffee Apple", true),
    ("Slush", true),
    ("Lemonade", true),
];

/// Configuration for dataset generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub park_count: usize,
    pub food_count: usize,
    pub rides_per_park: RangeInclusive<usize>,
    pub stalls_per_park: RangeInclusive<usize>,
    /// Foods per stall; capped at `food_count`.
    pub foods_per_stall: RangeInclusive<usize>,
    /// Probability that a stall is generated without a park.
    pub roaming_stall_rate: f64,
    pub attendance_mean: f64,
    pub attendance_std: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            park_count: 5,
            food_count: 12,
            rides_per_park: 2..=5,
            stalls_per_park: 1..=3,
            foods_per_stall: 1..=4,
            roaming_stall_rate: 0.1,
            attendance_mean: 1_500_000.0,
            attendance_std: 600_000.0,
        }
    }
}

/// Generates valid datasets: every name reference resolves, food names are
/// unique and no stall serves the same food twice.
pub struct DatasetGenerator {
    config: GeneratorConfig,
}

impl DatasetGenerator {
    /// Creates a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates a dataset from a fixed seed. Equal seeds give equal datasets.
    pub fn generate_seeded(&self, seed: u64) -> Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Dataset {
        let parks = self.generate_parks(rng);
        let foods = self.generate_foods(rng);

        let mut rides = Vec::new();
        let mut stalls = Vec::new();
        let mut stall_names = HashSet::new();

        for park in &parks {
            rides.extend(self.generate_rides(park, rng));

            for _ in 0..rng.gen_range(self.config.stalls_per_park.clone()) {
                let park_name = if rng.gen_bool(self.config.roaming_stall_rate.clamp(0.0, 1.0)) {
                    None
                } else {
                    Some(park.park_name.clone())
                };
                stalls.push(self.generate_stall(park_name, &foods, &mut stall_names, rng));
            }
        }

        Dataset {
            parks,
            foods,
            rides,
            stalls,
        }
    }

    fn generate_parks(&self, rng: &mut impl Rng) -> Vec<ParkSeed> {
        let mut used = HashSet::new();

        (0..self.config.park_count)
            .map(|_| {
                let city: String = CityName().fake_with_rng(rng);
                let suffix = PARK_SUFFIXES[rng.gen_range(0..PARK_SUFFIXES.len())];

                ParkSeed {
                    park_name: unique_name(&mut used, format!("{city} {suffix}")),
                    year_opened: rng.gen_range(1950..=2020),
                    annual_attendance: self.sample_attendance(rng),
                }
            })
            .collect()
    }

    fn generate_foods(&self, rng: &mut impl Rng) -> Vec<FoodSeed> {
        let mut menu = FOODS.to_vec();
        menu.shuffle(rng);

        let mut used = HashSet::new();

        (0..self.config.food_count)
            .map(|i| {
                let (name, vegan) = menu[i % menu.len()];
                FoodSeed {
                    food_name: unique_name(&mut used, name.to_string()),
                    vegan_option: vegan,
                }
            })
            .collect()
    }

    fn generate_rides(&self, park: &ParkSeed, rng: &mut impl Rng) -> Vec<RideSeed> {
        let mut used = HashSet::new();

        (0..rng.gen_range(self.config.rides_per_park.clone()))
            .map(|_| {
                let prefix = RIDE_PREFIXES[rng.gen_range(0..RIDE_PREFIXES.len())];
                let kind = RIDE_KINDS[rng.gen_range(0..RIDE_KINDS.len())];

                RideSeed {
                    ride_name: unique_name(&mut used, format!("{prefix} {kind}")),
                    year_opened: rng.gen_range(park.year_opened..=2024),
                    votes: rng.gen_range(0..=50),
                    park_name: park.park_name.clone(),
                }
            })
            .collect()
    }

    fn generate_stall(
        &self,
        park_name: Option<String>,
        foods: &[FoodSeed],
        used: &mut HashSet<String>,
        rng: &mut impl Rng,
    ) -> StallSeed {
        let owner: String = LastName().fake_with_rng(rng);
        let kind = STALL_KINDS[rng.gen_range(0..STALL_KINDS.len())];

        let wanted = rng.gen_range(self.config.foods_per_stall.clone());
        let foods_served = foods
            .choose_multiple(rng, wanted.min(foods.len()))
            .map(|f| f.food_name.clone())
            .collect();

        StallSeed {
            stall_name: unique_name(used, format!("{owner}'s {kind}")),
            park_name,
            foods_served,
        }
    }

    fn sample_attendance(&self, rng: &mut impl Rng) -> i32 {
        let sampled = match Normal::new(self.config.attendance_mean, self.config.attendance_std) {
            Ok(normal) => normal.sample(rng),
            Err(_) => self.config.attendance_mean,
        };
        sampled.clamp(50_000.0, i32::MAX as f64) as i32
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `candidate`, or `candidate N` with the smallest N ≥ 2 not yet used.
fn unique_name(used: &mut HashSet<String>, candidate: String) -> String {
    let mut name = candidate.clone();
    let mut n = 2;
    while !used.insert(name.clone()) {
        name = format!("{candidate} {n}");
        n += 1;
    }
    name
}
