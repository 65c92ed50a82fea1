//! Seed input: records that reference each other by name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkSeed {
    pub park_name: String,
    pub year_opened: i32,
    pub annual_attendance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSeed {
    pub food_name: String,
    pub vegan_option: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideSeed {
    pub ride_name: String,
    pub year_opened: i32,
    #[serde(default)]
    pub votes: i32,
    /// Name of the park this ride belongs to.
    pub park_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StallSeed {
    pub stall_name: String,
    /// Name of the park hosting this stall, if any.
    #[serde(default)]
    pub park_name: Option<String>,
    /// Food names in the order the stall lists them.
    #[serde(default)]
    pub foods_served: Vec<String>,
}

/// A complete dataset for one seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub parks: Vec<ParkSeed>,
    #[serde(default)]
    pub foods: Vec<FoodSeed>,
    #[serde(default)]
    pub rides: Vec<RideSeed>,
    #[serde(default)]
    pub stalls: Vec<StallSeed>,
}

impl Dataset {
    /// Number of `stalls_foods` rows this dataset produces.
    pub fn join_row_count(&self) -> usize {
        self.stalls.iter().map(|s| s.foods_served.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
            && self.foods.is_empty()
            && self.rides.is_empty()
            && self.stalls.is_empty()
    }

    /// Iterates `(stall_name, food_name)` in stall order, then serving order.
    pub fn stall_food_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stalls.iter().flat_map(|stall| {
            stall
                .foods_served
                .iter()
                .map(move |food| (stall.stall_name.as_str(), food.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_shape() {
        let json = r#"{
            "parks": [{ "park_name": "Funland", "year_opened": 1990, "annual_attendance": 500000 }],
            "foods": [{ "food_name": "Pretzel", "vegan_option": true }],
            "rides": [{ "ride_name": "Loop", "year_opened": 1995, "votes": 10, "park_name": "Funland" }],
            "stalls": [{ "stall_name": "Snack Hut", "park_name": "Funland", "foods_served": ["Pretzel"] }]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();

        assert_eq!(dataset.parks[0].park_name, "Funland");
        assert!(dataset.foods[0].vegan_option);
        assert_eq!(dataset.rides[0].votes, 10);
        assert_eq!(dataset.stalls[0].park_name.as_deref(), Some("Funland"));
        assert_eq!(dataset.join_row_count(), 1);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "rides": [{ "ride_name": "Log Flume", "year_opened": 2011, "park_name": "Splash Valley" }],
            "stalls": [{ "stall_name": "Roaming Cart" }]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();

        assert!(dataset.parks.is_empty());
        assert_eq!(dataset.rides[0].votes, 0);
        assert_eq!(dataset.stalls[0].park_name, None);
        assert!(dataset.stalls[0].foods_served.is_empty());
    }

    #[test]
    fn test_stall_food_names_order() {
        let dataset = Dataset {
            stalls: vec![
                StallSeed {
                    stall_name: "A".into(),
                    park_name: None,
                    foods_served: vec!["x".into(), "y".into()],
                },
                StallSeed {
                    stall_name: "B".into(),
                    park_name: None,
                    foods_served: vec![],
                },
                StallSeed {
                    stall_name: "C".into(),
                    park_name: None,
                    foods_served: vec!["x".into()],
                },
            ],
            ..Default::default()
        };

        let pairs: Vec<_> = dataset.stall_food_names().collect();
        assert_eq!(pairs, [("A", "x"), ("A", "y"), ("C", "x")]);
        assert_eq!(dataset.join_row_count(), 3);
        assert!(!dataset.is_empty());
        assert!(Dataset::default().is_empty());
    }
}
