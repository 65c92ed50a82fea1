use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Park {
    pub park_id: i32,
    pub park_name: String,
    pub year_opened: i32,
    pub annual_attendance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub food_id: i32,
    pub food_name: String,
    pub vegan_option: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub ride_id: i32,
    pub park_id: i32,
    pub ride_name: String,
    pub year_opened: i32,
    pub votes: i32,
}

/// A food stall. Stalls outside any park have no `park_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Stall {
    pub stall_id: i32,
    pub stall_name: String,
    pub park_id: Option<i32>,
}

/// Row of the `stalls_foods` join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct StallFood {
    pub stall_id: i32,
    pub food_id: i32,
}

/// The five tables of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Parks,
    Foods,
    Rides,
    Stalls,
    StallsFoods,
}

impl Table {
    /// All tables, parents before children. Creation must follow this order.
    pub const ALL: [Table; 5] = [
        Table::Parks,
        Table::Foods,
        Table::Rides,
        Table::Stalls,
        Table::StallsFoods,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Parks => "parks",
            Table::Foods => "foods",
            Table::Rides => "rides",
            Table::Stalls => "stalls",
            Table::StallsFoods => "stalls_foods",
        }
    }

    /// All tables, children before parents.
    pub fn drop_order() -> [Table; 5] {
        let mut tables = Self::ALL;
        tables.reverse();
        tables
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(tables: &[Table], table: Table) -> usize {
        tables.iter().position(|t| *t == table).unwrap()
    }

    #[test]
    fn test_creation_order_parents_first() {
        let order = Table::ALL;
        assert!(position(&order, Table::Parks) < position(&order, Table::Rides));
        assert!(position(&order, Table::Parks) < position(&order, Table::Stalls));
        assert!(position(&order, Table::Stalls) < position(&order, Table::StallsFoods));
        assert!(position(&order, Table::Foods) < position(&order, Table::StallsFoods));
    }

    #[test]
    fn test_drop_order_children_first() {
        let order = Table::drop_order();
        assert_eq!(order[0], Table::StallsFoods);
        assert!(position(&order, Table::Rides) < position(&order, Table::Parks));
        assert!(position(&order, Table::Stalls) < position(&order, Table::Parks));
        assert!(position(&order, Table::Stalls) < position(&order, Table::Foods));
    }

    #[test]
    fn test_table_names() {
        let names: Vec<&str> = Table::ALL.iter().map(Table::name).collect();
        assert_eq!(names, ["parks", "foods", "rides", "stalls", "stalls_foods"]);
        assert_eq!(Table::StallsFoods.to_string(), "stalls_foods");
    }
}
