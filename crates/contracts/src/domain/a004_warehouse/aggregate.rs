use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Warehouse / store location (a004)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Capacity in units
    #[serde(default)]
    pub capacity: Option<u64>,
}

impl Warehouse {
    /// Occupied share of capacity, percent.
    pub fn utilization(&self, units: i64) -> Option<f64> {
        match self.capacity {
            Some(cap) if cap > 0 => Some(units.max(0) as f64 / cap as f64 * 100.0),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.code)
        }
    }
}

impl Searchable for Warehouse {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.code, filter)
            || contains_ci(&self.name, filter)
            || self.location.as_deref().is_some_and(|l| contains_ci(l, filter))
    }
}

impl Sortable for Warehouse {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => cmp_str_ci(&self.code, &other.code),
            "capacity" => self.capacity.cmp(&other.capacity),
            _ => cmp_str_ci(&self.name, &other.name),
        }
    }
}

impl Resource for Warehouse {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "warehouse"
    }

    fn endpoint() -> &'static str {
        "/warehouses"
    }

    fn element_name() -> &'static str {
        "Warehouse"
    }

    fn list_name() -> &'static str {
        "Warehouses"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization() {
        let w = Warehouse {
            capacity: Some(200),
            ..Default::default()
        };
        assert_eq!(w.utilization(50), Some(25.0));
        assert_eq!(w.utilization(-5), Some(0.0));
        assert_eq!(Warehouse::default().utilization(50), None);
    }
}
