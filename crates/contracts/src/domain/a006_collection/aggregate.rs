use crate::domain::common::{deserialize_id, Resource};
use crate::shared::finance::OpenToBuyPlan;
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Seasonal collection with its buying budget (a006)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// "SS", "AW", "Resort" ...
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Buying budget at cost
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub planned_sales: f64,
    #[serde(default)]
    pub planned_markdowns: f64,
    #[serde(default)]
    pub planned_end_inventory: f64,
    #[serde(default)]
    pub beginning_inventory: f64,
    #[serde(default)]
    pub launch_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Collection {
    /// "SS 2025" style label; falls back to the name.
    pub fn season_label(&self) -> String {
        match (self.season.as_deref(), self.year) {
            (Some(season), Some(year)) => format!("{} {}", season, year),
            (Some(season), None) => season.to_string(),
            (None, Some(year)) => year.to_string(),
            (None, None) => "—".to_string(),
        }
    }

    pub fn otb_plan(&self, on_order: f64) -> OpenToBuyPlan {
        OpenToBuyPlan {
            planned_sales: self.planned_sales,
            planned_markdowns: self.planned_markdowns,
            planned_end_inventory: self.planned_end_inventory,
            beginning_inventory: self.beginning_inventory,
            on_order,
        }
    }
}

impl Searchable for Collection {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter) || contains_ci(&self.season_label(), filter)
    }
}

impl Sortable for Collection {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "season" => (self.year, self.season.as_deref().unwrap_or(""))
                .cmp(&(other.year, other.season.as_deref().unwrap_or(""))),
            "budget" => cmp_f64(self.budget, other.budget),
            "launch_date" => self.launch_date.cmp(&other.launch_date),
            _ => cmp_str_ci(&self.name, &other.name),
        }
    }
}

impl Resource for Collection {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "collection"
    }

    fn endpoint() -> &'static str {
        "/collections"
    }

    fn element_name() -> &'static str {
        "Collection"
    }

    fn list_name() -> &'static str {
        "Collections"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otb_plan_uses_collection_figures() {
        let c = Collection {
            planned_sales: 100.0,
            planned_markdowns: 10.0,
            planned_end_inventory: 50.0,
            beginning_inventory: 40.0,
            ..Default::default()
        };
        assert_eq!(c.otb_plan(30.0).open_to_buy(), 90.0);
    }

    #[test]
    fn test_season_label() {
        let c = Collection {
            season: Some("AW".into()),
            year: Some(2025),
            ..Default::default()
        };
        assert_eq!(c.season_label(), "AW 2025");
        assert_eq!(Collection::default().season_label(), "—");
    }
}
