use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Customer profile (a001)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Retail, wholesale, VIP ...
    #[serde(default)]
    pub segment: Option<String>,
    /// Lifetime spend
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub orders_count: u32,
    /// Explicit balance from the loyalty program; derived from spend when absent
    #[serde(default)]
    pub loyalty_points: Option<u64>,
    #[serde(default)]
    pub last_order_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    pub fn label(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
            LoyaltyTier::Platinum => "Platinum",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "neutral",
            LoyaltyTier::Silver => "primary",
            LoyaltyTier::Gold => "warning",
            LoyaltyTier::Platinum => "success",
        }
    }

    pub fn from_points(points: u64, program: &LoyaltyProgram) -> Self {
        if points >= program.platinum {
            LoyaltyTier::Platinum
        } else if points >= program.gold {
            LoyaltyTier::Gold
        } else if points >= program.silver {
            LoyaltyTier::Silver
        } else {
            LoyaltyTier::Bronze
        }
    }

    pub fn next(&self) -> Option<LoyaltyTier> {
        match self {
            LoyaltyTier::Bronze => Some(LoyaltyTier::Silver),
            LoyaltyTier::Silver => Some(LoyaltyTier::Gold),
            LoyaltyTier::Gold => Some(LoyaltyTier::Platinum),
            LoyaltyTier::Platinum => None,
        }
    }
}

/// Tier thresholds in points plus the earn rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    pub silver: u64,
    pub gold: u64,
    pub platinum: u64,
    pub points_per_currency_unit: f64,
}

impl Default for LoyaltyProgram {
    fn default() -> Self {
        Self {
            silver: 500,
            gold: 2000,
            platinum: 5000,
            points_per_currency_unit: 1.0,
        }
    }
}

impl LoyaltyProgram {
    pub fn threshold(&self, tier: LoyaltyTier) -> u64 {
        match tier {
            LoyaltyTier::Bronze => 0,
            LoyaltyTier::Silver => self.silver,
            LoyaltyTier::Gold => self.gold,
            LoyaltyTier::Platinum => self.platinum,
        }
    }
}

impl Customer {
    pub fn points(&self, program: &LoyaltyProgram) -> u64 {
        match self.loyalty_points {
            Some(points) => points,
            None => (self.total_spent.max(0.0) * program.points_per_currency_unit).floor() as u64,
        }
    }

    pub fn tier(&self, program: &LoyaltyProgram) -> LoyaltyTier {
        LoyaltyTier::from_points(self.points(program), program)
    }

    /// Points missing to reach the next tier; `None` at the top tier.
    pub fn points_to_next_tier(&self, program: &LoyaltyProgram) -> Option<u64> {
        let next = self.tier(program).next()?;
        Some(program.threshold(next).saturating_sub(self.points(program)))
    }

    pub fn average_order_value(&self) -> f64 {
        if self.orders_count == 0 {
            0.0
        } else {
            self.total_spent / self.orders_count as f64
        }
    }

    pub fn location(&self) -> String {
        match (self.city.as_deref(), self.country.as_deref()) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city.to_string(),
            (None, Some(country)) => country.to_string(),
            (None, None) => "—".to_string(),
        }
    }
}

impl Searchable for Customer {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || self.email.as_deref().is_some_and(|e| contains_ci(e, filter))
            || self.phone.as_deref().is_some_and(|p| contains_ci(p, filter))
            || self.city.as_deref().is_some_and(|c| contains_ci(c, filter))
    }
}

impl Sortable for Customer {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => cmp_str_ci(
                self.email.as_deref().unwrap_or(""),
                other.email.as_deref().unwrap_or(""),
            ),
            "total_spent" => cmp_f64(self.total_spent, other.total_spent),
            "orders_count" => self.orders_count.cmp(&other.orders_count),
            "last_order_date" => self.last_order_date.cmp(&other.last_order_date),
            "average_order_value" => {
                cmp_f64(self.average_order_value(), other.average_order_value())
            }
            _ => cmp_str_ci(&self.name, &other.name),
        }
    }
}

impl Resource for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn endpoint() -> &'static str {
        "/customers"
    }

    fn element_name() -> &'static str {
        "Customer"
    }

    fn list_name() -> &'static str {
        "Customers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(total_spent: f64, points: Option<u64>, orders: u32) -> Customer {
        Customer {
            id: "c1".into(),
            name: "Ada".into(),
            total_spent,
            loyalty_points: points,
            orders_count: orders,
            ..Default::default()
        }
    }

    #[test]
    fn test_points_derived_from_spend() {
        let program = LoyaltyProgram::default();
        assert_eq!(customer(1999.9, None, 1).points(&program), 1999);
        assert_eq!(customer(1999.9, None, 1).tier(&program), LoyaltyTier::Silver);
        assert_eq!(customer(10.0, Some(6000), 1).tier(&program), LoyaltyTier::Platinum);
        assert_eq!(customer(-50.0, None, 1).points(&program), 0);
    }

    #[test]
    fn test_points_to_next_tier() {
        let program = LoyaltyProgram::default();
        assert_eq!(customer(0.0, Some(450), 1).points_to_next_tier(&program), Some(50));
        assert_eq!(customer(0.0, Some(2000), 1).points_to_next_tier(&program), Some(3000));
        assert_eq!(customer(0.0, Some(5000), 1).points_to_next_tier(&program), None);
    }

    #[test]
    fn test_average_order_value() {
        assert_eq!(customer(300.0, None, 3).average_order_value(), 100.0);
        assert_eq!(customer(300.0, None, 0).average_order_value(), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let c: Customer = serde_json::from_str(r#"{"id": 5, "name": "Bo"}"#).unwrap();
        assert_eq!(c.id, "5");
        assert_eq!(c.total_spent, 0.0);
        assert_eq!(c.location(), "—");
        assert_eq!(Customer::detail_key("5"), "a001_customer_detail_5");
    }
}
