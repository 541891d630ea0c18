use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Style / SKU master record (a003)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub collection_id: Option<String>,
    /// Retail price
    #[serde(default)]
    pub price: f64,
    /// Landed unit cost
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// "active", "draft", "discontinued"
    #[serde(default)]
    pub status: Option<String>,
}

impl Product {
    /// Gross margin on retail price, percent. `None` for non-positive prices.
    pub fn margin_percent(&self) -> Option<f64> {
        margin_percent(self.price, self.cost)
    }

    pub fn markup_percent(&self) -> Option<f64> {
        if self.cost <= 0.0 {
            None
        } else {
            Some((self.price - self.cost) / self.cost * 100.0)
        }
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("active")
    }
}

pub fn margin_percent(price: f64, cost: f64) -> Option<f64> {
    if price <= 0.0 {
        None
    } else {
        Some((price - cost) / price * 100.0)
    }
}

/// Form payload for create/update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<String>,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub collection_id: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub status: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: Some(p.id),
            sku: p.sku,
            name: p.name,
            category: p.category,
            collection_id: p.collection_id,
            price: p.price,
            cost: p.cost,
            sizes: p.sizes,
            colors: p.colors,
            status: p.status,
        }
    }
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("SKU is required".into());
        }
        if self.name.trim().is_empty() {
            return Err("Product name is required".into());
        }
        if self.price < 0.0 || self.cost < 0.0 {
            return Err("Price and cost cannot be negative".into());
        }
        Ok(())
    }
}

/// Splits a comma separated form field ("S, M ,L") into trimmed non-empty values.
pub fn parse_list_field(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Searchable for Product {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.sku, filter)
            || contains_ci(&self.name, filter)
            || self.category.as_deref().is_some_and(|c| contains_ci(c, filter))
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "sku" => cmp_str_ci(&self.sku, &other.sku),
            "category" => cmp_str_ci(
                self.category.as_deref().unwrap_or(""),
                other.category.as_deref().unwrap_or(""),
            ),
            "price" => cmp_f64(self.price, other.price),
            "cost" => cmp_f64(self.cost, other.cost),
            "margin" => cmp_f64(
                self.margin_percent().unwrap_or(f64::NAN),
                other.margin_percent().unwrap_or(f64::NAN),
            ),
            "status" => cmp_str_ci(self.status_label(), other.status_label()),
            _ => cmp_str_ci(&self.name, &other.name),
        }
    }
}

impl Resource for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.sku
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn endpoint() -> &'static str {
        "/products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_and_markup() {
        let p = Product {
            price: 100.0,
            cost: 40.0,
            ..Default::default()
        };
        assert_eq!(p.margin_percent(), Some(60.0));
        assert_eq!(p.markup_percent(), Some(150.0));
        assert_eq!(margin_percent(0.0, 10.0), None);
    }

    #[test]
    fn test_validate_and_list_field() {
        let mut dto = ProductDto {
            sku: "TS-001".into(),
            name: "Tee".into(),
            price: 20.0,
            cost: 8.0,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.cost = -1.0;
        assert!(dto.validate().is_err());
        assert_eq!(parse_list_field(" S, M ,, L "), vec!["S", "M", "L"]);
    }
}
