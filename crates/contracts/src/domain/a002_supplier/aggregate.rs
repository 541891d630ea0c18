use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Supplier of fabrics, trims and finished goods (a002)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Net payment terms, days
    #[serde(default)]
    pub payment_terms_days: Option<u32>,
    #[serde(default)]
    pub lead_time_days: Option<u32>,
    /// 0..=5
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Form payload for create/update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierDto {
    pub id: Option<String>,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub payment_terms_days: Option<u32>,
    pub lead_time_days: Option<u32>,
    pub rating: Option<f64>,
    pub active: bool,
}

impl From<Supplier> for SupplierDto {
    fn from(s: Supplier) -> Self {
        Self {
            id: Some(s.id),
            name: s.name,
            contact_name: s.contact_name,
            email: s.email,
            phone: s.phone,
            country: s.country,
            payment_terms_days: s.payment_terms_days,
            lead_time_days: s.lead_time_days,
            rating: s.rating,
            active: s.active,
        }
    }
}

impl SupplierDto {
    pub fn new_active() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Supplier name is required".into());
        }
        if let Some(email) = self.email.as_deref() {
            if !email.trim().is_empty() && !email.contains('@') {
                return Err("Email address is not valid".into());
            }
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err("Rating must be between 0 and 5".into());
            }
        }
        Ok(())
    }
}

impl Searchable for Supplier {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || self.contact_name.as_deref().is_some_and(|v| contains_ci(v, filter))
            || self.email.as_deref().is_some_and(|v| contains_ci(v, filter))
            || self.country.as_deref().is_some_and(|v| contains_ci(v, filter))
    }
}

impl Sortable for Supplier {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "country" => cmp_str_ci(
                self.country.as_deref().unwrap_or(""),
                other.country.as_deref().unwrap_or(""),
            ),
            "payment_terms_days" => self.payment_terms_days.cmp(&other.payment_terms_days),
            "lead_time_days" => self.lead_time_days.cmp(&other.lead_time_days),
            "rating" => cmp_f64(self.rating.unwrap_or(0.0), other.rating.unwrap_or(0.0)),
            _ => cmp_str_ci(&self.name, &other.name),
        }
    }
}

impl Resource for Supplier {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "supplier"
    }

    fn endpoint() -> &'static str {
        "/suppliers"
    }

    fn element_name() -> &'static str {
        "Supplier"
    }

    fn list_name() -> &'static str {
        "Suppliers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut dto = SupplierDto::new_active();
        assert!(dto.validate().is_err());
        dto.name = "Mill & Co".into();
        assert!(dto.validate().is_ok());
        dto.email = Some("sales.mill.example".into());
        assert_eq!(dto.validate().unwrap_err(), "Email address is not valid");
        dto.email = Some("".into());
        dto.rating = Some(7.0);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_active_defaults_to_true() {
        let s: Supplier = serde_json::from_str(r#"{"id":"s1","name":"Mill"}"#).unwrap();
        assert!(s.active);
        let dto = SupplierDto::from(s);
        assert_eq!(dto.id.as_deref(), Some("s1"));
    }
}
