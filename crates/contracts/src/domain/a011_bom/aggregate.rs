use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Material line of a bill of materials, per finished unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub material_id: Option<String>,
    #[serde(default)]
    pub material_name: String,
    /// Unit of measure ("m", "pcs", "kg" ...)
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    /// Cutting/production waste in percent
    #[serde(default)]
    pub wastage_pct: f64,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub supplier_id: Option<String>,
}

impl BomLine {
    pub fn effective_quantity(&self) -> f64 {
        self.quantity * (1.0 + self.wastage_pct / 100.0)
    }

    pub fn extended_cost(&self) -> f64 {
        self.effective_quantity() * self.unit_cost
    }

    fn material_key(&self) -> String {
        self.material_id
            .clone()
            .unwrap_or_else(|| self.material_name.trim().to_lowercase())
    }
}

/// Total quantity of one material needed for a production run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub material_id: Option<String>,
    pub material_name: String,
    pub uom: Option<String>,
    pub quantity: f64,
    pub cost: f64,
}

/// Bill of materials of a finished product (a011)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Labour cost per unit
    #[serde(default)]
    pub labour_cost: f64,
    /// Overhead per unit
    #[serde(default)]
    pub overhead_cost: f64,
    #[serde(default)]
    pub lines: Vec<BomLine>,
}

impl Bom {
    pub fn material_cost(&self) -> f64 {
        self.lines.iter().map(BomLine::extended_cost).sum()
    }

    /// Full cost of one finished unit.
    pub fn unit_cost(&self) -> f64 {
        self.material_cost() + self.labour_cost + self.overhead_cost
    }

    pub fn batch_cost(&self, units: u32) -> f64 {
        self.unit_cost() * units as f64
    }

    /// Materials needed for `units` finished units, wastage included.
    /// Lines of the same material are merged; order of first appearance is kept.
    pub fn requirements(&self, units: u32) -> Vec<MaterialRequirement> {
        let mut result: Vec<(String, MaterialRequirement)> = Vec::new();
        for line in &self.lines {
            let key = line.material_key();
            let quantity = line.effective_quantity() * units as f64;
            let cost = line.extended_cost() * units as f64;
            match result.iter_mut().find(|(k, _)| *k == key) {
                Some((_, req)) => {
                    req.quantity += quantity;
                    req.cost += cost;
                }
                None => result.push((
                    key,
                    MaterialRequirement {
                        material_id: line.material_id.clone(),
                        material_name: line.material_name.clone(),
                        uom: line.uom.clone(),
                        quantity,
                        cost,
                    },
                )),
            }
        }
        result.into_iter().map(|(_, req)| req).collect()
    }

    /// Gross margin in percent at a selling price.
    pub fn margin_at(&self, price: f64) -> Option<f64> {
        if price <= 0.0 {
            return None;
        }
        Some((price - self.unit_cost()) / price * 100.0)
    }

    pub fn product_label(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.product_id.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("BOM code is required".into());
        }
        if self.lines.is_empty() {
            return Err("BOM must have at least one material".into());
        }
        for line in &self.lines {
            if line.material_name.trim().is_empty() && line.material_id.is_none() {
                return Err("Material is required on every line".into());
            }
            if !(line.quantity > 0.0) {
                return Err(format!("Quantity of {} must be positive", line.material_name));
            }
            if line.wastage_pct < 0.0 || line.unit_cost < 0.0 {
                return Err(format!(
                    "Wastage and cost of {} cannot be negative",
                    line.material_name
                ));
            }
        }
        Ok(())
    }
}

impl Searchable for Bom {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.code, filter)
            || self.product_name.as_deref().is_some_and(|n| contains_ci(n, filter))
            || self.lines.iter().any(|l| contains_ci(&l.material_name, filter))
    }
}

impl Sortable for Bom {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "product" => cmp_str_ci(&self.product_label(), &other.product_label()),
            "materials" => self.lines.len().cmp(&other.lines.len()),
            "material_cost" => cmp_f64(self.material_cost(), other.material_cost()),
            "unit_cost" => cmp_f64(self.unit_cost(), other.unit_cost()),
            _ => cmp_str_ci(&self.code, &other.code),
        }
    }
}

impl Resource for Bom {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn aggregate_index() -> &'static str {
        "a011"
    }

    fn collection_name() -> &'static str {
        "bom"
    }

    fn endpoint() -> &'static str {
        "/bom"
    }

    fn element_name() -> &'static str {
        "Bill of materials"
    }

    fn list_name() -> &'static str {
        "Bills of materials"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, name: &str, qty: f64, wastage: f64, cost: f64) -> BomLine {
        BomLine {
            material_id: Some(id.into()),
            material_name: name.into(),
            quantity: qty,
            wastage_pct: wastage,
            unit_cost: cost,
            ..Default::default()
        }
    }

    fn bom() -> Bom {
        Bom {
            id: "b1".into(),
            code: "BOM-TEE".into(),
            labour_cost: 3.0,
            overhead_cost: 1.0,
            lines: vec![
                line("m1", "Jersey", 1.5, 10.0, 4.0),
                line("m2", "Thread", 20.0, 0.0, 0.01),
                line("m1", "Jersey", 0.5, 10.0, 4.0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_cost_rollup() {
        let b = bom();
        let first = &b.lines[0];
        assert!((first.effective_quantity() - 1.65).abs() < 1e-9);
        assert!((first.extended_cost() - 6.6).abs() < 1e-9);
        assert!((b.material_cost() - 9.0).abs() < 1e-9);
        assert!((b.unit_cost() - 13.0).abs() < 1e-9);
        assert!((b.batch_cost(10) - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_requirements_merge_materials() {
        let reqs = bom().requirements(100);
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].material_name, "Jersey");
        assert!((reqs[0].quantity - 220.0).abs() < 1e-9);
        assert!((reqs[1].quantity - 2000.0).abs() < 1e-9);
        assert!(bom().requirements(0).iter().all(|r| r.quantity == 0.0));
    }

    #[test]
    fn test_margin() {
        let b = bom();
        assert!((b.margin_at(26.0).unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(b.margin_at(0.0), None);
        assert!(b.margin_at(10.0).unwrap() < 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(bom().validate().is_ok());
        let mut b = bom();
        b.lines[1].quantity = 0.0;
        assert_eq!(b.validate().unwrap_err(), "Quantity of Thread must be positive");
        b.lines.clear();
        assert!(b.validate().is_err());
    }
}
