use crate::shared::list::contains_ci;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QcStatus {
    #[default]
    Pending,
    Passed,
    Failed,
    OnHold,
}

impl QcStatus {
    pub fn all() -> [QcStatus; 4] {
        [
            QcStatus::Pending,
            QcStatus::Passed,
            QcStatus::Failed,
            QcStatus::OnHold,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            QcStatus::Pending => "Pending",
            QcStatus::Passed => "Passed",
            QcStatus::Failed => "Failed",
            QcStatus::OnHold => "On hold",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            QcStatus::Pending => "neutral",
            QcStatus::Passed => "success",
            QcStatus::Failed => "error",
            QcStatus::OnHold => "warning",
        }
    }
}

/// Supplier lot of a material consumed by a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialLot {
    pub material_id: Option<String>,
    pub material_name: String,
    pub supplier_id: Option<String>,
    pub supplier_lot: String,
    pub quantity: f64,
}

/// Finished goods produced together, traceable to the lots they consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub batch_number: String,
    pub production_order_id: String,
    pub product_id: Option<String>,
    pub quantity: u32,
    /// YYYY-MM-DD
    pub produced_at: Option<String>,
    pub materials: Vec<MaterialLot>,
    pub qc_status: QcStatus,
}

impl Batch {
    pub fn uses_lot(&self, supplier_lot: &str) -> bool {
        self.materials
            .iter()
            .any(|m| m.supplier_lot.trim().eq_ignore_ascii_case(supplier_lot.trim()))
    }

    pub fn uses_material(&self, material: &str) -> bool {
        let material = material.trim();
        self.materials.iter().any(|m| {
            m.material_id.as_deref() == Some(material)
                || m.material_name.eq_ignore_ascii_case(material)
        })
    }
}

/// "MO-0042-B003"
pub fn generate_batch_number(order_number: &str, seq: u32) -> String {
    format!("{}-B{:03}", order_number, seq)
}

/// Next batch sequence of an order (1-based).
pub fn next_sequence(batches: &[Batch], production_order_id: &str) -> u32 {
    batches
        .iter()
        .filter(|b| b.production_order_id == production_order_id)
        .count() as u32
        + 1
}

/// Forward and backward lookups over recorded batches.
pub struct Traceability<'a> {
    batches: &'a [Batch],
}

impl<'a> Traceability<'a> {
    pub fn new(batches: &'a [Batch]) -> Self {
        Self { batches }
    }

    /// Batches that consumed a supplier lot (recall scope).
    pub fn by_supplier_lot(&self, supplier_lot: &str) -> Vec<&'a Batch> {
        self.batches.iter().filter(|b| b.uses_lot(supplier_lot)).collect()
    }

    /// Batches that consumed a material, by id or name.
    pub fn by_material(&self, material: &str) -> Vec<&'a Batch> {
        self.batches.iter().filter(|b| b.uses_material(material)).collect()
    }

    pub fn by_order(&self, production_order_id: &str) -> Vec<&'a Batch> {
        self.batches
            .iter()
            .filter(|b| b.production_order_id == production_order_id)
            .collect()
    }

    /// Free-text search over batch numbers, lots and materials.
    pub fn search(&self, query: &str) -> Vec<&'a Batch> {
        let query = query.trim();
        if query.is_empty() {
            return self.batches.iter().collect();
        }
        self.batches
            .iter()
            .filter(|b| {
                contains_ci(&b.batch_number, query)
                    || b.materials.iter().any(|m| {
                        contains_ci(&m.supplier_lot, query) || contains_ci(&m.material_name, query)
                    })
            })
            .collect()
    }

    /// Distinct suppliers whose lots went into a batch.
    pub fn suppliers_of(batch: &Batch) -> Vec<String> {
        let mut suppliers: Vec<String> = batch
            .materials
            .iter()
            .filter_map(|m| m.supplier_id.clone())
            .collect();
        suppliers.sort();
        suppliers.dedup();
        suppliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(material: &str, supplier: &str, lot: &str) -> MaterialLot {
        MaterialLot {
            material_id: Some(material.to_lowercase()),
            material_name: material.into(),
            supplier_id: Some(supplier.into()),
            supplier_lot: lot.into(),
            quantity: 10.0,
        }
    }

    fn batches() -> Vec<Batch> {
        vec![
            Batch {
                batch_number: generate_batch_number("MO-1", 1),
                production_order_id: "mo1".into(),
                quantity: 50,
                materials: vec![lot("Denim", "s1", "DN-2401"), lot("Rivets", "s2", "RV-77")],
                ..Default::default()
            },
            Batch {
                batch_number: generate_batch_number("MO-1", 2),
                production_order_id: "mo1".into(),
                quantity: 40,
                materials: vec![lot("Denim", "s1", "DN-2402")],
                ..Default::default()
            },
            Batch {
                batch_number: generate_batch_number("MO-2", 1),
                production_order_id: "mo2".into(),
                quantity: 20,
                materials: vec![lot("Rivets", "s2", "RV-77")],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_batch_number() {
        assert_eq!(generate_batch_number("MO-0042", 3), "MO-0042-B003");
        assert_eq!(generate_batch_number("MO-1", 1234), "MO-1-B1234");
        assert_eq!(next_sequence(&batches(), "mo1"), 3);
        assert_eq!(next_sequence(&[], "mo1"), 1);
    }

    #[test]
    fn test_trace_queries() {
        let all = batches();
        let trace = Traceability::new(&all);
        let numbers = |v: Vec<&Batch>| v.iter().map(|b| b.batch_number.clone()).collect::<Vec<_>>();

        assert_eq!(numbers(trace.by_supplier_lot("rv-77")), vec!["MO-1-B001", "MO-2-B001"]);
        assert_eq!(trace.by_material("denim").len(), 2);
        assert_eq!(trace.by_material("Denim").len(), 2);
        assert_eq!(numbers(trace.by_order("mo2")), vec!["MO-2-B001"]);
        assert_eq!(trace.search("2402").len(), 1);
        assert_eq!(trace.search("").len(), 3);
        assert_eq!(Traceability::suppliers_of(&all[0]), vec!["s1", "s2"]);
    }
}
