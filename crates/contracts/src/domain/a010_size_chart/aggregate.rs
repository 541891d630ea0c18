use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    #[default]
    Cm,
    #[serde(alias = "in", alias = "inches")]
    Inch,
}

impl MeasurementUnit {
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementUnit::Cm => "cm",
            MeasurementUnit::Inch => "in",
        }
    }

    pub fn other(&self) -> MeasurementUnit {
        match self {
            MeasurementUnit::Cm => MeasurementUnit::Inch,
            MeasurementUnit::Inch => MeasurementUnit::Cm,
        }
    }

    pub fn convert(value: f64, from: MeasurementUnit, to: MeasurementUnit) -> f64 {
        match (from, to) {
            (MeasurementUnit::Cm, MeasurementUnit::Inch) => value / CM_PER_INCH,
            (MeasurementUnit::Inch, MeasurementUnit::Cm) => value * CM_PER_INCH,
            _ => value,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sizing system a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeRegion {
    #[default]
    Us,
    Uk,
    Eu,
    It,
    Fr,
    Jp,
}

/// Women's apparel conversion table, smallest size first.
const SIZE_TABLE_ROWS: usize = 9;
const ALPHA_LABELS: [&str; SIZE_TABLE_ROWS] = ["XS", "S", "S", "M", "M", "L", "L", "XL", "XXL"];

impl SizeRegion {
    pub fn all() -> [SizeRegion; 6] {
        [
            SizeRegion::Us,
            SizeRegion::Uk,
            SizeRegion::Eu,
            SizeRegion::It,
            SizeRegion::Fr,
            SizeRegion::Jp,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            SizeRegion::Us => "US",
            SizeRegion::Uk => "UK",
            SizeRegion::Eu => "EU",
            SizeRegion::It => "IT",
            SizeRegion::Fr => "FR",
            SizeRegion::Jp => "JP",
        }
    }

    pub fn from_code(code: &str) -> Option<SizeRegion> {
        SizeRegion::all()
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Numeric size in row `index` of the conversion table.
    fn size_at(&self, index: usize) -> u32 {
        let base = match self {
            SizeRegion::Us => 2,
            SizeRegion::Uk => 6,
            SizeRegion::Eu | SizeRegion::Fr => 34,
            SizeRegion::It => 38,
            SizeRegion::Jp => 5,
        };
        base + 2 * index as u32
    }

    fn row_of(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        if let Ok(n) = label.parse::<u32>() {
            return (0..SIZE_TABLE_ROWS).find(|&i| self.size_at(i) == n);
        }
        ALPHA_LABELS
            .iter()
            .position(|a| a.eq_ignore_ascii_case(label))
    }

    /// Converts a size label from one region to another.
    ///
    /// Numeric labels are looked up in the `from` column; alpha labels
    /// (XS..XXL) are region-neutral and resolve to the first matching row.
    pub fn localize_label(label: &str, from: SizeRegion, to: SizeRegion) -> Option<String> {
        let row = from.row_of(label)?;
        Some(to.size_at(row).to_string())
    }

    /// Alpha label for a numeric size of this region.
    pub fn alpha_label(&self, label: &str) -> Option<&'static str> {
        self.row_of(label).map(|row| ALPHA_LABELS[row])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeRow {
    #[serde(default)]
    pub label: String,
    /// Body measurements by name ("bust", "waist", "hip" ...), in the chart unit
    #[serde(default)]
    pub measurements: BTreeMap<String, f64>,
}

/// Size chart of a brand/category (a010)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeChart {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: SizeRegion,
    #[serde(default)]
    pub unit: MeasurementUnit,
    /// Smallest size first
    #[serde(default)]
    pub rows: Vec<SizeRow>,
}

impl SizeChart {
    /// Copy of the chart with every measurement expressed in `unit`.
    pub fn in_unit(&self, unit: MeasurementUnit) -> SizeChart {
        let rows = self
            .rows
            .iter()
            .map(|row| SizeRow {
                label: row.label.clone(),
                measurements: row
                    .measurements
                    .iter()
                    .map(|(k, v)| (k.clone(), round1(MeasurementUnit::convert(*v, self.unit, unit))))
                    .collect(),
            })
            .collect();
        SizeChart {
            unit,
            rows,
            ..self.clone()
        }
    }

    /// Measurement names used by any row, sorted.
    pub fn measurement_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .iter()
            .flat_map(|r| r.measurements.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Smallest row whose every measurement the customer gave is at least the
    /// customer's. Measurements are given in `unit`; names absent from a row are
    /// ignored, but at least one must be comparable.
    pub fn recommend(
        &self,
        measurements: &BTreeMap<String, f64>,
        unit: MeasurementUnit,
    ) -> Option<&SizeRow> {
        self.rows.iter().find(|row| {
            let mut compared = 0;
            let fits = measurements.iter().all(|(name, value)| {
                match row.measurements.get(name) {
                    Some(row_value) => {
                        compared += 1;
                        *row_value >= MeasurementUnit::convert(*value, unit, self.unit) - 1e-9
                    }
                    None => true,
                }
            });
            fits && compared > 0
        })
    }

    /// Row labels converted to another region; labels that cannot be converted
    /// are kept as is.
    pub fn localized_labels(&self, to: SizeRegion) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                SizeRegion::localize_label(&row.label, self.region, to)
                    .unwrap_or_else(|| row.label.clone())
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Chart name is required".into());
        }
        if self.rows.is_empty() {
            return Err("Chart must have at least one size".into());
        }
        let mut seen = HashSet::new();
        for row in &self.rows {
            let label = row.label.trim().to_uppercase();
            if label.is_empty() {
                return Err("Size label is required".into());
            }
            if !seen.insert(label) {
                return Err(format!("Duplicate size label: {}", row.label.trim()));
            }
            if let Some((name, _)) = row.measurements.iter().find(|(_, v)| !(**v > 0.0)) {
                return Err(format!(
                    "Measurement '{}' of size {} must be positive",
                    name, row.label
                ));
            }
        }
        Ok(())
    }
}

impl Searchable for SizeChart {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || self.brand.as_deref().is_some_and(|b| contains_ci(b, filter))
            || self.category.as_deref().is_some_and(|c| contains_ci(c, filter))
    }
}

impl Sortable for SizeChart {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "brand" => cmp_str_ci(
                self.brand.as_deref().unwrap_or(""),
                other.brand.as_deref().unwrap_or(""),
            ),
            "category" => cmp_str_ci(
                self.category.as_deref().unwrap_or(""),
                other.category.as_deref().unwrap_or(""),
            ),
            "region" => self.region.code().cmp(other.region.code()),
            "sizes" => self.rows.len().cmp(&other.rows.len()),
            _ => cmp_str_ci(&self.name, &other.name),
        }
    }
}

impl Resource for SizeChart {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "size_chart"
    }

    fn endpoint() -> &'static str {
        "/size-fit"
    }

    fn element_name() -> &'static str {
        "Size chart"
    }

    fn list_name() -> &'static str {
        "Size charts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, bust: f64, waist: f64) -> SizeRow {
        SizeRow {
            label: label.into(),
            measurements: [("bust".to_string(), bust), ("waist".to_string(), waist)]
                .into_iter()
                .collect(),
        }
    }

    fn chart() -> SizeChart {
        SizeChart {
            id: "sc1".into(),
            name: "Dresses".into(),
            region: SizeRegion::Us,
            unit: MeasurementUnit::Cm,
            rows: vec![row("4", 84.0, 66.0), row("6", 88.0, 70.0), row("8", 92.0, 74.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_localize_label() {
        assert_eq!(
            SizeRegion::localize_label("8", SizeRegion::Us, SizeRegion::Eu).as_deref(),
            Some("40")
        );
        assert_eq!(
            SizeRegion::localize_label("54", SizeRegion::It, SizeRegion::Jp).as_deref(),
            Some("21")
        );
        assert_eq!(
            SizeRegion::localize_label("m", SizeRegion::Uk, SizeRegion::Uk).as_deref(),
            Some("12")
        );
        assert_eq!(SizeRegion::localize_label("3", SizeRegion::Us, SizeRegion::Eu), None);
        assert_eq!(SizeRegion::localize_label("XXXL", SizeRegion::Us, SizeRegion::Eu), None);
        assert_eq!(SizeRegion::Us.alpha_label("18"), Some("XXL"));
    }

    #[test]
    fn test_in_unit_rounds() {
        let inches = chart().in_unit(MeasurementUnit::Inch);
        assert_eq!(inches.unit, MeasurementUnit::Inch);
        assert_eq!(inches.rows[0].measurements["bust"], 33.1);
        let back = inches.in_unit(MeasurementUnit::Cm);
        assert_eq!(back.rows[0].measurements["waist"], 66.0);
    }

    #[test]
    fn test_recommend_smallest_fitting_row() {
        let c = chart();
        let m: BTreeMap<String, f64> = [("bust".to_string(), 85.0), ("waist".to_string(), 70.0)]
            .into_iter()
            .collect();
        assert_eq!(c.recommend(&m, MeasurementUnit::Cm).map(|r| r.label.as_str()), Some("6"));

        let too_big: BTreeMap<String, f64> = [("bust".to_string(), 100.0)].into_iter().collect();
        assert!(c.recommend(&too_big, MeasurementUnit::Cm).is_none());

        let unknown: BTreeMap<String, f64> = [("inseam".to_string(), 70.0)].into_iter().collect();
        assert!(c.recommend(&unknown, MeasurementUnit::Cm).is_none());

        let inches: BTreeMap<String, f64> = [("bust".to_string(), 36.0)].into_iter().collect();
        assert_eq!(
            c.recommend(&inches, MeasurementUnit::Inch).map(|r| r.label.as_str()),
            Some("8")
        );
    }

    #[test]
    fn test_localized_labels_keep_unknown() {
        let mut c = chart();
        c.rows.push(row("Petite", 80.0, 60.0));
        assert_eq!(c.localized_labels(SizeRegion::Uk), vec!["8", "10", "12", "Petite"]);
    }

    #[test]
    fn test_validate() {
        assert!(chart().validate().is_ok());
        let mut c = chart();
        c.rows.push(row("6", 96.0, 78.0));
        assert_eq!(c.validate().unwrap_err(), "Duplicate size label: 6");
        c.rows.clear();
        assert!(c.validate().is_err());
        let unnamed = SizeChart {
            name: " ".into(),
            ..chart()
        };
        assert_eq!(unnamed.validate().unwrap_err(), "Chart name is required");
    }

    #[test]
    fn test_deserialize_unit_alias() {
        let c: SizeChart =
            serde_json::from_str(r#"{"id":3,"name":"Tops","unit":"in","region":"eu"}"#).unwrap();
        assert_eq!(c.unit, MeasurementUnit::Inch);
        assert_eq!(c.region, SizeRegion::Eu);
        assert!(c.rows.is_empty());
    }
}
