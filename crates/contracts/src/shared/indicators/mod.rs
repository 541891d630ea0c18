use serde::{Deserialize, Serialize};

/// How a dashboard card formats its numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

impl ValueFormat {
    pub fn money(currency: &str) -> Self {
        ValueFormat::Money {
            currency: currency.to_string(),
        }
    }

    pub fn percent() -> Self {
        ValueFormat::Percent { decimals: 1 }
    }
}

/// Visual status of a card (drives colour).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    #[default]
    Neutral,
    Warning,
}

impl IndicatorStatus {
    /// Status for a value where lower is better: zero is good, up to `warning_at` is a
    /// warning, anything above is bad.
    pub fn lower_is_better(value: f64, warning_at: f64) -> Self {
        if value <= 0.0 {
            IndicatorStatus::Good
        } else if value <= warning_at {
            IndicatorStatus::Warning
        } else {
            IndicatorStatus::Bad
        }
    }

    /// Status for a percentage where higher is better.
    pub fn higher_is_better(percent: Option<f64>, good_at: f64, warning_at: f64) -> Self {
        match percent {
            None => IndicatorStatus::Neutral,
            Some(p) if p >= good_at => IndicatorStatus::Good,
            Some(p) if p >= warning_at => IndicatorStatus::Warning,
            Some(_) => IndicatorStatus::Bad,
        }
    }
}

/// Change of `current` against `previous` in percent; `None` without a usable base.
pub fn change_percent(current: f64, previous: f64) -> Option<f64> {
    if previous.abs() < f64::EPSILON {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_rules() {
        assert_eq!(IndicatorStatus::lower_is_better(0.0, 5.0), IndicatorStatus::Good);
        assert_eq!(IndicatorStatus::lower_is_better(3.0, 5.0), IndicatorStatus::Warning);
        assert_eq!(IndicatorStatus::lower_is_better(8.0, 5.0), IndicatorStatus::Bad);
        assert_eq!(
            IndicatorStatus::higher_is_better(Some(95.0), 90.0, 70.0),
            IndicatorStatus::Good
        );
        assert_eq!(
            IndicatorStatus::higher_is_better(None, 90.0, 70.0),
            IndicatorStatus::Neutral
        );
    }

    #[test]
    fn test_change_percent() {
        assert_eq!(change_percent(150.0, 100.0), Some(50.0));
        assert_eq!(change_percent(50.0, -100.0), Some(150.0));
        assert_eq!(change_percent(10.0, 0.0), None);
    }
}
