use contracts::domain::a001_customer::aggregate::LoyaltyProgram;
use contracts::shared::finance::AgingThresholds;
use gloo_net::http::Request;
use leptos::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub finance: FinanceConfig,
    #[serde(default)]
    pub loyalty: LoyaltyConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Empty: current host, port 3000
    pub base_url: String,
    /// `take` of list requests
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_size: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FinanceConfig {
    pub currency: String,
    pub aging_buckets: Vec<i64>,
    pub due_soon_days: i64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            aging_buckets: vec![30, 60, 90],
            due_soon_days: 7,
        }
    }
}

impl FinanceConfig {
    pub fn thresholds(&self) -> AgingThresholds {
        AgingThresholds::from_slice(&self.aging_buckets)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoyaltyConfig {
    pub silver: u64,
    pub gold: u64,
    pub platinum: u64,
    pub points_per_currency_unit: f64,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        let program = LoyaltyProgram::default();
        Self {
            silver: program.silver,
            gold: program.gold,
            platinum: program.platinum,
            points_per_currency_unit: program.points_per_currency_unit,
        }
    }
}

impl LoyaltyConfig {
    pub fn program(&self) -> LoyaltyProgram {
        LoyaltyProgram {
            silver: self.silver,
            gold: self.gold,
            platinum: self.platinum,
            points_per_currency_unit: self.points_per_currency_unit,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    pub default_reorder_point: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_reorder_point: 10,
        }
    }
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
page_size = 100

[finance]
currency = "$"
aging_buckets = [30, 60, 90]
due_soon_days = 7

[loyalty]
silver = 500
gold = 2000
platinum = 5000
points_per_currency_unit = 1.0

[inventory]
default_reorder_point = 10
"#;

/// Static asset served next to the bundle
const CONFIG_PATH: &str = "/config.toml";

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

impl Default for AppConfig {
    fn default() -> Self {
        parse_config(DEFAULT_CONFIG).unwrap_or(AppConfig {
            api: ApiConfig::default(),
            finance: FinanceConfig::default(),
            loyalty: LoyaltyConfig::default(),
            inventory: InventoryConfig::default(),
        })
    }
}

/// Load configuration
///
/// Search order:
/// 1. `/config.toml` served next to the bundle
/// 2. Falls back to embedded default config
pub async fn load_config() -> AppConfig {
    match Request::get(CONFIG_PATH).send().await {
        Ok(response) if response.ok() => match response.text().await {
            Ok(text) => match parse_config(&text) {
                Ok(config) => {
                    log::info!("Loaded config from {}", CONFIG_PATH);
                    return config;
                }
                Err(e) => log::warn!("{} is not valid: {}", CONFIG_PATH, e),
            },
            Err(e) => log::warn!("Cannot read {}: {}", CONFIG_PATH, e),
        },
        Ok(response) => log::warn!("{} not found (HTTP {})", CONFIG_PATH, response.status()),
        Err(e) => log::warn!("Cannot fetch {}: {}", CONFIG_PATH, e),
    }
    log::info!("Using default embedded configuration");
    AppConfig::default()
}

/// Configuration shared through context.
#[derive(Clone, Copy)]
pub struct ConfigContext {
    pub config: RwSignal<AppConfig>,
    pub loaded: RwSignal<bool>,
}

impl ConfigContext {
    pub fn new() -> Self {
        Self {
            config: RwSignal::new(AppConfig::default()),
            loaded: RwSignal::new(false),
        }
    }

    pub fn get(&self) -> AppConfig {
        self.config.get_untracked()
    }

    pub fn page_size(&self) -> usize {
        self.config.with_untracked(|c| c.api.page_size)
    }

    pub fn currency(&self) -> String {
        self.config.with_untracked(|c| c.finance.currency.clone())
    }
}

pub fn use_config() -> ConfigContext {
    use_context::<ConfigContext>().expect("ConfigContext not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.page_size, 100);
        assert_eq!(config.finance.thresholds(), AgingThresholds::default());
        assert_eq!(config.loyalty.program(), LoyaltyProgram::default());
        assert_eq!(config.inventory.default_reorder_point, 10);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
[finance]
currency = "EUR"

[api]
base_url = "https://erp.example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.finance.currency, "EUR");
        assert_eq!(config.finance.due_soon_days, 7);
        assert_eq!(config.api.page_size, 100);
        assert_eq!(config.api.base_url, "https://erp.example.com");
        assert_eq!(config.loyalty.gold, 2000);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(parse_config("[finance]\ndue_soon_days = \"soon\"").is_err());
    }
}
