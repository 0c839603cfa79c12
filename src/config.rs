use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bitflyer: BitflyerConfig,
    pub trading: TradingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BitflyerConfig {
    pub rest_base_url: String,
    pub ws_base_url: String,
    pub product_code: String,
    #[serde(skip)]
    pub api_key: String,
    #[serde(skip)]
    pub api_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    /// Capital allocated per position, in units of the base asset.
    pub betting_size: f64,
    /// Orders below this size are suppressed entirely.
    pub min_order_size: f64,
    pub loop_period_secs: u64,
    pub tick_staleness_secs: u64,
    pub cancel_settle_secs: u64,
    /// Ticks required before the analyzer may emit anything but Hold.
    pub warmup_ticks: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl TradingConfig {
    pub fn loop_period(&self) -> Duration {
        Duration::from_secs(self.loop_period_secs)
    }

    pub fn tick_staleness(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.tick_staleness_secs as i64)
    }

    pub fn cancel_settle(&self) -> Duration {
        Duration::from_secs(self.cancel_settle_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.betting_size <= 0.0 {
            bail!("trading.betting_size must be > 0");
        }
        if self.min_order_size <= 0.0 {
            bail!("trading.min_order_size must be > 0");
        }
        if self.loop_period_secs == 0 {
            bail!("trading.loop_period_secs must be > 0");
        }
        Ok(())
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            betting_size: 1.0,
            min_order_size: 0.001,
            loop_period_secs: 10,
            tick_staleness_secs: 3,
            cancel_settle_secs: 1,
            warmup_ticks: 100,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        config.bitflyer.api_key = std::env::var("BITFLYER_API_KEY")
            .context("BITFLYER_API_KEY not set in .env or environment")?;
        config.bitflyer.api_secret = std::env::var("BITFLYER_API_SECRET")
            .context("BITFLYER_API_SECRET not set in .env or environment")?;

        config.trading.validate()?;

        Ok(config)
    }
}
