use super::{DEFAULT_BIND, DEFAULT_SHEET_NAME};
use crate::core::{ConfigProvider, StoreBackend};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "order-sheet")]
#[command(about = "HTTP shim serving orders from a spreadsheet-backed sheet")]
pub struct CliConfig {
    /// Path to a TOML configuration file; other flags override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen address [default: 0.0.0.0:3000]
    #[arg(long)]
    pub bind: Option<String>,

    /// Sheet host [default: memory]
    #[arg(long, value_enum)]
    pub backend: Option<StoreBackend>,

    /// Directory holding `<sheet>.csv` files (csv backend)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Sheet holding the orders [default: graph]
    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Do not create and seed the sheet on start
    #[arg(long)]
    pub no_seed: bool,

    /// Answer errors with 200 and an error body
    #[arg(long)]
    pub legacy_status: bool,

    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_addr(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    fn backend(&self) -> StoreBackend {
        self.backend.unwrap_or_default()
    }

    fn data_dir(&self) -> Option<&str> {
        self.data_dir.as_deref()
    }

    fn sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }

    fn seed_on_start(&self) -> bool {
        !self.no_seed
    }

    fn legacy_status(&self) -> bool {
        self.legacy_status
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["order-sheet"]);
        assert_eq!(config.bind_addr(), DEFAULT_BIND);
        assert_eq!(config.sheet_name(), "graph");
        assert_eq!(config.backend(), StoreBackend::Memory);
        assert!(config.seed_on_start());
        assert!(!config.legacy_status());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_csv_backend_needs_data_dir() {
        let config = CliConfig::parse_from(["order-sheet", "--backend", "csv"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from([
            "order-sheet",
            "--backend",
            "csv",
            "--data-dir",
            "./data",
            "--no-seed",
        ]);
        assert!(config.validate().is_ok());
        assert!(!config.seed_on_start());
    }
}
