use super::{DEFAULT_BIND, DEFAULT_SHEET_NAME};
use crate::core::{ConfigProvider, StoreBackend};
use crate::utils::error::{Result, SheetError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub legacy_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub data_dir: Option<String>,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    pub seed_on_start: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub verbose: bool,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            legacy_status: false,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: None,
            sheet_name: default_sheet_name(),
            seed_on_start: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SheetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SheetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SheetError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列旗標優先於檔案設定
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &super::CliConfig) {
        if cli.no_seed {
            self.store.seed_on_start = Some(false);
        }
        if cli.legacy_status {
            self.server.legacy_status = true;
        }
        if cli.json_logs {
            self.logging.json = true;
        }
        if cli.verbose {
            self.logging.verbose = true;
        }
        if let Some(bind) = &cli.bind {
            self.server.bind = bind.clone();
        }
        if let Some(backend) = cli.backend {
            self.store.backend = backend;
        }
        if let Some(data_dir) = &cli.data_dir {
            self.store.data_dir = Some(data_dir.clone());
        }
        if let Some(sheet_name) = &cli.sheet_name {
            self.store.sheet_name = sheet_name.clone();
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_addr(&self) -> &str {
        &self.server.bind
    }

    fn backend(&self) -> StoreBackend {
        self.store.backend
    }

    fn data_dir(&self) -> Option<&str> {
        self.store.data_dir.as_deref()
    }

    fn sheet_name(&self) -> &str {
        &self.store.sheet_name
    }

    fn seed_on_start(&self) -> bool {
        self.store.seed_on_start.unwrap_or(true)
    }

    fn legacy_status(&self) -> bool {
        self.server.legacy_status
    }

    fn json_logs(&self) -> bool {
        self.logging.json
    }

    fn verbose(&self) -> bool {
        self.logging.verbose
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}
