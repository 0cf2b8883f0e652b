#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::{ConfigProvider, StoreBackend};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_required_field, validate_sheet_name, validate_socket_addr,
};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_SHEET_NAME: &str = "graph";

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_socket_addr("server.bind", config.bind_addr())?;
    validate_sheet_name("store.sheet_name", config.sheet_name())?;

    if config.backend() == StoreBackend::Csv {
        let data_dir = config.data_dir().map(str::to_string);
        let data_dir = validate_required_field("store.data_dir", &data_dir)?;
        validate_path("store.data_dir", data_dir)?;
    }

    Ok(())
}
