pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{client::OrderClient, csv_host::CsvHost, memory::MemoryHost};
pub use config::toml_config::TomlConfig;
pub use crate::core::{service::OrderService, store::RowStore};
pub use utils::error::{Result, SheetError};
