use crate::domain::row::CellValue;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The external spreadsheet host. These five calls are the whole surface the
/// shim consumes; any call on a sheet that does not exist fails with
/// `StoreNotFound`.
#[async_trait]
pub trait SheetHost: Send + Sync {
    async fn has_sheet(&self, name: &str) -> Result<bool>;
    async fn insert_sheet(&self, name: &str) -> Result<()>;
    /// Every populated row, header included, in stored order.
    async fn values(&self, name: &str) -> Result<Vec<Vec<CellValue>>>;
    async fn append_row(&self, name: &str, row: Vec<CellValue>) -> Result<()>;
    /// 1-based index of the last populated row; 0 for an empty sheet.
    async fn last_row(&self, name: &str) -> Result<usize>;
}

#[async_trait]
impl<H: SheetHost + ?Sized> SheetHost for Arc<H> {
    async fn has_sheet(&self, name: &str) -> Result<bool> {
        (**self).has_sheet(name).await
    }

    async fn insert_sheet(&self, name: &str) -> Result<()> {
        (**self).insert_sheet(name).await
    }

    async fn values(&self, name: &str) -> Result<Vec<Vec<CellValue>>> {
        (**self).values(name).await
    }

    async fn append_row(&self, name: &str, row: Vec<CellValue>) -> Result<()> {
        (**self).append_row(name, row).await
    }

    async fn last_row(&self, name: &str) -> Result<usize> {
        (**self).last_row(name).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Csv,
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn backend(&self) -> StoreBackend;
    fn data_dir(&self) -> Option<&str>;
    fn sheet_name(&self) -> &str;
    fn seed_on_start(&self) -> bool;
    fn legacy_status(&self) -> bool;
    fn json_logs(&self) -> bool;
    fn verbose(&self) -> bool;
}
