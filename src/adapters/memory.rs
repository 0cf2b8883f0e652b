use crate::core::{CellValue, Result, SheetHost};
use crate::utils::error::SheetError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Sheets = HashMap<String, Vec<Vec<CellValue>>>;

/// In-process sheet host. Clones share the same sheets.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    sheets: Arc<Mutex<Sheets>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(self, name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        self.lock().insert(name.to_string(), rows);
        self
    }

    /// Raw contents of a sheet, as the host stores them.
    pub fn snapshot(&self, name: &str) -> Option<Vec<Vec<CellValue>>> {
        self.lock().get(name).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Sheets> {
        self.sheets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SheetHost for MemoryHost {
    async fn has_sheet(&self, name: &str) -> Result<bool> {
        Ok(self.lock().contains_key(name))
    }

    async fn insert_sheet(&self, name: &str) -> Result<()> {
        let mut sheets = self.lock();
        if sheets.contains_key(name) {
            return Err(SheetError::host(format!("Sheet '{}' already exists", name)));
        }
        sheets.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn values(&self, name: &str) -> Result<Vec<Vec<CellValue>>> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| SheetError::store_not_found(name))
    }

    async fn append_row(&self, name: &str, row: Vec<CellValue>) -> Result<()> {
        self.lock()
            .get_mut(name)
            .ok_or_else(|| SheetError::store_not_found(name))?
            .push(row);
        Ok(())
    }

    async fn last_row(&self, name: &str) -> Result<usize> {
        self.lock()
            .get(name)
            .map(Vec::len)
            .ok_or_else(|| SheetError::store_not_found(name))
    }
}
