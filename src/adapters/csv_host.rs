use crate::core::{CellValue, Result, SheetHost};
use crate::utils::error::SheetError;
use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Sheet host backed by a directory of CSV files, one `<sheet>.csv` per sheet.
#[derive(Debug, Clone)]
pub struct CsvHost {
    data_dir: PathBuf,
}

impl CsvHost {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn sheet_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", name))
    }

    fn existing_path(&self, name: &str) -> Result<PathBuf> {
        let path = self.sheet_path(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SheetError::store_not_found(name))
        }
    }
}

#[async_trait]
impl SheetHost for CsvHost {
    async fn has_sheet(&self, name: &str) -> Result<bool> {
        Ok(self.sheet_path(name).is_file())
    }

    async fn insert_sheet(&self, name: &str) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        // create_new 避免覆蓋既有資料
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.sheet_path(name))
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    SheetError::host(format!("Sheet '{}' already exists", name))
                }
                _ => SheetError::IoError(e),
            })?;

        tracing::debug!("Created {}", self.sheet_path(name).display());
        Ok(())
    }

    async fn values(&self, name: &str) -> Result<Vec<Vec<CellValue>>> {
        let path = self.existing_path(name)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .enumerate()
                    .map(|(i, raw)| CellValue::infer_at(i, raw))
                    .collect(),
            );
        }
        Ok(rows)
    }

    async fn append_row(&self, name: &str, row: Vec<CellValue>) -> Result<()> {
        let path = self.existing_path(name)?;
        let file = OpenOptions::new().append(true).open(&path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    async fn last_row(&self, name: &str) -> Result<usize> {
        Ok(self.values(name).await?.len())
    }
}
