use crate::domain::ports::SheetHost;
use crate::domain::row::Row;
use crate::utils::error::Result;

/// A named sheet on a [`SheetHost`], seen as fixed-width rows.
pub struct RowStore<H: SheetHost> {
    host: H,
    name: String,
}

impl<H: SheetHost> RowStore<H> {
    pub fn new(host: H, name: impl Into<String>) -> Self {
        Self {
            host,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn exists(&self) -> Result<bool> {
        self.host.has_sheet(&self.name).await
    }

    /// Creates the sheet when absent. Returns whether it was created.
    pub async fn create(&self) -> Result<bool> {
        if self.exists().await? {
            return Ok(false);
        }
        tracing::info!("📄 Creating sheet '{}'", self.name);
        self.host.insert_sheet(&self.name).await?;
        Ok(true)
    }

    /// All rows, header included.
    pub async fn read_all(&self) -> Result<Vec<Row>> {
        let values = self.host.values(&self.name).await?;
        tracing::debug!("Read {} rows from '{}'", values.len(), self.name);
        Ok(values.into_iter().map(Row::from_cells).collect())
    }

    /// Rows after the header.
    pub async fn data_rows(&self) -> Result<Vec<Row>> {
        Ok(self.read_all().await?.into_iter().skip(1).collect())
    }

    pub async fn append(&self, row: Row) -> Result<()> {
        self.host.append_row(&self.name, row.into_cells()).await
    }

    /// Populated rows, header included.
    pub async fn row_count(&self) -> Result<usize> {
        self.host.last_row(&self.name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryHost;
    use crate::domain::row::CellValue;
    use crate::utils::error::SheetError;

    #[tokio::test]
    async fn test_missing_sheet() {
        let store = RowStore::new(MemoryHost::new(), "graph");

        assert!(!store.exists().await.unwrap());
        assert!(matches!(
            store.read_all().await,
            Err(SheetError::StoreNotFound { .. })
        ));
        assert!(matches!(
            store.append(Row::header()).await,
            Err(SheetError::StoreNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = RowStore::new(MemoryHost::new(), "graph");

        assert!(store.create().await.unwrap());
        assert!(!store.create().await.unwrap());
        assert!(store.exists().await.unwrap());
        assert_eq!(store.row_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_preserves_order_and_width() {
        let host = MemoryHost::new();
        let store = RowStore::new(host.clone(), "graph");
        store.create().await.unwrap();

        store.append(Row::header()).await.unwrap();
        store
            .append(Row::from_cells(vec!["ORD-001".into()]))
            .await
            .unwrap();
        store
            .append(Row::from_cells(vec!["ORD-002".into()]))
            .await
            .unwrap();

        let raw = host.snapshot("graph").unwrap();
        assert_eq!(raw.len(), 3);
        assert!(raw.iter().all(|cells| cells.len() == 7));

        let data = store.data_rows().await.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].order_id(), &CellValue::Text("ORD-001".into()));
        assert_eq!(data[1].order_id(), &CellValue::Text("ORD-002".into()));
        assert_eq!(store.row_count().await.unwrap(), 3);
    }
}
