use crate::core::aggregate::compute_statistics;
use crate::core::mapper::{self, row_to_record};
use crate::core::store::RowStore;
use crate::domain::model::{CreatedOrder, Criteria, NewOrder, Record, Statistics};
use crate::domain::ports::SheetHost;
use crate::domain::row::Row;
use crate::utils::error::{Result, SheetError};

pub const CREATED_MESSAGE: &str = "Order created successfully";

/// The list/create/statistics handlers, bound to one store for the life of
/// the process.
///
/// Creating derives the new identifiers from the current row count and then
/// appends; two concurrent creates can therefore receive the same id.
pub struct OrderService<H: SheetHost> {
    store: RowStore<H>,
}

impl<H: SheetHost> OrderService<H> {
    pub fn new(store: RowStore<H>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RowStore<H> {
        &self.store
    }

    async fn require_store(&self) -> Result<()> {
        if self.store.exists().await? {
            Ok(())
        } else {
            Err(SheetError::store_not_found(self.store.name()))
        }
    }

    /// Every data row as a record. Criteria narrow the rows first; the
    /// position used for missing ids is always the row's stored position.
    pub async fn list(&self, criteria: &Criteria) -> Result<Vec<Record>> {
        self.require_store().await?;

        let rows = self.store.read_all().await?;
        if rows.len() <= 1 {
            tracing::debug!("Sheet '{}' has no data rows", self.store.name());
            return Ok(Vec::new());
        }

        if !criteria.is_empty() {
            tracing::debug!("Filtering with {:?}", criteria);
        }

        let records: Vec<Record> = rows
            .iter()
            .skip(1)
            .enumerate()
            .filter(|(_, row)| criteria.matches(row))
            .map(|(i, row)| row_to_record(row, i + 1))
            .collect();

        tracing::info!(
            "📋 Listed {} of {} records",
            records.len(),
            rows.len() - 1
        );
        Ok(records)
    }

    pub async fn create(&self, input: NewOrder) -> Result<CreatedOrder> {
        mapper::validate_order(&input)?;
        self.require_store().await?;

        let row_count = self.store.row_count().await?;
        if row_count == 0 {
            // 空白工作表先補上標題列，否則新資料會被當成標題
            tracing::warn!("Sheet '{}' has no header row, writing one", self.store.name());
            self.store.append(Row::header()).await?;
        }
        let data_rows = row_count.saturating_sub(1);
        let row = mapper::record_to_row(&input, data_rows, mapper::today())?;
        let order_id = row.order_id().to_string();
        let project_id = row.project_id().to_string();

        self.store.append(row).await?;

        tracing::info!("✅ Created order {} ({})", order_id, project_id);
        Ok(CreatedOrder {
            success: true,
            order_id,
            project_id,
            message: CREATED_MESSAGE.to_string(),
        })
    }

    /// Statistics over matching data rows; all zero when the sheet is absent.
    pub async fn statistics(&self, criteria: &Criteria) -> Result<Statistics> {
        if !self.store.exists().await? {
            tracing::warn!(
                "Sheet '{}' not found, returning empty statistics",
                self.store.name()
            );
            return Ok(Statistics::default());
        }

        let rows = self.store.data_rows().await?;
        Ok(compute_statistics(
            rows.iter().filter(|row| criteria.matches(row)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryHost;
    use crate::core::bootstrap::ensure_seeded;
    use crate::domain::row::CellValue;

    fn service(host: MemoryHost) -> OrderService<MemoryHost> {
        OrderService::new(RowStore::new(host, "graph"))
    }

    fn new_order(price: f64) -> NewOrder {
        NewOrder {
            project_name: Some("Landing Page".to_string()),
            project_type: Some("Design".to_string()),
            region: Some("Europe".to_string()),
            price: Some(CellValue::Number(price)),
            date: None,
        }
    }

    #[tokio::test]
    async fn test_list_missing_store() {
        let svc = service(MemoryHost::new());
        let err = svc.list(&Criteria::default()).await.unwrap_err();
        assert!(matches!(err, SheetError::StoreNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_header_only_is_empty() {
        let svc = service(MemoryHost::new().with_sheet("graph", vec![Row::header().into_cells()]));
        assert!(svc.list(&Criteria::default()).await.unwrap().is_empty());

        let empty = service(MemoryHost::new().with_sheet("graph", vec![]));
        assert!(empty.list(&Criteria::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_degrades_malformed_rows() {
        let host = MemoryHost::new().with_sheet(
            "graph",
            vec![
                Row::header().into_cells(),
                vec![CellValue::Empty, CellValue::Empty, "Orphan".into()],
                vec![
                    "ORD-002".into(),
                    "PRJ-002".into(),
                    "Logo".into(),
                    "Design".into(),
                    "EU".into(),
                    "abc".into(),
                    "garbage".into(),
                ],
            ],
        );
        let records = service(host).list(&Criteria::default()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, "ORD-001");
        assert_eq!(records[0].project_id, "PRJ-001");
        assert_eq!(records[0].project_type, "Other");
        assert_eq!(records[1].price, 0.0);
        assert_eq!(records[1].date, mapper::today().format("%Y-%m-%d").to_string());
    }

    #[tokio::test]
    async fn test_filtered_list_keeps_store_positions() {
        let svc = service(MemoryHost::new());
        ensure_seeded(svc.store()).await.unwrap();
        svc.store()
            .append(Row::from_cells(vec![
                CellValue::Empty,
                CellValue::Empty,
                "Unlabelled".into(),
                "Marketing".into(),
            ]))
            .await
            .unwrap();

        let criteria = Criteria {
            project_type: Some("Marketing".to_string()),
            ..Default::default()
        };
        let records = svc.list(&criteria).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, "ORD-004");
        assert_eq!(records[1].order_id, "ORD-006");
    }

    #[tokio::test]
    async fn test_create_appends_next_id() {
        let host = MemoryHost::new();
        let svc = service(host.clone());
        ensure_seeded(svc.store()).await.unwrap();

        let created = svc.create(new_order(2500.0)).await.unwrap();
        assert!(created.success);
        assert_eq!(created.order_id, "ORD-006");
        assert_eq!(created.project_id, "PRJ-006");
        assert_eq!(created.message, CREATED_MESSAGE);

        let records = svc.list(&Criteria::default()).await.unwrap();
        let last = records.last().unwrap();
        assert_eq!(last.order_id, "ORD-006");
        assert_eq!(last.project_name, "Landing Page");
        assert_eq!(last.price, 2500.0);
        assert_eq!(host.snapshot("graph").unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_create_on_empty_sheet_writes_header_first() {
        let host = MemoryHost::new().with_sheet("graph", vec![]);
        let svc = service(host.clone());

        let created = svc.create(new_order(900.0)).await.unwrap();
        assert_eq!(created.order_id, "ORD-001");

        let raw = host.snapshot("graph").unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(Row::from_cells(raw[0].clone()), Row::header());

        let records = svc.list(&Criteria::default()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_id, "ORD-001");
        assert_eq!(records[0].project_name, "Landing Page");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_or_zero_price() {
        let host = MemoryHost::new();
        let svc = service(host.clone());
        ensure_seeded(svc.store()).await.unwrap();

        let mut no_price = new_order(1.0);
        no_price.price = None;

        for input in [no_price, new_order(0.0)] {
            let err = svc.create(input).await.unwrap_err();
            assert_eq!(err.to_string(), "Missing required fields");
        }
        assert_eq!(host.snapshot("graph").unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_create_validates_before_store_lookup() {
        let svc = service(MemoryHost::new());

        let err = svc.create(NewOrder::default()).await.unwrap_err();
        assert!(matches!(err, SheetError::ValidationError { .. }));

        let err = svc.create(new_order(10.0)).await.unwrap_err();
        assert!(matches!(err, SheetError::StoreNotFound { .. }));
    }

    #[tokio::test]
    async fn test_statistics_without_store_is_zero() {
        let stats = service(MemoryHost::new())
            .statistics(&Criteria::default())
            .await
            .unwrap();
        assert_eq!(stats, Statistics::default());
    }

    #[tokio::test]
    async fn test_statistics_over_seed_data() {
        let svc = service(MemoryHost::new());
        ensure_seeded(svc.store()).await.unwrap();

        let stats = svc.statistics(&Criteria::default()).await.unwrap();
        assert_eq!(stats.total_orders, 5);
        assert_eq!(stats.total_revenue, 72450.0);
        assert_eq!(stats.avg_price, 14490.0);
        assert_eq!(stats.project_type_counts.get("Development"), Some(&2));
        assert_eq!(stats.region_counts.get("Europe"), Some(&2));

        let europe = Criteria {
            region: Some("Europe".to_string()),
            ..Default::default()
        };
        let stats = svc.statistics(&europe).await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 21250.0);
    }
}
