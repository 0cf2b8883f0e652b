use crate::core::store::RowStore;
use crate::domain::ports::SheetHost;
use crate::domain::row::{CellValue, Row};
use crate::utils::error::Result;

const SAMPLE_ORDERS: [(&str, &str, &str, &str, &str, f64, &str); 5] = [
    (
        "ORD-001",
        "PRJ-001",
        "Corporate Website Redesign",
        "Development",
        "North America",
        15000.0,
        "2024-01-15",
    ),
    (
        "ORD-002",
        "PRJ-002",
        "Brand Identity Package",
        "Design",
        "Europe",
        8500.0,
        "2024-01-20",
    ),
    (
        "ORD-003",
        "PRJ-003",
        "Mobile App MVP",
        "Development",
        "Asia Pacific",
        32000.0,
        "2024-02-03",
    ),
    (
        "ORD-004",
        "PRJ-004",
        "SEO Campaign",
        "Marketing",
        "North America",
        4200.0,
        "2024-02-11",
    ),
    (
        "ORD-005",
        "PRJ-005",
        "Data Pipeline Audit",
        "Consulting",
        "Europe",
        12750.0,
        "2024-02-28",
    ),
];

pub fn sample_rows() -> Vec<Row> {
    SAMPLE_ORDERS
        .iter()
        .map(|(order_id, project_id, name, kind, region, price, date)| {
            Row::from_cells(vec![
                CellValue::from(*order_id),
                CellValue::from(*project_id),
                CellValue::from(*name),
                CellValue::from(*kind),
                CellValue::from(*region),
                CellValue::Number(*price),
                CellValue::from(*date),
            ])
        })
        .collect()
}

/// Creates the sheet if needed and, when it holds no rows at all, writes the
/// header plus the sample orders. Returns whether anything was written.
pub async fn ensure_seeded<H: SheetHost>(store: &RowStore<H>) -> Result<bool> {
    store.create().await?;

    let existing = store.row_count().await?;
    if existing > 0 {
        tracing::debug!(
            "Sheet '{}' already has {} rows, skipping seed",
            store.name(),
            existing
        );
        return Ok(false);
    }

    store.append(Row::header()).await?;
    let samples = sample_rows();
    let count = samples.len();
    for row in samples {
        store.append(row).await?;
    }

    tracing::info!("🌱 Seeded '{}' with header and {} sample orders", store.name(), count);
    Ok(true)
}
