use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use order_sheet::app::server::build_router;
use order_sheet::core::bootstrap::ensure_seeded;
use order_sheet::core::{Criteria, NewOrder};
use order_sheet::{CsvHost, OrderService, RowStore, TomlConfig};
use tempfile::TempDir;
use tower::ServiceExt;

fn csv_config(data_dir: &str) -> Result<TomlConfig> {
    let normalized = data_dir.replace('\\', "/");
    Ok(TomlConfig::from_toml_str(&format!(
        r#"
[store]
backend = "csv"
data_dir = "{}"
"#,
        normalized
    ))?)
}

#[tokio::test]
async fn test_bootstrap_on_csv_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = RowStore::new(CsvHost::new(temp_dir.path()), "graph");

    assert!(ensure_seeded(&store).await?);
    assert_eq!(store.row_count().await?, 6);

    assert!(!ensure_seeded(&store).await?);
    assert_eq!(store.row_count().await?, 6);

    let raw = std::fs::read_to_string(temp_dir.path().join("graph.csv"))?;
    let first_line = raw.lines().next().unwrap();
    assert_eq!(
        first_line,
        "Order ID,Project ID,Project Name,Project Type,Region,Price,Date"
    );
    Ok(())
}

#[tokio::test]
async fn test_records_survive_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let host = CsvHost::new(temp_dir.path());

    let first = OrderService::new(RowStore::new(host.clone(), "graph"));
    ensure_seeded(first.store()).await?;
    let created = first
        .create(NewOrder {
            project_name: Some("Warehouse, Phase 2".to_string()),
            project_type: Some("Development".to_string()),
            region: Some("Asia Pacific".to_string()),
            price: Some(18000.0.into()),
            date: Some("2024-03-01".to_string()),
        })
        .await?;
    assert_eq!(created.order_id, "ORD-006");

    // 以新的服務實例重新讀取，模擬重新啟動
    let second = OrderService::new(RowStore::new(CsvHost::new(temp_dir.path()), "graph"));
    let records = second.list(&Criteria::default()).await?;

    assert_eq!(records.len(), 6);
    let last = &records[5];
    assert_eq!(last.order_id, "ORD-006");
    assert_eq!(last.project_name, "Warehouse, Phase 2");
    assert_eq!(last.price, 18000.0);
    assert_eq!(last.date, "2024-03-01");

    let stats = second.statistics(&Criteria::default()).await?;
    assert_eq!(stats.total_orders, 6);
    assert_eq!(stats.total_revenue, 90450.0);
    Ok(())
}

#[tokio::test]
async fn test_router_over_csv_backend() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("sheets");
    let config = csv_config(data_dir.to_str().unwrap())?;

    let app = build_router(&config).await?;
    assert!(data_dir.join("graph.csv").is_file());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"projectName":"Docs Portal","projectType":"Development","region":"Europe","price":4100}"#,
        ))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let records: Vec<serde_json::Value> = serde_json::from_slice(&body)?;
    assert_eq!(records.len(), 6);
    assert_eq!(records[5]["orderId"], "ORD-006");
    assert_eq!(records[5]["projectName"], "Docs Portal");
    Ok(())
}

#[tokio::test]
async fn test_numeric_looking_text_round_trips_exactly() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = OrderService::new(RowStore::new(CsvHost::new(temp_dir.path()), "graph"));
    ensure_seeded(service.store()).await?;

    service
        .create(NewOrder {
            project_name: Some("007".to_string()),
            project_type: Some("1.50".to_string()),
            region: Some("1e3".to_string()),
            price: Some(10.0.into()),
            date: None,
        })
        .await?;

    let records = service.list(&Criteria::default()).await?;
    let last = &records[5];
    assert_eq!(last.project_name, "007");
    assert_eq!(last.project_type, "1.50");
    assert_eq!(last.region, "1e3");
    assert_eq!(last.price, 10.0);

    let criteria = Criteria {
        project_type: Some("1.50".to_string()),
        region: Some("1e3".to_string()),
        ..Default::default()
    };
    let filtered = service.list(&criteria).await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].order_id, "ORD-006");

    let stats = service.statistics(&criteria).await?;
    assert_eq!(stats.project_type_counts.get("1.50"), Some(&1));
    Ok(())
}
