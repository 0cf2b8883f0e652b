use order_sheet::core::{CellValue, Criteria, NewOrder};
use order_sheet::OrderClient;

/// 對執行中的伺服器做一次完整的 API 巡檢
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string());
    let client = OrderClient::new(&base_url)?;

    println!("🚀 測試 order-sheet API: {}", client.base_url());

    let status = client.preflight().await?;
    println!("✅ OPTIONS / -> {}", status);

    let records = client.list().await?;
    println!("📋 GET / -> {} 筆記錄", records.len());
    for record in records.iter().take(5) {
        println!(
            "  - {} {} [{} / {}] {} @ {}",
            record.order_id,
            record.project_name,
            record.project_type,
            record.region,
            record.price,
            record.date
        );
    }

    let order = NewOrder {
        project_name: Some("Smoke Test Project".to_string()),
        project_type: Some("Consulting".to_string()),
        region: Some("Europe".to_string()),
        price: Some(CellValue::Number(1234.5)),
        date: None,
    };
    let created = client.create(&order).await?;
    println!("🆕 POST / -> {} ({}) {}", created.order_id, created.project_id, created.message);

    match client.create(&NewOrder::default()).await {
        Ok(_) => println!("⚠️ 空白訂單竟然被接受"),
        Err(e) => println!("✅ 空白訂單被拒絕: {}", e),
    }

    let stats = client.statistics(&Criteria::default()).await?;
    println!(
        "📈 GET /stats -> {} 筆, 總額 {}, 平均 {:.2}",
        stats.total_orders, stats.total_revenue, stats.avg_price
    );
    for (project_type, count) in &stats.project_type_counts {
        println!("  - {}: {}", project_type, count);
    }

    println!("\n🎉 測試完成！");
    Ok(())
}
