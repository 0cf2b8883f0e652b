use clap::Parser;
use order_sheet::app::server;
use order_sheet::config::toml_config::TomlConfig;
use order_sheet::core::ConfigProvider;
use order_sheet::utils::error::{ErrorSeverity, SheetError};
use order_sheet::utils::{logger, validation::Validate};
use order_sheet::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.config.clone() {
        Some(path) => {
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            config.apply_cli_overrides(&cli);
            run(config).await
        }
        None => run(cli).await,
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    // 初始化日誌
    logger::init_logger(config.verbose(), config.json_logs());

    tracing::info!("Starting order-sheet server");

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::debug!(
        "Config: bind={} backend={:?} sheet={} seed={} legacy_status={}",
        config.bind_addr(),
        config.backend(),
        config.sheet_name(),
        config.seed_on_start(),
        config.legacy_status()
    );

    if let Err(e) = server::serve(&config).await {
        report_failure(&e);
    }

    Ok(())
}

fn report_failure(e: &SheetError) {
    tracing::error!(
        "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
