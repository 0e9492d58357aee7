use clap::Parser;
use consumption_top::utils::error::ErrorSeverity;
use consumption_top::utils::{logger, validation::Validate};
use consumption_top::{CliConfig, ConsumptionPipeline, LocalStorage, ReportEngine, ReportError};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let settings = match cli.resolve().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let stdout = std::io::stdout();
    let monitor_enabled = settings.monitor;
    let pipeline = ConsumptionPipeline::new(LocalStorage::default(), settings, stdout.lock());
    let mut engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "✅ Done: {} parsed, {} skipped, {} rejected, {} reported",
                summary.parsed,
                summary.skipped,
                summary.rejected,
                summary.reported
            );
            if let Some(path) = summary.export_path {
                tracing::info!("📁 Ranking exported to: {}", path);
            }
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &ReportError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
