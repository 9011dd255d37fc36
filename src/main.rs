// ==========================================
// 运输规划系统 - 命令行入口
// ==========================================
// 用法: transport-planner <FILE> [--locale ru] [--validate-plan] [--pretty]
// 输出: stdout 为规划视图 JSON，stderr 为状态提示与日志
// ==========================================

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use transport_planner::i18n::{self, SUPPORTED_LOCALES};
use transport_planner::importer::{summary_message, ImportStatus, StatusTone};
use transport_planner::{
    logging, ImportObserver, ImporterConfig, TransportImporter, TransportImporterImpl,
};

#[derive(Parser, Debug)]
#[command(
    name = "transport-planner",
    about = "Import a transport planning workbook and print the planning view as JSON",
    version
)]
struct CliArgs {
    #[arg(value_name = "FILE", help = "Workbook to import (.xlsx/.xlsm/.xls/.ods)")]
    file: PathBuf,

    #[arg(
        long,
        value_name = "LOCALE",
        value_parser = clap::builder::PossibleValuesParser::new(SUPPORTED_LOCALES),
        help = "Language of status messages"
    )]
    locale: Option<String>,

    #[arg(long, help = "Check stock against demand and name uniqueness after import")]
    validate_plan: bool,

    #[arg(
        long,
        env = "TRANSPORT_PLANNER_CONFIG",
        value_name = "FILE",
        help = "Path to a JSON configuration file"
    )]
    config: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,

    #[arg(long, help = "Emit logs as JSON")]
    log_json: bool,
}

/// 状态提示输出到 stderr
struct StderrStatus;

impl ImportObserver for StderrStatus {
    fn on_status(&self, status: &ImportStatus, message: &str) {
        let tag = match status.tone() {
            StatusTone::Info => "INFO",
            StatusTone::Success => "OK",
            StatusTone::Error => "ERROR",
        };
        eprintln!("[{}] {}", tag, message);
    }
}

/// 配置优先级: 命令行参数 > 环境变量 > 配置文件 > 默认值
fn load_config(cli: &CliArgs) -> anyhow::Result<ImporterConfig> {
    let base = match &cli.config {
        Some(path) => ImporterConfig::from_json_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => ImporterConfig::default(),
    };

    let mut config = base.apply_env();
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    if cli.validate_plan {
        config.validate_plan = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = transport_planner::VERSION, "{}", transport_planner::APP_NAME);

    let config = load_config(&cli)?;
    i18n::set_locale(&config.locale);

    let mut importer = TransportImporterImpl::with_defaults(config);
    importer.add_observer(Box::new(StderrStatus));

    let outcome = importer
        .import_from_excel(&cli.file)
        .await
        .with_context(|| format!("导入失败: {}", cli.file.display()))?;

    eprintln!("{}", summary_message(&importer.config().locale, &outcome.summary));

    let json = if cli.pretty {
        serde_json::to_string_pretty(&outcome.view)?
    } else {
        serde_json::to_string(&outcome.view)?
    };
    println!("{}", json);

    Ok(())
}
