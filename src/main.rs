use clap::Parser;
use vax_reminder::utils::error::ErrorSeverity;
use vax_reminder::utils::{logger, validation::Validate};
use vax_reminder::{
    CliConfig, Command, ConsoleNotifier, GoogleMapsClient, LocalStorage, ReminderError,
    ReminderWorkflow, RunSummary, TomlConfig,
};

async fn execute(
    command: Command,
    workflow: &ReminderWorkflow<LocalStorage, TomlConfig>,
    config: &TomlConfig,
) -> Result<RunSummary, ReminderError> {
    let mut notifier = ConsoleNotifier::new(std::io::stdout().lock());

    match command {
        Command::Run => {
            let maps = GoogleMapsClient::from_settings(&config.maps)?;
            workflow.run(maps, &mut notifier).await
        }
        Command::Resume => workflow.resume(&mut notifier).await,
        Command::Enrich => {
            let maps = GoogleMapsClient::from_settings(&config.maps)?;
            workflow.enrich(maps).await
        }
        Command::Schedule => {
            let table = workflow.load_vaccine_table().await?;
            workflow.schedule(&table).await
        }
        Command::Notify => workflow.notify(&mut notifier).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting vax-reminder ({:?})", cli.command);
    tracing::info!("📁 Loading configuration from: {}", cli.config);

    let mut config = match TomlConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    if cli.verbose {
        tracing::debug!("Configuration: {:?}", config);
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.base_dir());
    let workflow = ReminderWorkflow::new(storage, config.clone()).with_monitoring(monitor_enabled);

    match execute(cli.command, &workflow, &config).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Done: {} reminders for {} people",
                summary.messages_sent,
                summary.recipients
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ {:?} failed: {} (Category: {:?}, Severity: {:?})",
                cli.command,
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
    }

    Ok(())
}
