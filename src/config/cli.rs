use crate::config::toml_config::{MonitoringConfig, TomlConfig};
use crate::core::LookupFailurePolicy;
use crate::domain::dates::parse_us_date;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "vax-reminder")]
#[command(about = "Builds vaccination reminder schedules from a government roster")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "vax-reminder.toml")]
    pub config: String,

    /// Reference date for ages (MM/DD/YYYY), overrides schedule.current_date
    #[arg(long, value_parser = parse_date_arg)]
    pub current_date: Option<NaiveDate>,

    /// Overrides maps.on_lookup_failure
    #[arg(long, value_enum)]
    pub on_lookup_failure: Option<LookupFailurePolicy>,

    /// Log memory and timing for each pipeline phase
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Enrich the roster, build the schedule and print the reminders
    Run,
    /// Build the schedule from a previously enriched roster and print the reminders
    Resume,
    /// Enrich the roster only
    Enrich,
    /// Build the schedule from a previously enriched roster only
    Schedule,
    /// Print the reminders of a previously built schedule
    Notify,
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_us_date(value).map_err(|e| e.to_string())
}

impl CliConfig {
    /// 命令列設定優先於設定檔
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(date) = self.current_date {
            tracing::info!("🔧 Reference date overridden to {}", date);
            config.schedule.current_date = Some(date);
        }
        if let Some(policy) = self.on_lookup_failure {
            tracing::info!("🔧 Lookup failure policy overridden to {:?}", policy);
            config.maps.on_lookup_failure = policy;
        }
        if self.monitor {
            config.monitoring = Some(MonitoringConfig { enabled: true });
        }
    }
}
