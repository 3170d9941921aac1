pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{google_maps::GoogleMapsClient, storage::LocalStorage};
pub use app::{ReminderWorkflow, RunSummary};
pub use config::TomlConfig;
pub use crate::core::{etl::EtlEngine, notifier::ConsoleNotifier};
pub use utils::error::{ReminderError, Result};
