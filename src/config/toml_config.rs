use crate::adapters::google_maps::DEFAULT_MAPS_ENDPOINT;
use crate::core::schedule::DEFAULT_REMINDER_OFFSET_DAYS;
use crate::core::{ConfigProvider, LookupFailurePolicy};
use crate::domain::dates;
use crate::utils::error::{ReminderError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: PathsConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    pub roster: String,
    pub vaccines: String,
    pub enriched_roster: String,
    pub notifications: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_facility_type")]
    pub facility_type: String,
    #[serde(default = "default_travel_mode")]
    pub travel_mode: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub on_lookup_failure: LookupFailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Reference date for ages; today's local date when absent.
    #[serde(default, with = "dates::padded_option")]
    pub current_date: Option<NaiveDate>,
    #[serde(default = "default_reminder_offset_days")]
    pub reminder_offset_days: i64,
    #[serde(default = "default_true")]
    pub drop_trailer_line: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_base_dir() -> String {
    ".".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_MAPS_ENDPOINT.to_string()
}

fn default_facility_type() -> String {
    "hospital".to_string()
}

fn default_travel_mode() -> String {
    "driving".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_reminder_offset_days() -> i64 {
    DEFAULT_REMINDER_OFFSET_DAYS
}

fn default_true() -> bool {
    true
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            facility_type: default_facility_type(),
            travel_mode: default_travel_mode(),
            timeout_seconds: default_timeout_seconds(),
            on_lookup_failure: LookupFailurePolicy::default(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            current_date: None,
            reminder_offset_days: default_reminder_offset_days(),
            drop_trailer_line: true,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReminderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_MAPS_API_KEY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReminderError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("maps.endpoint", &self.maps.endpoint)?;

        validate_path("paths.base_dir", &self.paths.base_dir)?;
        validate_path("paths.roster", &self.paths.roster)?;
        validate_path("paths.vaccines", &self.paths.vaccines)?;
        validate_path("paths.enriched_roster", &self.paths.enriched_roster)?;
        validate_path("paths.notifications", &self.paths.notifications)?;

        validate_range("maps.timeout_seconds", self.maps.timeout_seconds, 1, 300)?;
        validate_range(
            "schedule.reminder_offset_days",
            self.schedule.reminder_offset_days,
            -365,
            365,
        )?;

        if self.paths.enriched_roster == self.paths.notifications {
            return Err(ReminderError::InvalidConfigValueError {
                field: "paths.notifications".to_string(),
                value: self.paths.notifications.clone(),
                reason: "must differ from paths.enriched_roster".to_string(),
            });
        }

        Ok(())
    }

    pub fn base_dir(&self) -> &str {
        &self.paths.base_dir
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn roster_path(&self) -> &str {
        &self.paths.roster
    }

    fn vaccine_table_path(&self) -> &str {
        &self.paths.vaccines
    }

    fn enriched_roster_path(&self) -> &str {
        &self.paths.enriched_roster
    }

    fn notifications_path(&self) -> &str {
        &self.paths.notifications
    }

    fn current_date(&self) -> NaiveDate {
        self.schedule
            .current_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn reminder_offset_days(&self) -> i64 {
        self.schedule.reminder_offset_days
    }

    fn drop_trailer_line(&self) -> bool {
        self.schedule.drop_trailer_line
    }

    fn facility_type(&self) -> &str {
        &self.maps.facility_type
    }

    fn lookup_failure_policy(&self) -> LookupFailurePolicy {
        self.maps.on_lookup_failure
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
