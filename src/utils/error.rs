use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("TSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecordError {
        source_name: String,
        line: u64,
        reason: String,
    },

    #[error("Invalid date '{value}': {reason}")]
    InvalidDateError { value: String, reason: String },

    #[error("{service} lookup failed: {message}")]
    LookupError { service: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    ExternalService,
    Storage,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReminderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::LookupError { .. } => ErrorCategory::ExternalService,
            Self::CsvError(_)
            | Self::MalformedRecordError { .. }
            | Self::InvalidDateError { .. } => ErrorCategory::Input,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::SerializationError(_) => ErrorCategory::Serialization,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 外部服務錯誤通常可重試
            ErrorCategory::ExternalService => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    /// True for failures reported by, or on the way to, the mapping service.
    pub fn is_lookup_failure(&self) -> bool {
        self.category() == ErrorCategory::ExternalService
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => {
                "Check network connectivity to the mapping service, or rerun with --on-lookup-failure degrade"
            }
            Self::LookupError { .. } => {
                "Verify maps.api_key and the quota of the mapping account"
            }
            Self::CsvError(_) | Self::MalformedRecordError { .. } => {
                "Each input line must be tab-separated with the expected number of fields"
            }
            Self::InvalidDateError { .. } => "Dates must be written as MM/DD/YYYY",
            Self::IoError(_) => "Check that the configured paths exist and are writable",
            Self::SerializationError(_) => {
                "The persisted JSON artifact is damaged; regenerate it with the enrich or schedule command"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line overrides"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input file problem: {}", self),
            ErrorCategory::ExternalService => format!("Mapping service problem: {}", self),
            ErrorCategory::Storage => format!("File system problem: {}", self),
            ErrorCategory::Serialization => format!("Data format problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReminderError>;
