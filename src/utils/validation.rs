use crate::utils::error::{ReminderError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReminderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ReminderError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Rejects blank values and `${VAR}` placeholders whose variable was never set.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    if value.starts_with("${") && value.ends_with('}') {
        return Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Environment variable placeholder was not resolved".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReminderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("maps.endpoint", "https://maps.googleapis.com").is_ok());
        assert!(validate_url("maps.endpoint", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("maps.endpoint", "").is_err());
        assert!(validate_url("maps.endpoint", "invalid-url").is_err());
        assert!(validate_url("maps.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("paths.roster", "government.tsv").is_ok());
        assert!(validate_path("paths.roster", "").is_err());
        assert!(validate_path("paths.roster", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string_rejects_placeholders() {
        assert!(validate_non_empty_string("maps.api_key", "abc123").is_ok());
        assert!(validate_non_empty_string("maps.api_key", "   ").is_err());
        assert!(validate_non_empty_string("maps.api_key", "${GOOGLE_MAPS_API_KEY}").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("schedule.reminder_offset_days", 14, -365, 365).is_ok());
        assert!(validate_range("schedule.reminder_offset_days", 400, -365, 365).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("key".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("maps.api_key", &present).unwrap(), "key");
        assert!(matches!(
            validate_required_field("maps.api_key", &missing),
            Err(ReminderError::MissingConfigError { .. })
        ));
    }
}
