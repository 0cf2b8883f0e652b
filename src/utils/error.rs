use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    StoreNotFound { name: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Sheet host error: {message}")]
    HostError { message: String },

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Store,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SheetError {
    pub fn validation(message: impl Into<String>) -> Self {
        SheetError::ValidationError {
            message: message.into(),
        }
    }

    pub fn store_not_found(name: impl Into<String>) -> Self {
        SheetError::StoreNotFound { name: name.into() }
    }

    pub fn host(message: impl Into<String>) -> Self {
        SheetError::HostError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SheetError::ValidationError { .. } | SheetError::ApiError(_) => ErrorCategory::Request,
            SheetError::StoreNotFound { .. } | SheetError::HostError { .. } => ErrorCategory::Store,
            SheetError::CsvError(_)
            | SheetError::IoError(_)
            | SheetError::SerializationError(_) => ErrorCategory::Io,
            SheetError::ConfigError { .. }
            | SheetError::InvalidConfigValueError { .. }
            | SheetError::MissingConfigError { .. }
            | SheetError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Store => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// HTTP 狀態碼：驗證 400、找不到工作表 404、其餘 500
    pub fn status_code(&self) -> u16 {
        match self {
            SheetError::ValidationError { .. } => 400,
            SheetError::StoreNotFound { .. } => 404,
            _ => 500,
        }
    }

    /// 回傳給外部呼叫者的訊息；內部故障不外洩細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            SheetError::ValidationError { message } => message.clone(),
            SheetError::StoreNotFound { name } => format!("Sheet '{}' not found", name),
            SheetError::ConfigError { .. }
            | SheetError::InvalidConfigValueError { .. }
            | SheetError::MissingConfigError { .. }
            | SheetError::ConfigValidationError { .. } => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SheetError::ValidationError { .. } => {
                "Provide projectName, projectType, region and a non-zero price"
            }
            SheetError::StoreNotFound { .. } => {
                "Start the server with seeding enabled or create the sheet first"
            }
            SheetError::HostError { .. } | SheetError::ApiError(_) => {
                "Check that the sheet host is reachable and retry"
            }
            SheetError::CsvError(_) | SheetError::IoError(_) => {
                "Check the data directory exists and is writable"
            }
            SheetError::SerializationError(_) => "Check the request body is valid JSON",
            _ => "Review the configuration file and command line flags",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SheetError::validation("Missing required fields").status_code(), 400);
        assert_eq!(SheetError::store_not_found("graph").status_code(), 404);
        assert_eq!(SheetError::host("boom").status_code(), 500);
    }

    #[test]
    fn test_internal_faults_are_masked() {
        let err = SheetError::host("disk exploded at /var/secret");
        assert_eq!(err.user_friendly_message(), "Internal server error");
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = SheetError::validation("Missing required fields");
        assert_eq!(err.user_friendly_message(), "Missing required fields");
        assert_eq!(err.category(), ErrorCategory::Request);
    }
}
