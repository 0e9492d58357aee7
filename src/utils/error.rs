use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read source file '{path}': {source}")]
    SourceError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Export error: {message}")]
    ExportError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::SourceError { .. } | ReportError::IoError(_) => ErrorCategory::Io,
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::ExportError { .. } => ErrorCategory::Export,
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 來源檔案讀不到，整個執行中止
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Export => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::SourceError { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => {
                    "Check that the input file exists or pass --input-path"
                }
                std::io::ErrorKind::PermissionDenied => {
                    "Check the read permissions of the input file"
                }
                _ => "Check that the input file is readable and not truncated",
            },
            ReportError::IoError(_) => "Check file system permissions and free space",
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::ExportError { .. } => {
                "Check the --output-path directory and --output-format value"
            }
            ReportError::ConfigError { .. } | ReportError::ConfigValidationError { .. } => {
                "Make sure the config file exists and is valid TOML"
            }
            ReportError::InvalidConfigValueError { .. } => {
                "Run with --help to see the accepted values"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::SourceError { path, .. } => {
                format!("Could not read the input file '{}'", path)
            }
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
