use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid age: '{value}' (must be a non-negative integer)")]
    InvalidAge { value: String },

    #[error("Person already exists in the roster: {person}")]
    DuplicatePerson { person: String },

    #[error("Malformed line (expected 3 fields): {line}")]
    MalformedLine { line: String },

    #[error("Import aborted at line {line_number}: invalid age in '{line}'")]
    ImportAborted { line_number: usize, line: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Field '{field}' cannot be stored in the {dialect} CSV format: '{value}'")]
    UnencodableField {
        field: String,
        value: String,
        dialect: String,
    },

    #[error("Refusing to overwrite {path}: {dropped} row(s) could not be loaded from it")]
    UnsafeOverwrite { path: String, dropped: usize },

    #[error("Required field '{field}' is empty")]
    MissingField { field: String },

    #[error("No person at position {index} (roster has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Data,
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

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::InvalidAge { .. }
            | RosterError::DuplicatePerson { .. }
            | RosterError::MissingField { .. }
            | RosterError::UnencodableField { .. }
            | RosterError::IndexOutOfRange { .. } => ErrorCategory::Validation,
            RosterError::MalformedLine { .. }
            | RosterError::ImportAborted { .. }
            | RosterError::Csv(_)
            | RosterError::Serialization(_) => ErrorCategory::Data,
            RosterError::Io(_) | RosterError::UnsafeOverwrite { .. } => ErrorCategory::Io,
            RosterError::ConfigError { .. }
            | RosterError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    /// 嚴重程度，CLI 以此決定退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RosterError::DuplicatePerson { .. } | RosterError::MalformedLine { .. } => {
                ErrorSeverity::Low
            }
            RosterError::InvalidAge { .. }
            | RosterError::MissingField { .. }
            | RosterError::UnencodableField { .. }
            | RosterError::IndexOutOfRange { .. } => ErrorSeverity::Medium,
            RosterError::ImportAborted { .. }
            | RosterError::UnsafeOverwrite { .. }
            | RosterError::Csv(_)
            | RosterError::Serialization(_) => ErrorSeverity::High,
            RosterError::Io(_)
            | RosterError::ConfigError { .. }
            | RosterError::InvalidConfigValue { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RosterError::InvalidAge { .. } => "Enter the age as a whole number, zero or greater",
            RosterError::DuplicatePerson { .. } => {
                "Change the name, surname or age so the entry is unique"
            }
            RosterError::MalformedLine { .. } => {
                "Each row must have exactly three fields: name,surname,age"
            }
            RosterError::ImportAborted { .. } => {
                "Fix the age column on the reported line and import again"
            }
            RosterError::Io(_) => "Check that the file exists and that you have permission to access it",
            RosterError::Csv(_) => "Check that quoted fields are properly closed",
            RosterError::Serialization(_) => "Retry without --json",
            RosterError::MissingField { .. } => "Fill in name, surname and age",
            RosterError::UnencodableField { .. } => {
                "Remove commas and line breaks, or switch to --dialect quoted"
            }
            RosterError::UnsafeOverwrite { .. } => {
                "Fix the reported lines in the file, or pass --force to rewrite it anyway"
            }
            RosterError::IndexOutOfRange { .. } => "Run `list` to see the valid positions",
            RosterError::ConfigError { .. } | RosterError::InvalidConfigValue { .. } => {
                "Review the configuration file and command-line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::InvalidAge { .. } => "La edad debe ser un número válido.".to_string(),
            RosterError::DuplicatePerson { .. } => {
                "Esta persona ya existe en la lista.".to_string()
            }
            RosterError::MalformedLine { line } => {
                format!("Línea inválida en el archivo: {}", line)
            }
            RosterError::ImportAborted { .. } => {
                "El archivo contiene datos inválidos.".to_string()
            }
            RosterError::MissingField { .. } => "Por favor, completa todos los campos.".to_string(),
            RosterError::IndexOutOfRange { .. } => {
                "Por favor, selecciona una persona existente.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// 退出碼：回報給使用者的錯誤一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = RosterError::InvalidAge {
            value: "-1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = RosterError::ImportAborted {
            line_number: 3,
            line: "Ana,Lopez,treinta".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert!(err.to_string().contains("line 3"));

        let err: RosterError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_every_reported_error_exits_non_zero() {
        let duplicate = RosterError::DuplicatePerson {
            person: "Ana Lopez (30 años)".to_string(),
        };
        assert_eq!(duplicate.severity(), ErrorSeverity::Low);
        assert_ne!(duplicate.exit_code(), 0);

        let malformed = RosterError::MalformedLine {
            line: "Ana,Lopez".to_string(),
        };
        assert_ne!(malformed.exit_code(), 0);

        let overwrite = RosterError::UnsafeOverwrite {
            path: "personas.csv".to_string(),
            dropped: 1,
        };
        assert_eq!(overwrite.exit_code(), 1);
    }

    #[test]
    fn test_user_friendly_message_for_malformed_line() {
        let err = RosterError::MalformedLine {
            line: "Ana,Lopez".to_string(),
        };
        assert!(err.user_friendly_message().ends_with("Ana,Lopez"));
    }
}
