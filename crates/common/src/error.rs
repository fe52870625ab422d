//! Error types for forum-warga.

use std::collections::BTreeMap;

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Per-field validation messages, ordered by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Already voted on poll {poll_id}")]
    AlreadyVoted {
        /// Poll the duplicate vote targeted.
        poll_id: String,
    },

    #[error("Validation error: {}", describe_fields(.0))]
    Validation(FieldErrors),

    // === Server Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_fields(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Build a validation error for a single field.
    #[must_use]
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        Self::Validation(errors)
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::AlreadyVoted { .. } => "ALREADY_VOTED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message shown to residents.
    ///
    /// Validation errors carry their own per-field messages; this returns
    /// the first of them.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Data tidak ditemukan".to_string(),
            Self::Unauthenticated => "Silakan login terlebih dahulu".to_string(),
            Self::Forbidden(_) => "Anda tidak memiliki akses".to_string(),
            Self::AlreadyVoted { .. } => "Anda sudah memberikan suara".to_string(),
            Self::Validation(errors) => errors
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| "Data tidak valid".to_string()),
            Self::Config(_) | Self::Internal(_) => "Terjadi kesalahan sistem".to_string(),
        }
    }

    /// Returns the per-field messages of a validation error.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns whether this error is a fault of the system rather than of the input.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Internal(_))
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let errors = err
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                errors.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string);
                    (field.to_string(), message)
                })
            })
            .collect();
        Self::Validation(errors)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthenticated.error_code(), "UNAUTHENTICATED");
        assert_eq!(
            AppError::AlreadyVoted {
                poll_id: "1".to_string()
            }
            .error_code(),
            "ALREADY_VOTED"
        );
        assert!(AppError::Internal("boom".to_string()).is_server_error());
        assert!(!AppError::NotFound("poll".to_string()).is_server_error());
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = AppError::Validation(btreemap! {
            "email".to_string() => "Email wajib diisi".to_string(),
            "rt".to_string() => "RT wajib diisi".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Validation error: email: Email wajib diisi; rt: RT wajib diisi"
        );
        assert_eq!(err.user_message(), "Email wajib diisi");
    }

    #[test]
    fn test_single_field_helper() {
        let err = AppError::field("option_ids", "Pilih minimal satu opsi");
        assert_eq!(
            err.field_errors().unwrap(),
            &btreemap! { "option_ids".to_string() => "Pilih minimal satu opsi".to_string() }
        );
    }

    #[test]
    fn test_from_validation_errors_keeps_first_message() {
        let mut errors = validator::ValidationErrors::new();
        let mut first = validator::ValidationError::new("required");
        first.message = Some("Nama wajib diisi".into());
        errors.add("name", first);
        errors.add("name", validator::ValidationError::new("length"));
        errors.add("phone", validator::ValidationError::new("regex"));

        let err = AppError::from(errors);
        assert_eq!(
            err.field_errors().unwrap(),
            &btreemap! {
                "name".to_string() => "Nama wajib diisi".to_string(),
                "phone".to_string() => "regex".to_string(),
            }
        );
    }
}
