//! Error types and handling for `pgforecast`

use thiserror::Error;

/// Main error type for the forecast engine and its collaborators
#[derive(Error, Debug)]
pub enum PgForecastError {
    /// Configuration-related errors, including malformed tuning snapshots
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Requested site is not in the site list
    #[error("Site not found: {name}")]
    SiteNotFound { name: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding or decoding errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl PgForecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PgForecastError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            PgForecastError::Api { .. } => {
                "Unable to fetch weather data. Please check your internet connection.".to_string()
            }
            PgForecastError::Validation { message } => format!("Invalid input: {message}"),
            PgForecastError::SiteNotFound { name } => {
                format!("No site named '{name}' in the sites file.")
            }
            PgForecastError::Io { .. } => {
                "File operation failed. Please check file paths and permissions.".to_string()
            }
            PgForecastError::Json { .. } => "Malformed JSON data.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = PgForecastError::config("ideal_min >= ideal_max");
        assert!(matches!(config_err, PgForecastError::Config { .. }));

        let api_err = PgForecastError::api("status 500");
        assert!(matches!(api_err, PgForecastError::Api { .. }));

        let validation_err = PgForecastError::validation("bad wind range");
        assert!(matches!(validation_err, PgForecastError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = PgForecastError::config("weak_angle");
        assert!(config_err.user_message().contains("weak_angle"));

        let api_err = PgForecastError::api("test");
        assert!(api_err.user_message().contains("Unable to fetch"));

        let missing = PgForecastError::SiteNotFound {
            name: "Ringstead".to_string(),
        };
        assert!(missing.user_message().contains("Ringstead"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PgForecastError = io_err.into();
        assert!(matches!(err, PgForecastError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PgForecastError = json_err.into();
        assert!(matches!(err, PgForecastError::Json { .. }));
    }
}
