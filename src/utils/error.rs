use thiserror::Error;

pub const MAX_COMPANIES: usize = 50;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] QueryError),

    #[error("Server responded with {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },
}

impl ClientError {
    /// Short message suitable for showing to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::HttpError(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            ClientError::HttpError(e) if e.is_connect() => "Could not reach the server".to_string(),
            ClientError::HttpError(_) => "A network error occurred".to_string(),
            ClientError::UrlError(_) | ClientError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            ClientError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ClientError::ValidationError(e) => e.to_string(),
            ClientError::ServerError { message, .. } => format!("The server reported an error: {}", message),
            ClientError::UnexpectedResponse { .. } | ClientError::SerializationError(_) => {
                "The server sent a response that could not be read".to_string()
            }
            ClientError::CsvError(_) | ClientError::IoError(_) => format!("Could not write output: {}", self),
        }
    }
}

/// Rejections raised before a search request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please enter at least one company name")]
    Empty,

    #[error("Maximum {max} companies allowed at once")]
    TooMany { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_messages() {
        assert_eq!(QueryError::Empty.to_string(), "Please enter at least one company name");
        assert_eq!(
            QueryError::TooMany { count: 51, max: MAX_COMPANIES }.to_string(),
            "Maximum 50 companies allowed at once"
        );
    }

    #[test]
    fn test_server_error_friendly_message() {
        let err = ClientError::ServerError {
            status: 500,
            message: "scraper down".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "The server reported an error: scraper down");
    }
}
