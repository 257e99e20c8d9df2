use crate::utils::error::{ClientError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Symbols must be non-blank; duplicates are collapsed later, but at least one distinct symbol is required.
pub fn validate_symbols(field_name: &str, symbols: &[String]) -> Result<()> {
    if let Some(blank) = symbols.iter().find(|s| s.trim().is_empty()) {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: blank.clone(),
            reason: "Symbols cannot be empty or whitespace-only".to_string(),
        });
    }

    let distinct: HashSet<&str> = symbols.iter().map(String::as_str).collect();
    if distinct.is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one symbol is required".to_string(),
        });
    }
    Ok(())
}
