use crate::utils::error::{GeneIdError, Result};
use std::fmt::Display;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> GeneIdError {
    GeneIdError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 只接受 http/https 的絕對 URL
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// 清單至少一項，且每一項都不可為空白
pub fn validate_non_empty_list(field_name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(invalid(
            field_name,
            "[]",
            "List must contain at least one entry",
        ));
    }
    values
        .iter()
        .try_for_each(|value| validate_non_empty_string(field_name, value))
}

pub fn validate_subset(field_name: &str, values: &[String], allowed: &[String]) -> Result<()> {
    match values.iter().find(|value| !allowed.contains(value)) {
        Some(unknown) => Err(invalid(
            field_name,
            unknown,
            format!("Value must be one of: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("eutils.endpoint", "https://example.com").is_ok());
        assert!(validate_url("eutils.endpoint", "http://example.com").is_ok());
        assert!(validate_url("eutils.endpoint", "").is_err());
        assert!(validate_url("eutils.endpoint", "invalid-url").is_err());
        assert!(validate_url("eutils.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("eutils.min_interval_secs", 0.35, 0.0, 60.0).is_ok());
        assert!(validate_range("eutils.min_interval_secs", -1.0, 0.0, 60.0).is_err());
        assert!(validate_range("report.column_width", 0usize, 1, 200).is_err());
    }

    #[test]
    fn test_validate_lists() {
        let organisms = vec!["Homo sapiens".to_string(), "Mus musculus".to_string()];
        assert!(validate_non_empty_list("questionnaire.organisms", &organisms).is_ok());
        assert!(validate_non_empty_list("questionnaire.organisms", &[]).is_err());
        assert!(validate_non_empty_list("questionnaire.organisms", &["  ".to_string()]).is_err());

        let defaults = vec!["Homo sapiens".to_string()];
        assert!(validate_subset("questionnaire.default_organisms", &defaults, &organisms).is_ok());
        let unknown = vec!["Felis catus".to_string()];
        assert!(validate_subset("questionnaire.default_organisms", &unknown, &organisms).is_err());
    }

    #[test]
    fn test_error_names_field_and_offending_value() {
        let organisms = vec!["Homo sapiens".to_string()];
        let picked = vec!["Homo sapiens".to_string(), "Felis catus".to_string()];

        match validate_subset("questionnaire.default_organisms", &picked, &organisms) {
            Err(GeneIdError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "questionnaire.default_organisms");
                assert_eq!(value, "Felis catus");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
