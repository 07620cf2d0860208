//! Repository wizard validation
//!
//! Required-field and URL checks that gate the wizard's finish action.

use reqwest::Url;

use crate::error::BrowserError;

/// Plugin id of the file-based repository type
pub const KETTLE_FILE_REPOSITORY: &str = "KettleFileRepository";
/// Plugin id of the server-based repository type
pub const PENTAHO_REPOSITORY: &str = "PentahoEnterpriseRepository";
/// Plugin id of the database repository type
pub const KETTLE_DATABASE_REPOSITORY: &str = "KettleDatabaseRepository";

/// Fail with the first required field that is blank
///
/// # Examples
/// ```
/// use repotui::logic::wizard::require_fields;
///
/// assert!(require_fields(&[("Display name", "prod")]).is_ok());
/// assert!(require_fields(&[("Display name", "prod"), ("Location", "  ")]).is_err());
/// ```
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), BrowserError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((label, _)) => Err(BrowserError::validation(*label)),
        None => Ok(()),
    }
}

/// Check that a repository URL is an absolute http(s) address with a host
///
/// # Examples
/// ```
/// use repotui::logic::wizard::validate_url;
///
/// assert!(validate_url("http://a").is_ok());
/// assert!(validate_url("ftp://files.example.com").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<(), BrowserError> {
    let invalid = || BrowserError::invalid("URL", "must be an http:// or https:// address");
    let parsed = Url::parse(url.trim()).map_err(|e| {
        tracing::debug!(url, error = %e, "rejected repository url");
        invalid()
    })?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
        _ => Err(invalid()),
    }
}
