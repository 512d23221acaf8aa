use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The URL cannot have path segments appended.
    #[error("URL cannot be used as a base")]
    CannotBeABase,
}

fn parse_http(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Validate an article link before handing it to the system browser.
///
/// Only http(s) URLs are opened; anything else (`file:`, `javascript:`,
/// custom handlers) is rejected so remote content cannot launch local
/// programs through the opener.
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    parse_http(url_str)
}

/// Validate the configured API base URL.
///
/// Loopback and private hosts are allowed; self-hosted mirrors of the news
/// API commonly live there.
pub fn validate_api_base(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = parse_http(url_str)?;
    if url.cannot_be_a_base() {
        return Err(UrlValidationError::CannotBeABase);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_accepts_http_and_https() {
        assert!(validate_url_for_open("https://example.com/story").is_ok());
        assert!(validate_url_for_open("http://news.example.org/a?b=c").is_ok());
    }

    #[test]
    fn test_open_rejects_other_schemes() {
        assert!(matches!(
            validate_url_for_open("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_url_for_open("javascript:alert(1)").is_err());
        assert!(validate_url_for_open("ftp://example.com").is_err());
    }

    #[test]
    fn test_open_rejects_garbage_and_empty() {
        assert!(matches!(
            validate_url_for_open(""),
            Err(UrlValidationError::InvalidUrl(_))
        ));
        assert!(validate_url_for_open("not a url").is_err());
    }

    #[test]
    fn test_api_base_allows_localhost() {
        let url = validate_api_base("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.port(), Some(8080));
        assert!(validate_api_base("http://localhost:3000/api/").is_ok());
    }

    #[test]
    fn test_api_base_rejects_non_http() {
        assert!(validate_api_base("mailto:news@example.com").is_err());
        assert!(validate_api_base("ws://example.com").is_err());
    }
}
