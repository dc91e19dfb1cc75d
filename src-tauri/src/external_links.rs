use tauri::{AppHandle, Runtime};
use tauri_plugin_opener::OpenerExt;
use url::Url;

use crate::navigation_policy::ExternalOpener;

pub(crate) fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

/// Hands addresses to the platform's default URL handler.
pub(crate) struct SystemOpener<'a, R: Runtime> {
    app_handle: &'a AppHandle<R>,
}

impl<'a, R: Runtime> SystemOpener<'a, R> {
    pub(crate) fn new(app_handle: &'a AppHandle<R>) -> Self {
        Self { app_handle }
    }
}

impl<R: Runtime> ExternalOpener for SystemOpener<'_, R> {
    fn open_external(&self, address: &Url) -> Result<(), String> {
        self.app_handle
            .opener()
            .open_url(address.as_str(), None::<&str>)
            .map_err(|error| format!("Failed to open {address} with system handler: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::parse_openable_url;

    #[test]
    fn parse_openable_url_accepts_web_links() {
        let parsed = parse_openable_url("  https://example.com/stories ").expect("valid url");
        assert_eq!(parsed.as_str(), "https://example.com/stories");
    }

    #[test]
    fn parse_openable_url_rejects_missing_and_non_web_urls() {
        assert_eq!(
            parse_openable_url("   "),
            Err("Missing external URL.".to_string())
        );
        assert!(parse_openable_url("not a url").is_err());
        assert_eq!(
            parse_openable_url("file:///etc/passwd"),
            Err("Unsupported URL scheme 'file', only http/https are allowed.".to_string())
        );
    }
}
