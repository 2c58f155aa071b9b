pub mod request;

pub use request::{dump_url, DataRequest};

/// Something that can fetch the text body of a URL
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// GET `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not a success,
    /// or the body cannot be read
    async fn get(&self, url: &str) -> Result<String, String>;
}

/// Fetches over HTTP, resolving relative URLs against a base
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Option<reqwest::Url>,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(base: Option<reqwest::Url>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Fetcher resolving URLs relative to the current page
    #[must_use]
    pub fn from_location() -> Self {
        let base = web_sys::window()
            .and_then(|window| window.location().href().ok())
            .and_then(|href| reqwest::Url::parse(&href).ok());

        Self::new(base)
    }

    fn resolve(&self, url: &str) -> Result<reqwest::Url, String> {
        match &self.base {
            Some(base) => base.join(url),
            None => reqwest::Url::parse(url),
        }
        .map_err(|e| format!("Invalid URL '{url}': {e}"))
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String, String> {
        let url = self.resolve(url)?;

        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?
            .error_for_status()
            .map_err(|e| format!("Request failed: {e}"))?
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_to_page() {
        let base = reqwest::Url::parse("https://maps.example.org/routino/visualiser.html?lat=1").ok();
        let fetcher = HttpFetcher::new(base);

        let url = fetcher.resolve("visualiser.cgi?dump=n1").map(String::from);
        assert_eq!(url.as_deref(), Ok("https://maps.example.org/routino/visualiser.cgi?dump=n1"));
    }

    #[test]
    fn test_resolve_without_base_needs_absolute_url() {
        let fetcher = HttpFetcher::new(None);
        assert!(fetcher.resolve("visualiser.cgi").is_err());
        assert!(fetcher.resolve("https://example.org/a").is_ok());
    }
}
