//! HTTP page loader.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use pagebrief_protocols::error::PlatformError;
use pagebrief_protocols::types::PageContent;

use crate::extractor::extract;

const USER_AGENT: &str = concat!("pagebrief/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a page over HTTP and extracts it.
#[derive(Clone)]
pub struct PageLoader {
    client: Client,
}

impl PageLoader {
    pub fn new() -> Result<Self, PlatformError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Build a loader whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PlatformError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    /// GET `url` and extract its readable content.
    pub async fn load(&self, url: &str) -> Result<PageContent, PlatformError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| PlatformError::TabUnreachable(format!("Invalid URL {}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PlatformError::TabUnreachable(format!(
                "Cannot read {} pages",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| PlatformError::TabUnreachable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::TabUnreachable(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PlatformError::TabUnreachable(format!("Failed to read body: {}", e)))?;
        debug!(url = %url, bytes = html.len(), "Loaded page");

        Ok(extract(&html, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_and_extract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Post</title></head><body><nav>x</nav><p>Body text</p></body></html>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/article", server.uri());
        let page = PageLoader::new().unwrap().load(&url).await.unwrap();
        assert_eq!(page.title, "Post");
        assert_eq!(page.url, url);
        assert_eq!(page.text, "Body text");
    }

    #[tokio::test]
    async fn test_http_error_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = PageLoader::new()
            .unwrap()
            .load(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::TabUnreachable(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_privileged_scheme_rejected() {
        let err = PageLoader::new().unwrap().load("chrome://extensions").await.unwrap_err();
        assert!(matches!(err, PlatformError::TabUnreachable(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let err = PageLoader::new().unwrap().load("not a url").await.unwrap_err();
        assert!(matches!(err, PlatformError::TabUnreachable(_)));
    }

    #[tokio::test]
    async fn test_timeout_and_user_agent_applied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<body>late</body>")
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let loader = PageLoader::with_timeout(Duration::from_millis(100)).unwrap();
        let err = loader.load(&server.uri()).await.unwrap_err();
        assert!(matches!(err, PlatformError::TabUnreachable(_)));
        assert!(err.to_string().contains("Request failed"));
    }
}
