//! Catalog client: listing and search requests against the museum API
//!
//! Both requests are read-only GETs returning one page of artworks.
//! An empty (after trimming) query selects the plain listing endpoint.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::constants::api;
use crate::error::CatalogError;
use crate::types::{Artwork, ArtworkPage};

/// Source of catalog pages
pub trait Catalog {
    /// Fetch page `page` (1-based) for `query`
    fn fetch_page(
        &self,
        page: u32,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Artwork>, CatalogError>> + Send;
}

/// HTTP catalog client
///
/// Cheap to clone, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// `base_url` is the API root, e.g. `https://api.artic.edu/api/v1`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(api::USER_AGENT)
            .connect_timeout(Duration::from_secs(api::CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base_url })
    }
}

impl Catalog for CatalogClient {
    async fn fetch_page(&self, page: u32, query: &str) -> Result<Vec<Artwork>, CatalogError> {
        let url = page_url(&self.base_url, page, query)?;
        debug!(%url, page, "Fetching catalog page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), page, "Catalog returned an error status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: ArtworkPage = serde_json::from_slice(&body)?;
        debug!(page, count = parsed.data.len(), "Fetched catalog page");
        Ok(parsed.data)
    }
}

/// Ensure the base URL ends with '/' so relative joins append instead of replace
fn parse_base_url(base_url: &str) -> Result<Url, CatalogError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Ok(Url::parse(&format!("{trimmed}/"))?)
}

/// Listing or search URL depending on whether `query` has any content
pub fn page_url(base_url: &Url, page: u32, query: &str) -> Result<Url, CatalogError> {
    if query.trim().is_empty() {
        listing_url(base_url, page)
    } else {
        search_url(base_url, page, query)
    }
}

/// `<base>/artworks?fields=..&page=N&limit=20`
pub fn listing_url(base_url: &Url, page: u32) -> Result<Url, CatalogError> {
    let mut url = base_url.join(api::ARTWORKS_PATH)?;
    url.query_pairs_mut()
        .append_pair("fields", &api::FIELDS.join(","))
        .append_pair("page", &page.to_string())
        .append_pair("limit", &api::PAGE_SIZE.to_string());
    Ok(url)
}

/// `<base>/artworks/search?params=<url-encoded JSON>`
pub fn search_url(base_url: &Url, page: u32, query: &str) -> Result<Url, CatalogError> {
    let mut url = base_url.join(api::SEARCH_PATH)?;
    url.query_pairs_mut()
        .append_pair("params", &search_params(page, query));
    Ok(url)
}

/// JSON value of the `params` parameter; the raw (untrimmed) query is sent
pub fn search_params(page: u32, query: &str) -> String {
    json!({
        "q": query,
        "fields": api::FIELDS,
        "page": page,
        "limit": api::PAGE_SIZE,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;

    const FIELDS: &str = "id,title,artist_display,date_display,image_id";

    fn base() -> Url {
        parse_base_url("https://api.artic.edu/api/v1").unwrap()
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(&format!("{}/api/v1", server.base_url()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let a = parse_base_url("https://api.artic.edu/api/v1").unwrap();
        let b = parse_base_url("https://api.artic.edu/api/v1/").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "https://api.artic.edu/api/v1/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            CatalogClient::new("not a url", Duration::from_secs(1)),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_listing_url() {
        let url = listing_url(&base(), 3).unwrap();
        assert_eq!(url.path(), "/api/v1/artworks");

        let params = query_map(&url);
        assert_eq!(params["fields"], FIELDS);
        assert_eq!(params["page"], "3");
        assert_eq!(params["limit"], "20");
    }

    #[test]
    fn test_search_url_packs_params_json() {
        let url = search_url(&base(), 2, "water lilies").unwrap();
        assert_eq!(url.path(), "/api/v1/artworks/search");

        let params = query_map(&url);
        assert_eq!(params.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&params["params"]).unwrap();
        assert_eq!(value["q"], "water lilies");
        assert_eq!(value["page"], 2);
        assert_eq!(value["limit"], 20);
        assert_eq!(
            value["fields"],
            serde_json::json!(["id", "title", "artist_display", "date_display", "image_id"])
        );
    }

    #[test]
    fn test_blank_query_uses_listing() {
        let url = page_url(&base(), 1, "   ").unwrap();
        assert_eq!(url.path(), "/api/v1/artworks");

        let url = page_url(&base(), 1, " monet ").unwrap();
        assert_eq!(url.path(), "/api/v1/artworks/search");
        // Raw query is sent untrimmed
        let value: serde_json::Value = serde_json::from_str(&query_map(&url)["params"]).unwrap();
        assert_eq!(value["q"], " monet ");
    }

    #[tokio::test]
    async fn test_fetch_listing_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/artworks")
                    .query_param("fields", FIELDS)
                    .query_param("page", "1")
                    .query_param("limit", "20");
                then.status(200).json_body(serde_json::json!({
                    "data": [
                        { "id": 1, "title": "One", "artist_display": "A", "date_display": "1900", "image_id": "x" },
                        { "id": 2, "title": "Two", "artist_display": null, "date_display": null, "image_id": null }
                    ]
                }));
            })
            .await;

        let artworks = client_for(&server).fetch_page(1, "").await.unwrap();
        assert_eq!(artworks.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(artworks[1].image_id, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_search_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/artworks/search")
                    .query_param("params", search_params(4, "monet"));
                then.status(200).json_body(serde_json::json!({
                    "data": [{ "id": 16568, "title": "Water Lilies", "_score": 100.0 }]
                }));
            })
            .await;

        let artworks = client_for(&server).fetch_page(4, "monet").await.unwrap();
        assert_eq!(artworks.len(), 1);
        assert_eq!(artworks[0].title, "Water Lilies");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/api/v1/artworks");
                then.status(503).body("unavailable");
            })
            .await;

        let result = client_for(&server).fetch_page(1, "").await;
        assert!(matches!(result, Err(CatalogError::Status(503))), "{result:?}");
    }

    #[tokio::test]
    async fn test_malformed_body_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/api/v1/artworks");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let result = client_for(&server).fetch_page(1, "").await;
        assert!(matches!(result, Err(CatalogError::Decode(_))), "{result:?}");
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/api/v1/artworks");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(serde_json::json!({ "data": [] }));
            })
            .await;

        let client = CatalogClient::new(&format!("{}/api/v1", server.base_url()), Duration::from_millis(200)).unwrap();
        let result = client.fetch_page(1, "").await;
        assert!(matches!(result, Err(CatalogError::Request(_))), "{result:?}");
    }
}
