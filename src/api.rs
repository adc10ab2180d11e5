//! HTTP client for the public artwork catalog API
//!
//! One GET per page request. Pages are replaced wholesale on the caller's
//! side; this module never returns a partial page.

use crate::constants::{API_BASE_URL, FETCH_TIMEOUT_SECS};
use crate::types::{ArtworkEnvelope, ArtworkPage};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Http(u16),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Client for the artwork catalog API
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_url(API_BASE_URL.to_string())
    }

    pub fn with_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { base_url, client }
    }

    /// Fetch one page of artworks. `page` is 1-based; values below 1 are
    /// clamped to the first page.
    pub async fn fetch_artworks(&self, page: u32, limit: u32) -> Result<ArtworkPage, ApiError> {
        let page = page.max(1);
        let url = format!("{}/artworks", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        let envelope: ArtworkEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(envelope.into())
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{
        "pagination": {
            "total": 129713,
            "limit": 12,
            "offset": 0,
            "total_pages": 10810,
            "current_page": 1
        },
        "data": [
            {
                "id": 14556,
                "title": "Auvers, Panoramic View",
                "place_of_origin": "France",
                "artist_display": "Paul Cézanne\nFrench, 1839-1906",
                "inscriptions": null,
                "date_start": 1873,
                "date_end": 1875
            },
            {
                "id": 99539,
                "title": null,
                "place_of_origin": null,
                "date_start": null,
                "date_end": null
            }
        ]
    }"#;

    #[test]
    fn envelope_parses_with_null_and_absent_fields() {
        let env: ArtworkEnvelope = serde_json::from_str(ENVELOPE).unwrap();
        assert_eq!(env.pagination.total, 129713);
        assert_eq!(env.pagination.current_page, 1);
        assert_eq!(env.data.len(), 2);

        let first = &env.data[0];
        assert_eq!(first.id, 14556);
        assert_eq!(first.place_of_origin.as_deref(), Some("France"));
        assert_eq!(first.inscriptions, None);
        assert_eq!(first.date_start, Some(1873));

        // Second record omits artist_display and inscriptions entirely
        let second = &env.data[1];
        assert_eq!(second.title, None);
        assert_eq!(second.artist_display, None);
        assert_eq!(second.inscriptions, None);
    }

    #[test]
    fn envelope_ignores_unknown_fields() {
        let raw = r#"{
            "pagination": {"total": 1, "limit": 12, "current_page": 1, "next_url": "x"},
            "data": [{"id": 7, "api_model": "artworks", "thumbnail": {"width": 3}}],
            "info": {"license_text": "..."}
        }"#;
        let env: ArtworkEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(env.data[0].id, 7);
    }

    #[test]
    fn page_conversion_carries_metadata() {
        let env: ArtworkEnvelope = serde_json::from_str(ENVELOPE).unwrap();
        let page = ArtworkPage::from(env);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 12);
        assert_eq!(page.total, 129713);
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(
            ApiError::Http(503).to_string(),
            "server returned HTTP 503"
        );
        assert!(ApiError::Network("timed out".into())
            .to_string()
            .contains("timed out"));
    }
}
