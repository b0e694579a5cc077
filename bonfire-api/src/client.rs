use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::normalize::normalize_ids;

/// HTTP client for the storefront REST backend.
///
/// Stateless apart from the connection pool: no retries, no caching.
/// Every successful response body has its `_id` keys rewritten to `id`
/// before it is decoded.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `segments` under the base URL. Each segment is
    /// percent-encoded on its own, so an id holding `/`, `?` or `#` stays a
    /// single path segment. An empty last segment gives a trailing slash.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = |reason: String| {
            ApiError::config(format!("invalid backend URL '{}': {}", self.base_url, reason))
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("it cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, route: &[&str]) -> Result<T, ApiError> {
        let url = self.url(route)?;
        log::debug!("GET {}", url.path());
        self.send(self.http.get(url.clone()), url.path()).await
    }

    pub(crate) async fn get_limited<T: DeserializeOwned>(
        &self,
        route: &[&str],
        limit: u32,
    ) -> Result<T, ApiError> {
        let url = self.url(route)?;
        log::debug!("GET {}?limit={}", url.path(), limit);
        let request = self.http.get(url.clone()).query(&[("limit", limit)]);
        self.send(request, url.path()).await
    }

    pub(crate) async fn post<B, T>(&self, route: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(route)?;
        log::debug!("POST {}", url.path());
        self.send(self.http.post(url.clone()).json(body), url.path())
            .await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, route: &[&str]) -> Result<T, ApiError> {
        let url = self.url(route)?;
        log::debug!("POST {}", url.path());
        self.send(self.http.post(url.clone()), url.path()).await
    }

    pub(crate) async fn put<B, T>(&self, route: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(route)?;
        log::debug!("PUT {}", url.path());
        self.send(self.http.put(url.clone()).json(body), url.path())
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, route: &[&str]) -> Result<T, ApiError> {
        let url = self.url(route)?;
        log::debug!("DELETE {}", url.path());
        self.send(self.http.delete(url.clone()), url.path()).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            log::debug!("{} answered {}", path, status.as_u16());
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        decode(path, &text)
    }
}

/// Decode a successful response body, normalizing backend ids first.
///
/// An empty body decodes as JSON `null`.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ApiError> {
    let decode_err = |source| ApiError::Decode {
        path: path.to_string(),
        source,
    };

    let mut value: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).map_err(decode_err)?
    };
    normalize_ids(&mut value);
    serde_json::from_value(value).map_err(decode_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonfire_core::{DeleteAck, Game};

    fn client(base_url: &str) -> StoreClient {
        StoreClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn url_escapes_each_segment() {
        let api = client("http://localhost:8000/api");
        let url = api.url(&["games", "g 1/2", "also-bought"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/games/g%201%2F2/also-bought");
        assert_eq!(api.url(&["games", ""]).unwrap().path(), "/api/games/");

        let root = client("http://localhost:8000");
        assert_eq!(root.url(&["seed"]).unwrap().path(), "/seed");
    }

    #[test]
    fn decode_normalizes_before_typing() {
        let games: Vec<Game> =
            decode("/games", r#"[{"_id": "a", "title": "Hades", "price": 0}]"#).unwrap();
        assert_eq!(games[0].id, "a");
    }

    #[test]
    fn decode_reports_path() {
        let err = decode::<Game>("/games/x", "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "/games/x"));
        assert!(err.to_string().contains("/games/x"));
    }

    #[test]
    fn decode_empty_body() {
        let ack: Option<DeleteAck> = decode("/games/x", "").unwrap();
        assert!(ack.is_none());
    }
}
