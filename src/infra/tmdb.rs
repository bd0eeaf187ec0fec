use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::domain::models::{ImageServingConfig, SeasonRecord, ShowQuery};
use crate::infra::http::{HttpGetter, NetworkError};

pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("invalid API response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("invalid API URL {url}: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },
}

pub struct TmdbClient<G> {
    getter: G,
    api_key: String,
    language: String,
    base_url: String,
}

impl<G: HttpGetter> TmdbClient<G> {
    pub fn new(getter: G, api_key: String, language: String, base_url: String) -> Self {
        Self {
            getter,
            api_key,
            language,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The underlying getter, reused for image downloads.
    pub fn getter(&self) -> &G {
        &self.getter
    }

    pub fn fetch_config(&self) -> Result<ImageServingConfig, MetadataError> {
        let url = self.endpoint("configuration", &[])?;
        self.get_json(url)
    }

    /// Searches shows by free text. An empty result list is not an error here.
    pub fn search_shows(&self, name: &str) -> Result<ShowQuery, MetadataError> {
        let url = self.endpoint(
            "search/tv",
            &[
                ("language", self.language.as_str()),
                ("query", name),
                ("page", "1"),
            ],
        )?;
        self.get_json(url)
    }

    pub fn fetch_season(&self, show_id: u64, season: u32) -> Result<SeasonRecord, MetadataError> {
        let url = self.endpoint(
            &format!("tv/{show_id}/season/{season}"),
            &[("language", self.language.as_str())],
        )?;
        self.get_json(url)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, MetadataError> {
        let raw = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|source| MetadataError::Url { url: raw, source })?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .extend_pairs(params.iter().copied());
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MetadataError> {
        let redacted = self.redact(url.as_str());
        tracing::debug!("GET {redacted}");

        let body = self.getter.get_bytes(url.as_str()).map_err(|e| {
            // Keep the key out of error messages
            NetworkError::new(&redacted, self.redact(&e.message))
        })?;

        serde_json::from_slice(&body).map_err(|source| MetadataError::Decode {
            url: redacted,
            source,
        })
    }

    fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            return text.to_string();
        }
        // The key appears form-encoded inside request URLs
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.api_key.as_bytes()).collect();
        text.replace(&self.api_key, "***").replace(&encoded, "***")
    }
}
