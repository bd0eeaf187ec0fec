use thiserror::Error;

/// Transport failure, or a response that could not be read in full.
#[derive(Debug, Error)]
#[error("GET {url} failed: {message}")]
pub struct NetworkError {
    pub url: String,
    pub message: String,
}

impl NetworkError {
    pub fn new(url: &str, message: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

/// Performs a single GET and hands back the whole body.
pub trait HttpGetter {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, NetworkError>;
}

pub struct ReqwestGetter {
    client: reqwest::blocking::Client,
}

impl ReqwestGetter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ReqwestGetter {
    fn default() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl HttpGetter for ReqwestGetter {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| NetworkError::new(url, e.to_string()))?;

        let body = response
            .bytes()
            .map_err(|e| NetworkError::new(url, e.to_string()))?;

        Ok(body.to_vec())
    }
}
