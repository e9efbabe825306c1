//! Gutendex API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BookSource, GutendexError, SearchResponse};

/// Gutendex API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GutendexConfig {
    /// Base URL (default: https://gutendex.com/books).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://gutendex.com/books".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!(
        "Bookshelf/{} ( https://github.com/bookshelf/bookshelf )",
        env!("CARGO_PKG_VERSION")
    )
}

impl Default for GutendexConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Gutendex API client.
pub struct GutendexClient {
    client: Client,
    base_url: String,
}

impl GutendexClient {
    /// Create a new Gutendex client.
    pub fn new(config: GutendexConfig) -> Result<Self, GutendexError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<SearchResponse, GutendexError> {
        debug!("Gutendex request: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GutendexError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GutendexError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookSource for GutendexClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, GutendexError> {
        let url = format!("{}?search={}", self.base_url, encode_query(query));
        self.fetch_page(&url).await
    }

    async fn popular(&self) -> Result<SearchResponse, GutendexError> {
        self.fetch_page(&self.base_url).await
    }
}

/// Build the `search` parameter value: diacritics folded to ASCII, then
/// URL-encoded. Gutendex matches plain ASCII titles better than accented
/// input.
fn encode_query(query: &str) -> String {
    urlencoding::encode(&strip_diacritics(query)).into_owned()
}

fn strip_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("José"), "Jose");
        assert_eq!(strip_diacritics("Machado de Assis"), "Machado de Assis");
        assert_eq!(strip_diacritics("Fünf Märchen"), "Funf Marchen");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("war and peace"), "war%20and%20peace");
        assert_eq!(encode_query("São Paulo"), "Sao%20Paulo");
    }

    #[test]
    fn test_default_config() {
        let config = GutendexConfig::default();
        assert_eq!(config.base_url, "https://gutendex.com/books");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("Bookshelf/"));
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let client = GutendexClient::new(GutendexConfig::default());
        assert!(client.is_ok());
    }
}
