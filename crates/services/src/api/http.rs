use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use trivia_core::model::{Analytics, GameSessionRecord, NewGameSession, Question};
use url::Url;

use super::TriviaApi;
use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct HttpTriviaConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpTriviaConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Reads `TRIVIA_SERVER_URL`; `None` when unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let base_url = lookup("TRIVIA_SERVER_URL")?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(base_url.trim()))
    }
}

/// `TriviaApi` over the REST service.
#[derive(Clone, Debug)]
pub struct HttpTriviaApi {
    client: Client,
    base: Url,
}

impl HttpTriviaApi {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base URL does not parse, or
    /// `ApiError::Http` if the client cannot be built.
    pub fn new(config: &HttpTriviaConfig) -> Result<Self, ApiError> {
        let mut raw = config.base_url.trim().to_owned();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Top scores from the server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    pub async fn leaderboard(&self, limit: Option<u32>) -> Result<Vec<GameSessionRecord>, ApiError> {
        let mut url = self.endpoint("api/leaderboard")?;
        if let Some(limit) = limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }
        read_json(self.client.get(url).send().await?).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    pub async fn analytics(&self) -> Result<Analytics, ApiError> {
        let url = self.endpoint("api/analytics")?;
        read_json(self.client.get(url).send().await?).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status()));
    }
    Ok(response.json().await?)
}

#[async_trait]
impl TriviaApi for HttpTriviaApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint("api/questions")?;
        read_json(self.client.get(url).send().await?).await
    }

    async fn submit_session(
        &self,
        tally: &NewGameSession,
    ) -> Result<GameSessionRecord, ApiError> {
        let url = self.endpoint("api/game-sessions")?;
        read_json(self.client.post(url).json(tally).send().await?).await
    }
}
