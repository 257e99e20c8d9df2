use crate::core::{CompanySearch, LeaderboardEntry, Score, ScoreBoard, SearchQuery, SearchResult};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Client for the three same-origin endpoints: `/search`, `/save-score`
/// and `/leaderboard`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Self::normalize_base(base_url)?,
        })
    }

    /// Makes sure the base ends with `/` so endpoint names are appended
    /// to its path instead of replacing the last segment.
    fn normalize_base(base_url: &str) -> Result<Url> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(name)?)
    }

    /// Turns a non-2xx response into `ServerError`, using the `{error}`
    /// body when the server provides one.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CompanySearch for HttpBackend {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        let url = self.endpoint("search")?;
        tracing::debug!("POST {} with {} companies", url, query.len());

        let response = self.client.post(url).json(query).send().await?;
        tracing::debug!("Search response status: {}", response.status());
        let response = Self::check_status(response).await?;

        match response.json::<Value>().await? {
            Value::Array(items) => Ok(items.iter().map(SearchResult::from_json).collect()),
            other => Err(ClientError::UnexpectedResponse {
                message: format!("expected an array of results, got {}", json_kind(&other)),
            }),
        }
    }
}

#[async_trait]
impl ScoreBoard for HttpBackend {
    async fn save_score(&self, score: &Score) -> Result<()> {
        let url = self.endpoint("save-score")?;
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(score).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let url = self.endpoint("leaderboard")?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<Vec<LeaderboardEntry>>().await?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
