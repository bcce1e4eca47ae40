use std::time::Duration;

use async_trait::async_trait;
use guess_core::{Scorer, ScoringError};
use guess_types::{deserialize_similarity, DateKey, ScoreOutcome};
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

const GUESS_PATH: &str = "/api/v0/quiz/daily/GuessWord/guess";

/// Body returned by the daily guess endpoint. Only the score fields matter.
#[derive(Debug, Deserialize)]
pub struct ScoreResponse {
    #[serde(rename = "doubleScore", default, deserialize_with = "deserialize_similarity")]
    pub double_score: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub correct: bool,
}

impl ScoreResponse {
    pub fn into_outcome(self) -> ScoreOutcome {
        ScoreOutcome::new(self.double_score, self.correct)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientFlag {
    Flag(bool),
    Other(IgnoredAny),
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(
        LenientFlag::deserialize(deserializer)?,
        LenientFlag::Flag(true)
    ))
}

/// Asks the remote daily puzzle service how close a word is.
pub struct HttpScorer {
    client: Client,
    base_url: String,
}

impl HttpScorer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn guess_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GUESS_PATH)
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, word: &str, date_key: DateKey) -> Result<ScoreOutcome, ScoringError> {
        let date = date_key.to_string();
        tracing::debug!("Scoring '{}' for {}", word, date);

        let response = self
            .client
            .get(self.guess_url())
            .query(&[("date", date.as_str()), ("word", word)])
            .header(ACCEPT, "*/*")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Scoring request failed: {:?}", e);
                ScoringError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!("Scoring service returned status: {}", response.status());
            return Err(ScoringError::Status(response.status().as_u16()));
        }

        let body: ScoreResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse scoring response: {:?}", e);
            ScoringError::Malformed(e.to_string())
        })?;

        Ok(body.into_outcome())
    }
}
