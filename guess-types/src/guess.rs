use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Similarity of the exact target word.
pub const EXACT_SIMILARITY: f64 = 1.0;

/// One submitted word and its score against the day's hidden word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecord {
    pub word: String,
    #[serde(default, deserialize_with = "deserialize_similarity")]
    pub similarity: f64,
    #[ts(type = "number")]
    pub timestamp: i64, // Unix millis, unique within a day
}

impl GuessRecord {
    pub fn new(word: impl Into<String>, similarity: f64, timestamp: i64) -> Self {
        Self {
            word: word.into(),
            similarity: sanitize_similarity(similarity),
            timestamp,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.similarity == EXACT_SIMILARITY
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_similarity(self.similarity)
    }

    /// Similarity as a percentage with two decimals, e.g. `"42.10%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.similarity * 100.0)
    }
}

/// Display bucket for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ScoreTier {
    Exact, // Green
    Hot,   // Blue, >= 0.7
    Warm,  // Yellow, >= 0.4
    Cold,  // Red
}

impl ScoreTier {
    pub fn for_similarity(similarity: f64) -> Self {
        if similarity == EXACT_SIMILARITY {
            ScoreTier::Exact
        } else if similarity >= 0.7 {
            ScoreTier::Hot
        } else if similarity >= 0.4 {
            ScoreTier::Warm
        } else {
            ScoreTier::Cold
        }
    }
}

/// What the scoring service says about one guess, after sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreOutcome {
    pub similarity: f64,
    pub correct: bool,
}

impl ScoreOutcome {
    /// A correct answer always carries the exact similarity so the derived
    /// `solved` flag agrees with the service's verdict.
    pub fn new(similarity: f64, correct: bool) -> Self {
        let similarity = if correct {
            EXACT_SIMILARITY
        } else {
            sanitize_similarity(similarity)
        };
        Self {
            similarity,
            correct,
        }
    }
}

/// Maps untrusted scores into `[0, 1]`; non-finite values become 0.
pub fn sanitize_similarity(value: f64) -> f64 {
    if value.is_finite() {
        // + 0.0 turns -0.0 into 0.0
        value.clamp(0.0, EXACT_SIMILARITY) + 0.0
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Other(IgnoredAny),
}

/// Accepts any JSON value for a similarity; anything but a number reads as 0.
pub fn deserialize_similarity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(value) => sanitize_similarity(value),
        LenientNumber::Other(_) => 0.0,
    })
}
