use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// --- Cached page ---

/// One cached fact check, keyed by normalized URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub url: String,
    pub content: String,
    pub content_hash: String,
    pub facts: Option<FactCheckPayload>,
    pub timestamp: DateTime<Utc>,
}

impl ContentRecord {
    /// True while `now` is strictly inside the freshness window that started at `timestamp`.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        now - self.timestamp < window
    }
}

// --- Fact check payload ---

/// The model's verdict on an article, in the shape the prompt asks for.
///
/// Field names on the wire follow the prompt (`50_words_summary`, `list_of_facts`),
/// so stored documents match what the model produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckPayload {
    #[serde(rename = "50_words_summary")]
    pub summary: String,
    #[serde(rename = "list_of_facts")]
    pub facts: Vec<FactItem>,
}

impl FactCheckPayload {
    /// Strictly convert an arbitrary JSON value into a payload.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn count(&self, accuracy: Accuracy) -> usize {
        self.facts.iter().filter(|f| f.accuracy == accuracy).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactItem {
    pub fact: String,
    #[serde(rename = "accurate")]
    pub accuracy: Accuracy,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accuracy {
    Accurate,
    ContextRequired,
    Misleading,
}

impl Accuracy {
    /// The exact label the prompt asks the model to use.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accuracy::Accurate => "accurate",
            Accuracy::ContextRequired => "accurate but context required",
            Accuracy::Misleading => "misleading",
        }
    }

    /// Sort key: misleading first, accurate last.
    pub fn severity(&self) -> u8 {
        match self {
            Accuracy::Misleading => 0,
            Accuracy::ContextRequired => 1,
            Accuracy::Accurate => 2,
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accuracy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "accurate" => Ok(Accuracy::Accurate),
            "accurate but context required" | "context required" => Ok(Accuracy::ContextRequired),
            "misleading" => Ok(Accuracy::Misleading),
            _ => Err(format!("unknown accuracy label: {s:?}")),
        }
    }
}

impl Serialize for Accuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Accuracy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn record_at(timestamp: DateTime<Utc>) -> ContentRecord {
        ContentRecord {
            url: "https://example.com/a".into(),
            content: "Sky is blue.".into(),
            content_hash: crate::content_hash("Sky is blue."),
            facts: None,
            timestamp,
        }
    }

    #[test]
    fn freshness_window_is_strict() {
        let now = Utc::now();
        let window = Duration::minutes(5);
        assert!(record_at(now - Duration::minutes(4)).is_fresh(now, window));
        assert!(!record_at(now - Duration::minutes(5)).is_fresh(now, window));
        assert!(!record_at(now - Duration::hours(3)).is_fresh(now, window));
    }

    #[test]
    fn payload_reads_prompt_shape() {
        let payload = FactCheckPayload::from_value(json!({
            "50_words_summary": "A short article about the sky.",
            "list_of_facts": [
                {"fact": "The sky is green.", "accurate": "misleading", "explanation": "It is blue."},
                {"fact": "Sky is blue.", "accurate": "accurate", "explanation": ""}
            ]
        }))
        .unwrap();

        assert_eq!(payload.summary, "A short article about the sky.");
        assert_eq!(payload.facts.len(), 2);
        assert_eq!(payload.facts[0].accuracy, Accuracy::Misleading);
        assert_eq!(payload.count(Accuracy::Accurate), 1);
    }

    #[test]
    fn payload_serializes_back_to_prompt_shape() {
        let payload = FactCheckPayload {
            summary: "s".into(),
            facts: vec![FactItem {
                fact: "f".into(),
                accuracy: Accuracy::ContextRequired,
                explanation: "e".into(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "50_words_summary": "s",
                "list_of_facts": [{"fact": "f", "accurate": "accurate but context required", "explanation": "e"}]
            })
        );
    }

    #[test]
    fn missing_explanation_defaults_to_empty() {
        let item: FactItem =
            serde_json::from_value(json!({"fact": "f", "accurate": "accurate"})).unwrap();
        assert_eq!(item.explanation, "");
    }

    #[test]
    fn missing_keys_are_rejected() {
        assert!(FactCheckPayload::from_value(json!({"summary": "x", "facts": []})).is_err());
        assert!(FactCheckPayload::from_value(json!({"50_words_summary": "x"})).is_err());
    }

    #[test]
    fn accuracy_labels_are_lenient() {
        assert_eq!("Accurate".parse::<Accuracy>(), Ok(Accuracy::Accurate));
        assert_eq!("MISLEADING ".parse::<Accuracy>(), Ok(Accuracy::Misleading));
        assert_eq!("context_required".parse::<Accuracy>(), Ok(Accuracy::ContextRequired));
        assert_eq!(
            "Accurate but context required".parse::<Accuracy>(),
            Ok(Accuracy::ContextRequired)
        );
        assert!("mostly true".parse::<Accuracy>().is_err());
    }

    #[test]
    fn severity_orders_misleading_first() {
        let mut labels = vec![Accuracy::Accurate, Accuracy::Misleading, Accuracy::ContextRequired];
        labels.sort_by_key(Accuracy::severity);
        assert_eq!(
            labels,
            vec![Accuracy::Misleading, Accuracy::ContextRequired, Accuracy::Accurate]
        );
    }
}
