//! Rows of the `text_logs` table and summaries over them

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Who produced a logged utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

/// One row of `text_logs`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextLog {
    pub id: i64,
    pub session_id: String,
    pub client_id: String,
    /// Client-side epoch milliseconds
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: Speaker,
    pub text: String,
    #[serde(default)]
    pub is_transcription: Option<bool>,
    #[serde(default)]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TextLog {
    pub fn is_transcription(&self) -> bool {
        self.is_transcription.unwrap_or(false)
    }
}

/// Aggregate view of a batch of log rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogSummary {
    pub total: usize,
    pub by_type: BTreeMap<Speaker, usize>,
    pub sessions: usize,
    pub transcriptions: usize,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

impl LogSummary {
    pub fn from_logs(logs: &[TextLog]) -> Self {
        let mut summary = LogSummary {
            total: logs.len(),
            ..LogSummary::default()
        };
        let mut sessions = std::collections::BTreeSet::new();

        for log in logs {
            *summary.by_type.entry(log.kind).or_insert(0) += 1;
            sessions.insert(log.session_id.as_str());
            if log.is_transcription() {
                summary.transcriptions += 1;
            }
            summary.earliest = Some(match summary.earliest {
                Some(t) if t <= log.created_at => t,
                _ => log.created_at,
            });
            summary.latest = Some(match summary.latest {
                Some(t) if t >= log.created_at => t,
                _ => log.created_at,
            });
        }

        summary.sessions = sessions.len();
        summary
    }
}

/// First `limit` rows flagged as transcriptions, in input order
pub fn sample_transcriptions(logs: &[TextLog], limit: usize) -> Vec<&TextLog> {
    logs.iter()
        .filter(|l| l.is_transcription())
        .take(limit)
        .collect()
}
