use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::conversation::{Conversation, ConversationEntry};

/// The most recent successful analysis of a session, kept for download.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub location: String,
    pub generated_at: DateTime<Local>,
    pub response: String,
}

impl AnalysisReport {
    /// `weather_analysis_<location>_<YYYYmmdd_HHMMSS>.txt`. Spaces become
    /// underscores; anything outside `[A-Za-z0-9._-]` is replaced as well
    /// so the name is safe in a Content-Disposition header.
    pub fn file_name(&self) -> String {
        let location: String = self
            .location
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!(
            "weather_analysis_{}_{}.txt",
            location,
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub conversation: Conversation,
    pub last_report: Option<AnalysisReport>,
}

/// Per-visitor conversation state, keyed by session id.
///
/// The lock is only taken for short in-memory operations. Callers snapshot
/// the history, run the analysis unlocked, then record the exchange.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.lock().await.insert(id, Session::default());
        info!("Created session {id}");
        id
    }

    pub async fn history(&self, id: Uuid) -> Result<Vec<ConversationEntry>, AppError> {
        self.with_session(id, |session| session.conversation.entries().to_vec())
            .await
    }

    /// Appends a completed exchange and makes `report` the downloadable one.
    pub async fn record_exchange(
        &self,
        id: Uuid,
        request: String,
        report: AnalysisReport,
    ) -> Result<(), AppError> {
        self.with_session(id, |session| {
            session
                .conversation
                .append_exchange(request, report.response.clone());
            session.last_report = Some(report);
        })
        .await
    }

    /// Empties the conversation and forgets the last report.
    pub async fn clear(&self, id: Uuid) -> Result<(), AppError> {
        let had_history = self
            .with_session(id, |session| {
                let had_history = !session.conversation.is_empty();
                session.conversation.clear();
                session.last_report = None;
                had_history
            })
            .await?;
        info!(had_history, "Cleared history for session {id}");
        Ok(())
    }

    pub async fn last_report(&self, id: Uuid) -> Result<Option<AnalysisReport>, AppError> {
        self.with_session(id, |session| session.last_report.clone())
            .await
    }

    async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(f(session))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn report(location: &str, response: &str) -> AnalysisReport {
        AnalysisReport {
            location: location.to_string(),
            generated_at: Local.with_ymd_and_hms(2026, 10, 19, 14, 5, 9).unwrap(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_file_name_replaces_spaces() {
        assert_eq!(
            report("New York", "").file_name(),
            "weather_analysis_New_York_20261019_140509.txt"
        );
    }

    #[test]
    fn test_file_name_is_header_safe() {
        assert_eq!(
            report("São \"Paulo\"/SP", "").file_name(),
            "weather_analysis_S_o__Paulo__SP_20261019_140509.txt"
        );
    }

    #[tokio::test]
    async fn test_new_session_has_empty_history() {
        let store = SessionStore::default();
        let id = store.create().await;
        assert!(store.history(id).await.unwrap().is_empty());
        assert!(store.last_report(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_exchange_appends_pair_and_sets_report() {
        let store = SessionStore::default();
        let id = store.create().await;
        store
            .record_exchange(
                id,
                "Analyze weather for Paris".to_string(),
                report("Paris", "### Weather Analysis for Paris"),
            )
            .await
            .unwrap();

        let history = store.history(id).await.unwrap();
        assert_eq!(
            history,
            vec![
                ConversationEntry::Human("Analyze weather for Paris".to_string()),
                ConversationEntry::Assistant("### Weather Analysis for Paris".to_string()),
            ]
        );
        assert_eq!(store.last_report(id).await.unwrap().unwrap().location, "Paris");
    }

    #[tokio::test]
    async fn test_clear_drops_history_and_report() {
        let store = SessionStore::default();
        let id = store.create().await;
        store
            .record_exchange(id, "q".to_string(), report("Paris", "a"))
            .await
            .unwrap();

        store.clear(id).await.unwrap();
        assert!(store.history(id).await.unwrap().is_empty());
        assert!(store.last_report(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::default();
        let first = store.create().await;
        let second = store.create().await;
        store
            .record_exchange(first, "q".to_string(), report("Paris", "a"))
            .await
            .unwrap();
        assert!(store.history(second).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::default();
        let err = store.history(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
