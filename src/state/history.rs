use super::AppState;
use crate::protocol::{HistoryEntry, ServerMessage};
use crate::types::*;

impl AppState {
    /// Append a selection to the history and announce it on the live feed.
    /// This is the single reporting point every game funnels through.
    pub async fn record_selection(
        &self,
        session_id: Option<SessionId>,
        food_id: Option<FoodId>,
        food_name: String,
        method: SelectionMethod,
    ) -> SelectionRecord {
        let record = SelectionRecord {
            id: ulid::Ulid::new().to_string(),
            session_id: session_id.clone(),
            food_id,
            food_name: food_name.clone(),
            method,
            selected_at: chrono::Utc::now().to_rfc3339(),
        };

        self.history.write().await.push(record.clone());

        let by = match &session_id {
            Some(id) => {
                let sessions = self.sessions.read().await;
                sessions
                    .get(id)
                    .map(|s| s.display().to_string())
                    .unwrap_or_else(|| "someone".to_string())
            }
            None => "someone".to_string(),
        };
        self.broadcast_to_all(ServerMessage::SelectionRecorded {
            food_name,
            method,
            by,
        });

        record
    }

    /// The caller's history, newest first, joined with food categories
    /// where the food id still resolves
    pub async fn history_for(&self, session_id: &SessionId, limit: usize) -> Vec<HistoryEntry> {
        let limit = limit.clamp(1, self.config.max_history_limit);
        let history = self.history.read().await;
        let foods = self.foods.read().await;

        let mut entries: Vec<HistoryEntry> = history
            .iter()
            .filter(|r| r.session_id.as_ref() == Some(session_id))
            .map(|r| HistoryEntry {
                id: r.id.clone(),
                food_id: r.food_id.clone(),
                food_name: r.food_name.clone(),
                method: r.method,
                selected_at: r.selected_at.clone(),
                category: r
                    .food_id
                    .as_ref()
                    .and_then(|id| foods.get(id))
                    .map(|f| f.category),
            })
            .collect();

        entries.sort_by(|a, b| b.selected_at.cmp(&a.selected_at));
        entries.truncate(limit);
        entries
    }
}
