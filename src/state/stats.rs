use super::AppState;
use crate::protocol::{FoodCount, StatsSummary};
use crate::types::SessionId;
use std::collections::HashMap;

const TOP_FOODS: usize = 5;

impl AppState {
    /// Aggregate the caller's selection history: total picks, picks per
    /// method, and the five most-picked foods.
    pub async fn stats_for(&self, session_id: &SessionId) -> StatsSummary {
        let history = self.history.read().await;

        let mut method_counts: HashMap<String, u32> = HashMap::new();
        let mut food_counts: HashMap<String, u32> = HashMap::new();
        let mut total = 0;

        for record in history
            .iter()
            .filter(|r| r.session_id.as_ref() == Some(session_id))
        {
            total += 1;
            *method_counts
                .entry(record.method.as_str().to_string())
                .or_insert(0) += 1;
            *food_counts.entry(record.food_name.clone()).or_insert(0) += 1;
        }

        let mut top_foods: Vec<FoodCount> = food_counts
            .into_iter()
            .map(|(name, count)| FoodCount { name, count })
            .collect();
        // Ties break alphabetically so the ranking is stable
        top_foods.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));
        top_foods.truncate(TOP_FOODS);

        StatsSummary {
            total,
            method_counts,
            top_foods,
        }
    }
}
