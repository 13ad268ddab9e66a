use super::AppState;
use crate::types::*;

const MAX_NAME_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Normalize a name for duplicate comparison (trim whitespace, lowercase)
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Food name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(format!(
            "Food name must be at most {} characters",
            MAX_NAME_CHARS
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: Option<String>) -> Result<Option<String>, String> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_CHARS => Err(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_CHARS
        )),
        other => Ok(other),
    }
}

/// Filters for listing foods
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FoodQuery {
    pub category: Option<FoodCategory>,
    pub search: Option<String>,
    #[serde(default)]
    pub favorites_only: bool,
}

impl AppState {
    /// Add a food to the caller's catalog, rejecting duplicates by
    /// normalized name
    pub async fn create_food(
        &self,
        session_id: &SessionId,
        input: FoodInsert,
    ) -> Result<Food, String> {
        let name = validate_name(&input.name)?;
        let description = validate_description(input.description)?;

        let normalized_new = normalize(&name);
        let mut foods = self.foods.write().await;
        if foods
            .values()
            .any(|f| f.session_id == *session_id && normalize(&f.name) == normalized_new)
        {
            return Err("DUPLICATE_NAME".to_string());
        }

        let now = chrono::Utc::now().to_rfc3339();
        let food = Food {
            id: ulid::Ulid::new().to_string(),
            session_id: session_id.clone(),
            name,
            category: input.category,
            description,
            is_favorite: false,
            created_at: now.clone(),
            updated_at: now,
        };

        foods.insert(food.id.clone(), food.clone());
        Ok(food)
    }

    /// List the caller's foods, newest first, with optional filters
    pub async fn list_foods(&self, session_id: &SessionId, query: &FoodQuery) -> Vec<Food> {
        let search = query.search.as_deref().map(|s| s.trim().to_lowercase());
        let foods = self.foods.read().await;

        let mut matched: Vec<Food> = foods
            .values()
            .filter(|f| f.session_id == *session_id)
            .filter(|f| query.category.map_or(true, |c| f.category == c))
            .filter(|f| {
                search
                    .as_deref()
                    .map_or(true, |s| f.name.to_lowercase().contains(s))
            })
            .filter(|f| !query.favorites_only || f.is_favorite)
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    pub async fn get_food(&self, id: &FoodId) -> Option<Food> {
        self.foods.read().await.get(id).cloned()
    }

    /// Apply a partial update to an owned food
    pub async fn update_food(
        &self,
        session_id: &SessionId,
        id: &FoodId,
        update: FoodUpdate,
    ) -> Result<Food, String> {
        let name = update.name.map(|n| validate_name(&n)).transpose()?;
        let description = update
            .description
            .map(validate_description)
            .transpose()?;

        let mut foods = self.foods.write().await;

        if let Some(new_name) = &name {
            let normalized_new = normalize(new_name);
            if foods.values().any(|f| {
                f.session_id == *session_id
                    && f.id != *id
                    && normalize(&f.name) == normalized_new
            }) {
                return Err("DUPLICATE_NAME".to_string());
            }
        }

        let food = foods.get_mut(id).ok_or("Food not found")?;
        if food.session_id != *session_id {
            return Err("Not authorized to update this food".to_string());
        }

        if let Some(name) = name {
            food.name = name;
        }
        if let Some(category) = update.category {
            food.category = category;
        }
        if let Some(description) = description {
            food.description = description;
        }
        if let Some(is_favorite) = update.is_favorite {
            food.is_favorite = is_favorite;
        }
        food.updated_at = chrono::Utc::now().to_rfc3339();

        Ok(food.clone())
    }

    pub async fn delete_food(&self, session_id: &SessionId, id: &FoodId) -> Result<(), String> {
        let mut foods = self.foods.write().await;
        match foods.get(id) {
            Some(food) if food.session_id == *session_id => {
                foods.remove(id);
                Ok(())
            }
            Some(_) => Err("Not authorized to delete this food".to_string()),
            None => Err("Food not found".to_string()),
        }
    }

    pub async fn toggle_favorite(
        &self,
        session_id: &SessionId,
        id: &FoodId,
    ) -> Result<Food, String> {
        let mut foods = self.foods.write().await;
        let food = foods.get_mut(id).ok_or("Food not found")?;
        if food.session_id != *session_id {
            return Err("Not authorized to update this food".to_string());
        }
        food.is_favorite = !food.is_favorite;
        food.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(food.clone())
    }
}
