use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type FoodId = String;
pub type SessionId = String;
pub type RecordId = String;
pub type StatusId = String;
pub type MatchId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Korean,
    Chinese,
    Japanese,
    Western,
    Fastfood,
    Dessert,
}

impl FoodCategory {
    /// Display metadata shown next to a category (label + emoji)
    pub fn meta(&self) -> (&'static str, &'static str) {
        match self {
            FoodCategory::Korean => ("Korean", "🍚"),
            FoodCategory::Chinese => ("Chinese", "🥟"),
            FoodCategory::Japanese => ("Japanese", "🍣"),
            FoodCategory::Western => ("Western", "🍝"),
            FoodCategory::Fastfood => ("Fast food", "🍔"),
            FoodCategory::Dessert => ("Dessert", "🍰"),
        }
    }
}

/// Which mini-game produced a selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    Random,
    Spinwheel,
    Dice,
    Dart,
    Filter,
    Lottery,
    Balance,
    GridMandalart,
}

impl SelectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMethod::Random => "random",
            SelectionMethod::Spinwheel => "spinwheel",
            SelectionMethod::Dice => "dice",
            SelectionMethod::Dart => "dart",
            SelectionMethod::Filter => "filter",
            SelectionMethod::Lottery => "lottery",
            SelectionMethod::Balance => "balance",
            SelectionMethod::GridMandalart => "grid_mandalart",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub session_id: SessionId,
    pub name: String,
    pub category: FoodCategory,
    pub description: Option<String>,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodInsert {
    pub name: String,
    pub category: FoodCategory,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a food entry (absent fields are left untouched)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub category: Option<FoodCategory>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    pub is_favorite: Option<bool>,
}

/// Keeps `"description": null` distinguishable from an absent field
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(ser),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}

/// One entry in the selection history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub id: RecordId,
    pub session_id: Option<SessionId>,
    pub food_id: Option<FoodId>,
    pub food_name: String,
    pub method: SelectionMethod,
    pub selected_at: String,
}

/// One resolved pair from a balance-game bracket run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceMatch {
    pub id: MatchId,
    pub session_id: Option<SessionId>,
    pub food_a: String,
    pub food_b: String,
    pub selected: String,
    pub created_at: String,
}

/// Anonymous "someone just picked X" entry on the live feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymousStatus {
    pub id: StatusId,
    pub food_name: String,
    pub session_id: SessionId,
    pub created_at: String,
    pub expires_at: String,
}

/// A connected identity. Tokens are handed out once at creation; only
/// their SHA-256 digest is kept server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    #[serde(skip_serializing)]
    pub token_digest: String,
    /// Auto-generated friendly name, always present
    pub guest_name: String,
    /// Name chosen at registration, overrides guest_name for display
    pub display_name: Option<String>,
    pub created_at: String,
    pub last_seen: String,
}

impl Session {
    pub fn display(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.guest_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Guest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How long an anonymous status stays on the feed
    pub status_ttl_secs: u64,
    /// Sweep interval for expired statuses
    pub sweep_interval_secs: u64,
    /// Cap for history listing requests
    pub max_history_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            status_ttl_secs: 3600,
            sweep_interval_secs: 30,
            max_history_limit: 50,
        }
    }
}
