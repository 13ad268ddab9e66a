use serde::{Deserialize, Serialize};

use crate::games::bracket::Side;
use crate::games::dice::DiceStep;
use crate::games::grid::GridCell;
use crate::games::lottery::Straw;
use crate::games::slot::SlotStep;
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Attach a chosen display name to the session
    RegisterSession {
        display_name: String,
    },
    /// Ask for a random pool of preset menus (auto-suggest)
    SuggestMenus {
        count: Option<usize>,
    },
    BalanceStart {
        options: Vec<String>,
    },
    BalanceChoose {
        side: Side,
    },
    /// Re-run the bracket from the original pool
    BalanceRetry,
    BalanceAbandon,
    SlotSpin,
    WheelSpin {
        options: Vec<String>,
        #[serde(default)]
        start_rotation: f64,
    },
    DiceRoll {
        options: Vec<String>,
    },
    DartThrow {
        options: Vec<String>,
        rotation_degrees: f64,
    },
    /// Shuffle options into a fan of face-down straws
    LotteryDraw {
        options: Vec<String>,
    },
    LotteryPull {
        index: usize,
    },
    GridView {
        path: Vec<String>,
    },
    GridPick {
        path: Vec<String>,
        cell_id: String,
    },
    /// Put an anonymous "I picked X" on the live feed
    PostStatus {
        food_name: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        session: SessionInfo,
        /// Raw token, only present when the session was created just now
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        server_now: String,
    },
    SessionRegistered {
        session: SessionInfo,
    },
    MenusSuggested {
        menus: Vec<String>,
    },
    /// A pair is on the table, waiting for a choice
    BalancePair {
        left: String,
        right: String,
        round_label: String,
        alive: usize,
    },
    /// The bracket has reduced to a single winner
    BalanceWinner {
        winner: String,
        matches_played: u32,
    },
    SlotResult {
        winner: String,
        winner_index: usize,
        steps: Vec<SlotStep>,
    },
    WheelResult {
        winner: String,
        winner_index: usize,
        turns: u32,
        target_rotation: f64,
        duration_ms: u32,
    },
    DiceResult {
        winner: String,
        face: u32,
        steps: Vec<DiceStep>,
    },
    DartResult {
        winner: String,
        winner_index: usize,
        flight_ms: u32,
    },
    /// Face-down straws: dressing only, labels withheld until a pull
    LotteryStraws {
        straws: Vec<StrawInfo>,
    },
    LotteryResult {
        winner: String,
        index: usize,
        reveal_delay_ms: u32,
    },
    GridCells {
        path: Vec<String>,
        cells: Vec<GridCell>,
    },
    GridResult {
        winner: String,
    },
    /// Current anonymous statuses, newest first
    StatusFeed {
        statuses: Vec<StatusInfo>,
    },
    /// Broadcast whenever any client lands on a menu
    SelectionRecorded {
        food_name: String,
        method: SelectionMethod,
        by: String,
    },
    Error {
        code: String,
        msg: String,
    },
}

/// Public session info (token digest withheld)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub display_name: String,
    pub registered: bool,
}

impl From<&Session> for SessionInfo {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id.clone(),
            display_name: s.display().to_string(),
            registered: s.display_name.is_some(),
        }
    }
}

/// A straw as shown before any pull: visual dressing without the label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrawInfo {
    pub color_index: usize,
    pub height: f64,
    pub lean_degrees: f64,
}

impl From<&Straw> for StrawInfo {
    fn from(s: &Straw) -> Self {
        Self {
            color_index: s.color_index,
            height: s.height,
            lean_degrees: s.lean_degrees,
        }
    }
}

/// A status entry on the live feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub id: StatusId,
    pub food_name: String,
    pub created_at: String,
    pub expires_at: String,
}

impl From<&AnonymousStatus> for StatusInfo {
    fn from(s: &AnonymousStatus) -> Self {
        Self {
            id: s.id.clone(),
            food_name: s.food_name.clone(),
            created_at: s.created_at.clone(),
            expires_at: s.expires_at.clone(),
        }
    }
}

/// A history entry joined with its food's category when it still resolves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: RecordId,
    pub food_id: Option<FoodId>,
    pub food_name: String,
    pub method: SelectionMethod,
    pub selected_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FoodCategory>,
}

/// Aggregates over a session's selection history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: usize,
    pub method_counts: std::collections::HashMap<String, u32>,
    pub top_foods: Vec<FoodCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodCount {
    pub name: String,
    pub count: u32,
}
