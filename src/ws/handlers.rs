//! Dispatch for client WebSocket messages.
//!
//! Each message resolves synchronously against the shared state or a game
//! engine and returns at most one direct response; live-feed fan-out goes
//! through the broadcast channel instead.

use crate::games::{self, bracket, dart, dice, grid, lottery, slot, wheel};
use crate::protocol::{ClientMessage, ServerMessage, SessionInfo, StrawInfo};
use crate::state::AppState;
use crate::types::{SelectionMethod, SessionId};

fn error(code: &str, msg: impl Into<String>) -> Option<ServerMessage> {
    Some(ServerMessage::Error {
        code: code.to_string(),
        msg: msg.into(),
    })
}

/// Handle a client message for the given session
pub async fn handle_message(
    msg: ClientMessage,
    session_id: &SessionId,
    state: &AppState,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::RegisterSession { display_name } => {
            // Registration goes through the token on HTTP; an established
            // socket is already authenticated as its session
            let trimmed = display_name.trim().to_string();
            if trimmed.is_empty() || trimmed.chars().count() > 30 {
                return error("INVALID_NAME", "Display name must be 1-30 characters");
            }
            let mut sessions = state.sessions.write().await;
            match sessions.get_mut(session_id) {
                Some(session) => {
                    session.display_name = Some(trimmed);
                    Some(ServerMessage::SessionRegistered {
                        session: SessionInfo::from(&*session),
                    })
                }
                None => error("NO_SESSION", "Session not found"),
            }
        }

        ClientMessage::SuggestMenus { count } => {
            let count = count.unwrap_or(8).clamp(2, bracket::MAX_OPTIONS);
            let menus = games::random_menus(count, &mut rand::rng());
            Some(ServerMessage::MenusSuggested { menus })
        }

        ClientMessage::BalanceStart { options } => {
            match state.start_balance(session_id, options).await {
                Ok(progress) => Some(ServerMessage::from(&progress)),
                Err(e) => error("BALANCE_START", e),
            }
        }

        ClientMessage::BalanceChoose { side } => {
            match state.balance_choose(session_id, side).await {
                Ok(progress) => Some(ServerMessage::from(&progress)),
                Err(e) => error("BALANCE_CHOOSE", e),
            }
        }

        ClientMessage::BalanceRetry => match state.balance_retry(session_id).await {
            Ok(progress) => Some(ServerMessage::from(&progress)),
            Err(e) => error("BALANCE_RETRY", e),
        },

        ClientMessage::BalanceAbandon => {
            state.abandon_balance(session_id).await;
            None
        }

        ClientMessage::SlotSpin => {
            let outcome = match slot::spin(games::PRESET_MENUS.len(), &mut rand::rng()) {
                Ok(outcome) => outcome,
                Err(e) => return error("SLOT_SPIN", e.to_string()),
            };
            let winner = games::PRESET_MENUS[outcome.winner_index].to_string();
            state
                .record_selection(
                    Some(session_id.clone()),
                    None,
                    winner.clone(),
                    SelectionMethod::Random,
                )
                .await;
            Some(ServerMessage::SlotResult {
                winner,
                winner_index: outcome.winner_index,
                steps: outcome.steps,
            })
        }

        ClientMessage::WheelSpin {
            options,
            start_rotation,
        } => {
            if let Err(e) = games::validate_pool(&options, wheel::MAX_OPTIONS) {
                return error("WHEEL_SPIN", e.to_string());
            }
            let plan = match wheel::spin(options.len(), start_rotation, &mut rand::rng()) {
                Ok(plan) => plan,
                Err(e) => return error("WHEEL_SPIN", e.to_string()),
            };
            let winner = options[plan.winner_index].clone();
            state
                .record_selection(
                    Some(session_id.clone()),
                    None,
                    winner.clone(),
                    SelectionMethod::Spinwheel,
                )
                .await;
            Some(ServerMessage::WheelResult {
                winner,
                winner_index: plan.winner_index,
                turns: plan.turns,
                target_rotation: plan.target_rotation,
                duration_ms: plan.duration_ms,
            })
        }

        ClientMessage::DiceRoll { options } => {
            if let Err(e) = games::validate_pool(&options, dice::MAX_OPTIONS) {
                return error("DICE_ROLL", e.to_string());
            }
            let outcome = match dice::roll(options.len(), &mut rand::rng()) {
                Ok(outcome) => outcome,
                Err(e) => return error("DICE_ROLL", e.to_string()),
            };
            let winner = options[outcome.winner_index].clone();
            state
                .record_selection(
                    Some(session_id.clone()),
                    None,
                    winner.clone(),
                    SelectionMethod::Dice,
                )
                .await;
            Some(ServerMessage::DiceResult {
                winner,
                face: outcome.face,
                steps: outcome.steps,
            })
        }

        ClientMessage::DartThrow {
            options,
            rotation_degrees,
        } => {
            if let Err(e) = games::validate_pool(&options, dart::MAX_OPTIONS) {
                return error("DART_THROW", e.to_string());
            }
            let hit = match dart::throw(options.len(), rotation_degrees) {
                Ok(hit) => hit,
                Err(e) => return error("DART_THROW", e.to_string()),
            };
            let winner = options[hit.winner_index].clone();
            state
                .record_selection(
                    Some(session_id.clone()),
                    None,
                    winner.clone(),
                    SelectionMethod::Dart,
                )
                .await;
            Some(ServerMessage::DartResult {
                winner,
                winner_index: hit.winner_index,
                flight_ms: hit.flight_ms,
            })
        }

        ClientMessage::LotteryDraw { options } => {
            if let Err(e) = games::validate_pool(&options, lottery::MAX_OPTIONS) {
                return error("LOTTERY_DRAW", e.to_string());
            }
            match state.draw_straws(session_id, options).await {
                Ok(straws) => Some(ServerMessage::LotteryStraws {
                    straws: straws.iter().map(StrawInfo::from).collect(),
                }),
                Err(e) => error("LOTTERY_DRAW", e),
            }
        }

        ClientMessage::LotteryPull { index } => {
            match state.pull_straw(session_id, index).await {
                Ok(winner) => Some(ServerMessage::LotteryResult {
                    winner,
                    index,
                    reveal_delay_ms: lottery::REVEAL_DELAY_MS,
                }),
                Err(e) => error("LOTTERY_PULL", e),
            }
        }

        ClientMessage::GridView { path } => match grid::cells(&path) {
            Ok(cells) => Some(ServerMessage::GridCells { path, cells }),
            Err(e) => error("GRID_VIEW", e.to_string()),
        },

        ClientMessage::GridPick { path, cell_id } => {
            let outcome = grid::pick(&path, &cell_id, &mut rand::rng());
            match outcome {
                Ok(grid::PickOutcome::Descend(id)) => {
                    let mut next = path;
                    next.push(id);
                    match grid::cells(&next) {
                        Ok(cells) => Some(ServerMessage::GridCells { path: next, cells }),
                        Err(e) => error("GRID_PICK", e.to_string()),
                    }
                }
                Ok(grid::PickOutcome::Final(winner)) => {
                    state
                        .record_selection(
                            Some(session_id.clone()),
                            None,
                            winner.clone(),
                            SelectionMethod::GridMandalart,
                        )
                        .await;
                    Some(ServerMessage::GridResult { winner })
                }
                Err(e) => error("GRID_PICK", e.to_string()),
            }
        }

        ClientMessage::PostStatus { food_name } => {
            match state.post_status(session_id, food_name).await {
                // The feed itself goes out on the broadcast channel
                Ok(_) => None,
                Err(e) => error("POST_STATUS", e),
            }
        }
    }
}
