//! In-process game server.
//!
//! `SimulatedServer` implements every host trait against plain state: a map
//! rotation, a game mode, per-mode time-limit settings and a chat log.  The
//! `maptime` binary drives it from stdin; tests inspect it after each call.
//!
//! Settings follow the real server's two-step model: `write_time_limit`
//! stages a value, `publish` makes every staged value live.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use maptime_core::{GameMode, LimitUnit, MapInfo, Notice, Role};
use tracing::debug;

use crate::application::host::{Authority, HostError, MapDirectory, ModeSettings, Notifier};

/// One line of chat output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatLine {
    All(String),
    To { login: String, text: String },
}

impl std::fmt::Display for ChatLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatLine::All(text) => write!(f, "[all] {text}"),
            ChatLine::To { login, text } => write!(f, "[to {login}] {text}"),
        }
    }
}

#[derive(Debug)]
struct ServerState {
    maps: Vec<MapInfo>,
    current: usize,
    mode: GameMode,
    staged: HashMap<GameMode, i64>,
    published: HashMap<GameMode, i64>,
    publish_count: u32,
    fail_publish: bool,
    chat: Vec<ChatLine>,
}

/// A snapshot for the console's `status` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatus {
    pub current: Option<MapInfo>,
    pub next: Option<MapInfo>,
    pub mode: GameMode,
    pub unit: LimitUnit,
    pub published: Vec<(GameMode, i64)>,
}

#[derive(Debug)]
pub struct SimulatedServer {
    state: Mutex<ServerState>,
    roles: HashMap<String, Role>,
    unit: LimitUnit,
}

impl SimulatedServer {
    /// A server playing `maps` in order, starting with the first.
    pub fn new(maps: Vec<MapInfo>, mode: GameMode, unit: LimitUnit) -> Self {
        Self {
            state: Mutex::new(ServerState {
                maps,
                current: 0,
                mode,
                staged: HashMap::new(),
                published: HashMap::new(),
                publish_count: 0,
                fail_publish: false,
                chat: Vec::new(),
            }),
            roles: HashMap::new(),
            unit,
        }
    }

    /// Grants `role` to `login`.
    pub fn with_role(mut self, login: impl Into<String>, role: Role) -> Self {
        self.roles.insert(login.into(), role);
        self
    }

    /// Replaces the whole role table.
    pub fn with_roles(mut self, roles: HashMap<String, Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Moves to the next map of the rotation, wrapping around.  Returns the
    /// new current map.
    pub fn advance_map(&self) -> Option<MapInfo> {
        let mut state = self.lock();
        if state.maps.is_empty() {
            return None;
        }
        state.current = (state.current + 1) % state.maps.len();
        let map = state.maps[state.current].clone();
        debug!(map = %map.file_name, "map loaded");
        Some(map)
    }

    pub fn set_mode(&self, mode: GameMode) {
        self.lock().mode = mode;
    }

    /// Makes subsequent publishes fail.
    pub fn set_fail_publish(&self, fail: bool) {
        self.lock().fail_publish = fail;
    }

    /// The live time-limit setting of `mode`, if one was ever published.
    pub fn published_limit(&self, mode: GameMode) -> Option<i64> {
        self.lock().published.get(&mode).copied()
    }

    pub fn publish_count(&self) -> u32 {
        self.lock().publish_count
    }

    /// Chat lines sent so far.
    pub fn chat(&self) -> Vec<ChatLine> {
        self.lock().chat.clone()
    }

    /// Chat lines sent so far; clears the log.
    pub fn take_chat(&self) -> Vec<ChatLine> {
        std::mem::take(&mut self.lock().chat)
    }

    pub fn status(&self) -> ServerStatus {
        let state = self.lock();
        let mut published: Vec<(GameMode, i64)> =
            state.published.iter().map(|(m, v)| (*m, *v)).collect();
        published.sort_by_key(|(m, _)| format!("{m:?}"));
        ServerStatus {
            current: state.maps.get(state.current).cloned(),
            next: next_index(&state).and_then(|i| state.maps.get(i).cloned()),
            mode: state.mode,
            unit: self.unit,
            published,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_index(state: &ServerState) -> Option<usize> {
    (!state.maps.is_empty()).then(|| (state.current + 1) % state.maps.len())
}

fn empty_rotation(query: &'static str) -> HostError {
    HostError::Query {
        query,
        reason: "map rotation is empty".to_string(),
    }
}

impl MapDirectory for SimulatedServer {
    fn current_map(&self) -> Result<MapInfo, HostError> {
        let state = self.lock();
        state
            .maps
            .get(state.current)
            .cloned()
            .ok_or_else(|| empty_rotation("current_map"))
    }

    fn next_map(&self) -> Result<MapInfo, HostError> {
        let state = self.lock();
        next_index(&state)
            .and_then(|i| state.maps.get(i).cloned())
            .ok_or_else(|| empty_rotation("next_map"))
    }
}

impl ModeSettings for SimulatedServer {
    fn active_mode(&self) -> GameMode {
        self.lock().mode
    }

    fn limit_unit(&self) -> LimitUnit {
        self.unit
    }

    fn write_time_limit(&self, mode: GameMode, value: i64) {
        self.lock().staged.insert(mode, value);
    }

    fn publish(&self) -> Result<(), HostError> {
        let mut state = self.lock();
        if state.fail_publish {
            return Err(HostError::Publish("server refused settings".to_string()));
        }
        let staged = std::mem::take(&mut state.staged);
        state.published.extend(staged);
        state.publish_count += 1;
        Ok(())
    }
}

impl Authority for SimulatedServer {
    fn role_of(&self, login: &str) -> Role {
        self.roles.get(login).copied().unwrap_or(Role::Player)
    }
}

impl Notifier for SimulatedServer {
    fn send_to_all(&self, notice: &Notice) {
        self.lock().chat.push(ChatLine::All(notice.to_string()));
    }

    fn send_to(&self, login: &str, notice: &Notice) {
        self.lock().chat.push(ChatLine::To {
            login: login.to_string(),
            text: notice.to_string(),
        });
    }
}
