use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::debug;

use super::error::DepotError;
use super::key::{normalize, DepotKey};
use crate::internal::log::{LoggerHandle, NullLogger};

static GLOBAL: Lazy<LoggerDepot> = Lazy::new(LoggerDepot::new);

#[derive(Default)]
struct DepotState {
    entries: IndexMap<DepotKey, LoggerHandle>,
    fallback: Option<DepotKey>,
}

impl DepotState {
    /// Deepest registered key on the path of `key`, the key itself included
    fn find(&self, key: &DepotKey) -> Option<(&DepotKey, &LoggerHandle)> {
        key.ancestors().find_map(|candidate| self.entries.get_key_value(candidate))
    }

    fn fallback_entry(&self) -> Option<(&DepotKey, &LoggerHandle)> {
        self.fallback
            .as_ref()
            .and_then(|key| self.entries.get_key_value(key))
    }
}

/// Thread-safe registry mapping namespace keys to loggers.
///
/// Lookups never fail: an unknown key resolves to its nearest registered
/// ancestor, then to the fallback logger, then to a [`NullLogger`].
pub struct LoggerDepot {
    state: RwLock<DepotState>,
    null: LoggerHandle,
}

impl Default for LoggerDepot {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerDepot {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DepotState::default()),
            null: Arc::new(NullLogger),
        }
    }

    /// Depot shared by the whole process
    pub fn global() -> &'static LoggerDepot {
        &GLOBAL
    }

    fn read(&self) -> RwLockReadGuard<'_, DepotState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DepotState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.read().entries.contains_key(normalize(key))
    }

    /// Register `logger` under `key`. The first registered logger becomes
    /// the fallback.
    pub fn register(&self, key: &str, logger: LoggerHandle) {
        self.register_with(key, logger, false);
    }

    /// Register `logger` under `key`, replacing any logger already there
    /// without moving the key. With `is_fallback` the key also becomes the
    /// fallback.
    pub fn register_with(&self, key: &str, logger: LoggerHandle, is_fallback: bool) {
        let key = DepotKey::new(key);
        let mut state = self.write();

        let replaced = state.entries.insert(key.clone(), logger).is_some();
        debug!(key = %key, replaced, "registered logger");

        if state.fallback.is_none() || is_fallback {
            debug!(key = %key, "fallback logger set");
            state.fallback = Some(key);
        }
    }

    /// Remove the logger under `key`. Unknown keys are ignored.
    ///
    /// When the fallback is removed, the entry registered right after it
    /// takes over (wrapping around to the first entry).
    pub fn unregister(&self, key: &str) {
        let key = DepotKey::new(key);
        let mut state = self.write();

        let Some(index) = state.entries.get_index_of(&key) else {
            return;
        };

        if state.entries.len() == 1 {
            state.fallback = None;
        } else if state.fallback.as_ref() == Some(&key) {
            let next = (index + 1) % state.entries.len();
            let successor = state.entries.get_index(next).map(|(k, _)| k.clone());
            debug!(
                from = %key,
                to = ?successor.as_ref().map(DepotKey::as_str),
                "fallback logger reassigned"
            );
            state.fallback = successor;
        }

        state.entries.shift_remove_index(index);
        debug!(key = %key, "unregistered logger");
    }

    /// Make an already registered key the fallback. Returns `false` and
    /// changes nothing when `key` is unknown.
    pub fn set_fallback_key(&self, key: &str) -> bool {
        let mut state = self.write();
        let found = state
            .entries
            .get_key_value(normalize(key))
            .map(|(found, _)| found.clone());
        match found {
            Some(found) => {
                state.fallback = Some(found);
                true
            }
            None => false,
        }
    }

    pub fn fallback_key(&self) -> Result<String, DepotError> {
        self.read()
            .fallback
            .as_ref()
            .map(|key| key.as_str().to_string())
            .ok_or(DepotError::NoFallback)
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .entries
            .keys()
            .map(|key| key.as_str().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Logger for `key`: exact match, nearest registered ancestor, fallback,
    /// or a [`NullLogger`] as the last resort.
    pub fn get_logger(&self, key: &str) -> LoggerHandle {
        let key = DepotKey::new(key);
        let state = self.read();

        let found = state
            .find(&key)
            .or_else(|| state.fallback_entry())
            .map(|(_, logger)| logger.clone());
        found.unwrap_or_else(|| self.null.clone())
    }

    /// Key whose logger [`get_logger`](Self::get_logger) would return, or
    /// `None` when only the null logger is left.
    pub fn resolve_key(&self, key: &str) -> Option<String> {
        let key = DepotKey::new(key);
        let state = self.read();

        state
            .find(&key)
            .or_else(|| state.fallback_entry())
            .map(|(found, _)| found.as_str().to_string())
    }

    /// Drop every logger and the fallback
    pub fn clear(&self) {
        let mut state = self.write();
        state.entries.clear();
        state.fallback = None;
    }
}
