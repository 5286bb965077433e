use serde::Serialize;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

/// Lifecycle of the broker connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Subscribed,
}

impl ConnectionState {
    fn to_u8(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connected => 1,
            ConnectionState::Subscribed => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ConnectionState::Connected,
            2 => ConnectionState::Subscribed,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Live connection state and message counters, shared between the ingestor
/// task and whoever reports on it (the health endpoint).
#[derive(Debug, Default)]
pub struct IngestorStatus {
    state: AtomicU8,
    received: AtomicU64,
    stored: AtomicU64,
    decode_errors: AtomicU64,
    missing_field: AtomicU64,
    invalid_value: AtomicU64,
    storage_errors: AtomicU64,
    connection_errors: AtomicU64,
}

/// Point-in-time copy of [`IngestorStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub state: ConnectionState,
    pub received: u64,
    pub stored: u64,
    pub decode_errors: u64,
    pub missing_field: u64,
    pub invalid_value: u64,
    pub storage_errors: u64,
    pub connection_errors: u64,
}

impl IngestorStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Relaxed))
    }

    pub fn set_state(&self, state: ConnectionState) {
        self.state.store(state.to_u8(), Ordering::Relaxed);
    }

    pub(crate) fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stored(&self) {
        self.stored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_missing_field(&self) {
        self.missing_field.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalid_value(&self) {
        self.invalid_value.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_storage_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_connection_error(&self) {
        self.connection_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state(),
            received: self.received.load(Ordering::Relaxed),
            stored: self.stored.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            missing_field: self.missing_field.load(Ordering::Relaxed),
            invalid_value: self.invalid_value.load(Ordering::Relaxed),
            storage_errors: self.storage_errors.load(Ordering::Relaxed),
            connection_errors: self.connection_errors.load(Ordering::Relaxed),
        }
    }
}
