//! Broker session bookkeeping, kept free of I/O so it can be driven by hand.

use crate::status::ConnectionState;
use rumqttc::{ConnectReturnCode, Event, Packet, Publish, SubscribeReasonCode};
use std::time::Duration;

/// What the event loop should do after an event has been applied.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// The broker accepted the connection; issue the subscription.
    Subscribe,
    /// A message arrived.
    Message(Publish),
    Idle,
}

/// Tracks `Disconnected -> Connected -> Subscribed` from the packets seen on
/// the wire.
#[derive(Debug)]
pub struct Session {
    state: ConnectionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn on_event(&mut self, event: Event) -> Step {
        let packet = match event {
            Event::Incoming(packet) => packet,
            Event::Outgoing(_) => return Step::Idle,
        };

        match packet {
            Packet::ConnAck(ack) if ack.code == ConnectReturnCode::Success => {
                self.state = ConnectionState::Connected;
                Step::Subscribe
            }
            Packet::ConnAck(ack) => {
                tracing::warn!(code = ?ack.code, "broker refused connection");
                self.state = ConnectionState::Disconnected;
                Step::Idle
            }
            Packet::SubAck(ack) => {
                let granted = !ack.return_codes.is_empty()
                    && ack
                        .return_codes
                        .iter()
                        .all(|code| matches!(code, SubscribeReasonCode::Success(_)));
                if granted {
                    self.state = ConnectionState::Subscribed;
                } else {
                    tracing::warn!(codes = ?ack.return_codes, "subscription rejected by broker");
                }
                Step::Idle
            }
            Packet::Publish(publish) => Step::Message(publish),
            Packet::Disconnect => {
                self.state = ConnectionState::Disconnected;
                Step::Idle
            }
            _ => Step::Idle,
        }
    }

    /// The network session ended (I/O error, keep-alive timeout, refused connect).
    pub fn on_connection_error(&mut self) {
        self.state = ConnectionState::Disconnected;
    }
}

/// Exponential reconnect delay: 1s, 2s, 4s, ... capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(60))
    }
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to wait before the next attempt; doubles the one after it.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
