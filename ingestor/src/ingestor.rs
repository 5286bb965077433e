use crate::payload::{PayloadError, decode_humidity};
use crate::session::{Backoff, Session, Step};
use crate::status::{ConnectionState, IngestorStatus};
use db::ReadingStore;
use db::models::reading::Model as Reading;
use rumqttc::{AsyncClient, Event, MqttOptions, Outgoing, QoS};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use util::config::MqttConfig;

// rumqttc rejects keep-alive intervals below this.
const MIN_KEEP_ALIVE: Duration = Duration::from_secs(5);
const REQUEST_CHANNEL_CAPACITY: usize = 10;

/// Result of handling a single broker message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    Stored(Reading),
    DecodeError,
    MissingField,
    InvalidValue,
    StorageError,
}

/// Long-lived worker bridging one MQTT topic into the reading store.
pub struct Ingestor {
    store: ReadingStore,
    config: MqttConfig,
    status: Arc<IngestorStatus>,
}

impl Ingestor {
    pub fn new(store: ReadingStore, config: MqttConfig) -> Self {
        Self {
            store,
            config,
            status: Arc::new(IngestorStatus::new()),
        }
    }

    /// Shared handle on the connection state and counters.
    pub fn status(&self) -> Arc<IngestorStatus> {
        Arc::clone(&self.status)
    }

    /// Decodes one payload and stores its reading.
    ///
    /// Never fails: every rejection is logged, counted, and reported through
    /// the returned outcome so the subscription keeps running.
    pub async fn handle_message(&self, topic: &str, payload: &[u8]) -> MessageOutcome {
        self.status.record_received();
        debug!(topic, payload = %String::from_utf8_lossy(payload), "message received");

        let value = match decode_humidity(payload) {
            Ok(value) => value,
            Err(err) => return self.reject(topic, err),
        };

        match self.store.insert(value, None).await {
            Ok(reading) => {
                self.status.record_stored();
                info!(topic, id = reading.id, value = reading.value, "reading saved");
                MessageOutcome::Stored(reading)
            }
            Err(err) => {
                self.status.record_storage_error();
                error!(topic, value, error = %err, "failed to persist reading");
                MessageOutcome::StorageError
            }
        }
    }

    fn reject(&self, topic: &str, err: PayloadError) -> MessageOutcome {
        warn!(topic, error = %err, "discarding message");
        match err {
            err if err.is_decode() => {
                self.status.record_decode_error();
                MessageOutcome::DecodeError
            }
            PayloadError::MissingField => {
                self.status.record_missing_field();
                MessageOutcome::MissingField
            }
            _ => {
                self.status.record_invalid_value();
                MessageOutcome::InvalidValue
            }
        }
    }

    /// Runs the worker on its own task until `shutdown` is cancelled.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Connects, subscribes and processes messages until `shutdown` fires.
    ///
    /// Connection failures put the session back to `Disconnected`; the next
    /// poll reconnects after an exponential backoff delay. The subscription is
    /// re-issued on every accepted connection.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut options = MqttOptions::new(
            self.config.client_id.clone(),
            self.config.host.clone(),
            self.config.port,
        );
        options.set_keep_alive(self.config.keep_alive.max(MIN_KEEP_ALIVE));
        options.set_clean_session(true);

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);
        let mut session = Session::new();
        let mut backoff = Backoff::default();

        info!(
            host = %self.config.host,
            port = self.config.port,
            topic = %self.config.topic,
            "starting MQTT ingestor"
        );

        loop {
            let polled = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                polled = eventloop.poll() => polled,
            };

            match polled {
                Ok(event) => match session.on_event(event) {
                    Step::Subscribe => {
                        backoff.reset();
                        info!(host = %self.config.host, "connected to broker");
                        if let Err(err) = client.try_subscribe(&self.config.topic, QoS::AtMostOnce)
                        {
                            error!(topic = %self.config.topic, error = %err, "failed to subscribe");
                        }
                    }
                    Step::Message(publish) => {
                        self.handle_message(&publish.topic, &publish.payload[..]).await;
                    }
                    Step::Idle => {}
                },
                Err(err) => {
                    session.on_connection_error();
                    self.status.set_state(session.state());
                    self.status.record_connection_error();

                    let delay = backoff.next_delay();
                    error!(error = %err, retry_in = ?delay, "MQTT connection lost");

                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }

            let previous = self.status.state();
            if previous != session.state() {
                self.status.set_state(session.state());
                if session.state() == ConnectionState::Subscribed {
                    info!(topic = %self.config.topic, "subscribed");
                }
            }
        }

        if session.state() != ConnectionState::Disconnected {
            self.disconnect(client, &mut eventloop).await;
        }
        self.status.set_state(ConnectionState::Disconnected);
        info!("MQTT ingestor stopped");
    }

    async fn disconnect(&self, client: AsyncClient, eventloop: &mut rumqttc::EventLoop) {
        if client.try_disconnect().is_err() {
            return;
        }

        // Drive the loop just long enough to flush the DISCONNECT packet.
        let flush = async {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Outgoing(Outgoing::Disconnect)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        };
        let _ = tokio::time::timeout(Duration::from_secs(1), flush).await;
    }
}
