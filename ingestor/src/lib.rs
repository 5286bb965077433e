//! MQTT ingestion of soil moisture readings.
//!
//! The [`Ingestor`] keeps one subscription open on the configured topic and
//! turns every valid payload into a row in the [`db::ReadingStore`]. Bad
//! payloads are logged, counted in [`IngestorStatus`], and dropped.

pub mod ingestor;
pub mod payload;
pub mod session;
pub mod status;

pub use ingestor::{Ingestor, MessageOutcome};
pub use payload::{PayloadError, decode_humidity};
pub use status::{ConnectionState, IngestorStatus, StatusSnapshot};
