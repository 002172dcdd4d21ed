mod backoff;
mod http;
mod schema;
mod simulated;

use thiserror::Error;

use crate::config::{SourceConfig, SourceKind};

use super::state::AlarmStatus;

pub use backoff::{BackoffPolicy, ProbeBackoff};
pub use http::HttpStatusSource;
pub use schema::ResponseSchema;
pub use simulated::SimulatedStatusSource;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("http client build failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("payload decode failed: {0}")]
    Decode(String),
    #[error("monitored area {0} missing from payload")]
    AreaMissing(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("source kind {0} has no upstream schema")]
    NoSchema(&'static str),
}

impl ProbeError {
    /// Transport and HTTP status failures. Payload errors mean the upstream answered.
    pub fn is_outage(&self) -> bool {
        matches!(self, ProbeError::Request(_) | ProbeError::Status(_))
    }
}

/// Tri-state view of the upstream alert feed. Implementations never fail:
/// every problem collapses to [`AlarmStatus::Unknown`].
pub trait StatusSource {
    async fn probe(&mut self) -> AlarmStatus;
}

pub enum ActiveStatusSource {
    Http(Box<HttpStatusSource>),
    Simulated(SimulatedStatusSource),
}

impl ActiveStatusSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, ProbeError> {
        match config.kind {
            SourceKind::Simulated => Ok(Self::Simulated(SimulatedStatusSource::new())),
            _ => Ok(Self::Http(Box::new(HttpStatusSource::from_config(config)?))),
        }
    }
}

impl StatusSource for ActiveStatusSource {
    async fn probe(&mut self) -> AlarmStatus {
        match self {
            ActiveStatusSource::Http(source) => source.probe().await,
            ActiveStatusSource::Simulated(source) => source.probe().await,
        }
    }
}

#[cfg(test)]
pub(crate) struct MockStatusSource {
    sequence: Vec<AlarmStatus>,
}

#[cfg(test)]
impl MockStatusSource {
    pub(crate) fn new(sequence: Vec<AlarmStatus>) -> Self {
        Self { sequence }
    }
}

#[cfg(test)]
impl StatusSource for MockStatusSource {
    async fn probe(&mut self) -> AlarmStatus {
        if self.sequence.is_empty() {
            return AlarmStatus::Unknown;
        }

        self.sequence.remove(0)
    }
}
