use std::time::{Duration, Instant};

use crate::config::SourceConfig;
use crate::monitor::state::AlarmStatus;

use super::{BackoffPolicy, ProbeBackoff, ProbeError, ResponseSchema, StatusSource};

/// Polls an HTTP(S) endpoint and normalizes its payload through a [`ResponseSchema`].
pub struct HttpStatusSource {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    schema: ResponseSchema,
    backoff: ProbeBackoff,
}

impl HttpStatusSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self::new(
            client,
            config.url.clone(),
            Some(config.api_key.trim().to_string()).filter(|key| !key.is_empty()),
            ResponseSchema::from_config(config)?,
            BackoffPolicy::from_config(&config.backoff),
        ))
    }

    pub fn new(
        client: reqwest::Client,
        url: String,
        api_key: Option<String>,
        schema: ResponseSchema,
        policy: BackoffPolicy,
    ) -> Self {
        Self {
            client,
            url,
            api_key,
            schema,
            backoff: ProbeBackoff::new(policy),
        }
    }

    async fn fetch(&self) -> Result<AlarmStatus, ProbeError> {
        let mut request = self.client.get(&self.url);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        self.schema.interpret(&body)
    }
}

impl StatusSource for HttpStatusSource {
    async fn probe(&mut self) -> AlarmStatus {
        let now = Instant::now();
        if !self.backoff.is_ready(now) {
            log::debug!(
                "status_probe_skipped reason=backoff retry_in_secs={} consecutive_failures={}",
                self.backoff.retry_in(now).as_secs(),
                self.backoff.consecutive_failures()
            );
            return AlarmStatus::Unknown;
        }

        match self.fetch().await {
            Ok(status) => {
                let streak = self.backoff.record_success();
                if streak > 0 {
                    log::info!("status_probe_recovered after_failures={}", streak);
                }
                status
            }
            Err(error) if error.is_outage() => {
                let delay = self.backoff.record_failure(now);
                log::warn!(
                    "status_probe_failed url={} error={} consecutive_failures={} backoff_secs={}",
                    self.url,
                    error,
                    self.backoff.consecutive_failures(),
                    delay.as_secs()
                );
                AlarmStatus::Unknown
            }
            Err(error) => {
                self.backoff.record_success();
                log::warn!(
                    "status_payload_rejected url={} error={}",
                    self.url,
                    error
                );
                AlarmStatus::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::Matcher;

    use super::HttpStatusSource;
    use crate::monitor::provider::{BackoffPolicy, ProbeError, ResponseSchema, StatusSource};
    use crate::monitor::state::AlarmStatus;

    fn source(url: String, grace_failures: u32) -> HttpStatusSource {
        HttpStatusSource::new(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .expect("client should build"),
            url,
            Some("test-key".to_string()),
            ResponseSchema::RegionList {
                region_id: "11".to_string(),
            },
            BackoffPolicy::new(
                grace_failures,
                Duration::from_secs(600),
                Duration::from_secs(600),
                2,
            ),
        )
    }

    #[tokio::test]
    async fn probe_sends_credentials_and_decodes_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/alerts/status")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"regionId": "11", "activeAlerts": [{"type": "AIR"}]}]"#)
            .create_async()
            .await;

        let mut source = source(format!("{}/api/v3/alerts/status", server.url()), 3);
        assert_eq!(source.probe().await, AlarmStatus::Active);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_collapses_to_unknown() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let mut source = source(server.url(), 3);
        assert_eq!(source.probe().await, AlarmStatus::Unknown);
    }

    #[tokio::test]
    async fn unreachable_host_collapses_to_unknown() {
        let mut source = source("http://127.0.0.1:9/status".to_string(), 3);
        assert_eq!(source.probe().await, AlarmStatus::Unknown);
    }

    #[tokio::test]
    async fn backoff_suppresses_requests_after_grace_failures() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let mut source = source(server.url(), 1);
        for _ in 0..5 {
            assert_eq!(source.probe().await, AlarmStatus::Unknown);
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_region_does_not_trigger_backoff() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"regionId": "99", "activeAlerts": []}]"#)
            .expect(4)
            .create_async()
            .await;

        let mut source = source(server.url(), 1);
        for _ in 0..4 {
            assert_eq!(source.probe().await, AlarmStatus::Unknown);
        }
        mock.assert_async().await;
    }

    #[test]
    fn only_transport_and_status_errors_count_as_outages() {
        assert!(ProbeError::Status(502).is_outage());
        assert!(!ProbeError::AreaMissing("11".to_string()).is_outage());
        assert!(!ProbeError::Decode("eof".to_string()).is_outage());
    }
}
