use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

use crate::config::{SourceConfig, SourceKind};
use crate::monitor::state::AlarmStatus;

use super::ProbeError;

/// How a given upstream encodes the status of the monitored area.
#[derive(Debug, Clone)]
pub enum ResponseSchema {
    /// `[{"regionId": "11", "activeAlerts": [...]}, ...]`
    RegionList { region_id: String },
    /// `{"states": {"<region>": {"enabled": true}}}`
    States { region_name: String },
    /// Free-form page matched against two patterns.
    HtmlPage { active: Regex, inactive: Regex },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegionId {
    Text(String),
    Number(u64),
}

impl RegionId {
    fn matches(&self, expected: &str) -> bool {
        match self {
            RegionId::Text(value) => value.trim() == expected,
            RegionId::Number(value) => value.to_string() == expected,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionAlertStatus {
    region_id: RegionId,
    #[serde(default)]
    active_alerts: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct StatesResponse {
    states: HashMap<String, RegionState>,
}

#[derive(Debug, Deserialize)]
struct RegionState {
    #[serde(default)]
    enabled: Option<bool>,
}

impl ResponseSchema {
    pub fn from_config(config: &SourceConfig) -> Result<Self, ProbeError> {
        match config.kind {
            SourceKind::UkraineAlarm => Ok(Self::RegionList {
                region_id: config.region_id.trim().to_string(),
            }),
            SourceKind::AlertsStates => Ok(Self::States {
                region_name: config.region_name.trim().to_string(),
            }),
            SourceKind::HtmlPage => Ok(Self::HtmlPage {
                active: Regex::new(config.active_pattern.as_deref().unwrap_or_default())?,
                inactive: Regex::new(config.inactive_pattern.as_deref().unwrap_or_default())?,
            }),
            SourceKind::Simulated => Err(ProbeError::NoSchema(config.kind.as_str())),
        }
    }

    /// Returns `Active` or `Inactive`; anything indeterminate is an error.
    pub fn interpret(&self, body: &str) -> Result<AlarmStatus, ProbeError> {
        match self {
            ResponseSchema::RegionList { region_id } => {
                let regions: Vec<RegionAlertStatus> = serde_json::from_str(body)
                    .map_err(|error| ProbeError::Decode(error.to_string()))?;
                let region = regions
                    .iter()
                    .find(|region| region.region_id.matches(region_id))
                    .ok_or_else(|| ProbeError::AreaMissing(region_id.clone()))?;
                let alarmed = region
                    .active_alerts
                    .as_ref()
                    .is_some_and(|alerts| !alerts.is_empty());
                Ok(status_from(alarmed))
            }
            ResponseSchema::States { region_name } => {
                let response: StatesResponse = serde_json::from_str(body)
                    .map_err(|error| ProbeError::Decode(error.to_string()))?;
                let enabled = response
                    .states
                    .get(region_name)
                    .and_then(|state| state.enabled)
                    .ok_or_else(|| ProbeError::AreaMissing(region_name.clone()))?;
                Ok(status_from(enabled))
            }
            ResponseSchema::HtmlPage { active, inactive } => {
                if active.is_match(body) {
                    Ok(AlarmStatus::Active)
                } else if inactive.is_match(body) {
                    Ok(AlarmStatus::Inactive)
                } else {
                    Err(ProbeError::Decode(
                        "page matched neither status pattern".to_string(),
                    ))
                }
            }
        }
    }
}

fn status_from(alarmed: bool) -> AlarmStatus {
    if alarmed {
        AlarmStatus::Active
    } else {
        AlarmStatus::Inactive
    }
}
