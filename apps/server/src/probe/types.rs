use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Site;

/// Terminal status of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// A response arrived with a status code below 400.
    Up,
    /// A response arrived with a status code of 400 or above.
    Down,
    /// No response within the configured bound.
    Timeout,
    /// The request never produced a response: DNS, connect, TLS or URL
    /// parse failure.
    Error,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Up => write!(f, "up"),
            ProbeStatus::Down => write!(f, "down"),
            ProbeStatus::Timeout => write!(f, "timeout"),
            ProbeStatus::Error => write!(f, "error"),
        }
    }
}

/// HTTP method used for a probe attempt. Checks start with HEAD and may
/// escalate to GET once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    #[default]
    Head,
    Get,
}

impl From<ProbeMethod> for reqwest::Method {
    fn from(method: ProbeMethod) -> Self {
        match method {
            ProbeMethod::Head => reqwest::Method::HEAD,
            ProbeMethod::Get => reqwest::Method::GET,
        }
    }
}

/// Outcome of one health check. Fresh on every probe, immutable once
/// produced, never stored by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Wall-clock time between issuing the terminal attempt and resolving
    /// its outcome, whichever way it resolved.
    pub response_time_millis: u64,
    pub checked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ProbeResult {
    fn resolve(
        status: ProbeStatus,
        status_code: Option<u16>,
        elapsed: Duration,
        error_detail: Option<String>,
    ) -> Self {
        Self {
            status,
            status_code,
            response_time_millis: elapsed.as_millis() as u64,
            checked_at: Utc::now(),
            error_detail,
        }
    }

    pub fn up(status_code: u16, elapsed: Duration) -> Self {
        Self::resolve(ProbeStatus::Up, Some(status_code), elapsed, None)
    }

    pub fn down(status_code: u16, elapsed: Duration) -> Self {
        Self::resolve(ProbeStatus::Down, Some(status_code), elapsed, None)
    }

    pub fn timeout(elapsed: Duration) -> Self {
        Self::resolve(ProbeStatus::Timeout, None, elapsed, None)
    }

    pub fn error(elapsed: Duration, detail: String) -> Self {
        Self::resolve(ProbeStatus::Error, None, elapsed, Some(detail))
    }
}

/// One site joined with its probe outcome for a check round. Exists only
/// as the fan-out's output element; the field sets are disjoint, so the
/// flattened wire form is a plain merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteCheckReport {
    #[serde(flatten)]
    pub site: Site,
    #[serde(flatten)]
    pub result: ProbeResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ProbeStatus::Up).unwrap(), "up");
        assert_eq!(serde_json::to_value(ProbeStatus::Timeout).unwrap(), "timeout");
        assert_eq!(ProbeStatus::Error.to_string(), "error");
    }

    #[test]
    fn result_wire_fields_are_camel_case_and_absent_when_unset() {
        let value =
            serde_json::to_value(ProbeResult::up(204, Duration::from_millis(12))).unwrap();

        assert_eq!(value["status"], "up");
        assert_eq!(value["statusCode"], 204);
        assert_eq!(value["responseTimeMillis"], 12);
        assert!(value.get("checkedAt").is_some());
        assert!(value.get("errorDetail").is_none());

        let value = serde_json::to_value(ProbeResult::timeout(Duration::from_secs(10))).unwrap();
        assert!(value.get("statusCode").is_none());
        assert!(value.get("errorDetail").is_none());

        let value =
            serde_json::to_value(ProbeResult::error(Duration::ZERO, "refused".into())).unwrap();
        assert_eq!(value["errorDetail"], "refused");
    }

    #[test]
    fn report_merges_site_and_result_fields() {
        let site = Site {
            id: Uuid::new_v4(),
            url: "http://example.com".into(),
            name: "Example".into(),
        };
        let report = SiteCheckReport {
            site: site.clone(),
            result: ProbeResult::down(503, Duration::from_millis(40)),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["id"], serde_json::to_value(site.id).unwrap());
        assert_eq!(value["name"], "Example");
        assert_eq!(value["status"], "down");
        assert_eq!(value["statusCode"], 503);
    }
}
