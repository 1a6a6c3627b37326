use std::error::Error as _;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::debug;
use url::Url;

use super::types::{ProbeMethod, ProbeResult, ProbeStatus};

/// Browser-like header pair; some origins reject headerless or obviously
/// bot-like clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Executes single health checks against HTTP(S) endpoints.
///
/// Stateless apart from its connection pool: probes share nothing, carry no
/// cache, and each call produces a fresh [`ProbeResult`].
pub struct ProbeExecutor {
    client: reqwest::Client,
}

impl ProbeExecutor {
    /// Build an executor with a fixed per-request timeout.
    ///
    /// `accept_invalid_certs` skips certificate validation for HTTPS
    /// targets so self-signed internal hosts can be watched. That weakens
    /// the guarantee for public targets; callers choose the posture.
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers
            .insert(reqwest::header::ACCEPT, reqwest::header::HeaderValue::from_static(ACCEPT));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    /// Check one URL. This never returns an error: malformed URLs,
    /// timeouts and transport failures all resolve to a [`ProbeResult`].
    ///
    /// A HEAD check that the origin rejects (403/405, or a failure before
    /// any response) is retried once as GET; many origins misconfigure
    /// HEAD handling and would otherwise report as down. The retried
    /// attempt is a full new attempt with its own elapsed-time clock, and
    /// its outcome is terminal.
    pub async fn probe(&self, url: &str, method: ProbeMethod) -> ProbeResult {
        let first = self.attempt(url, method).await;

        if method == ProbeMethod::Head && should_escalate(&first) {
            debug!(url, status = %first.status, "HEAD rejected, retrying as GET");
            return self.attempt(url, ProbeMethod::Get).await;
        }

        first
    }

    /// One request/response cycle, classified. Elapsed time covers the
    /// whole attempt on every path, not just the successful one.
    async fn attempt(&self, url: &str, method: ProbeMethod) -> ProbeResult {
        let start = Instant::now();

        let target = match Url::parse(url) {
            Ok(target) => target,
            Err(err) => {
                return ProbeResult::error(start.elapsed(), format!("invalid url: {err}"));
            }
        };

        match self.client.request(method.into(), target).send().await {
            Ok(response) => {
                // Only the status line matters; dropping the response
                // releases the connection without buffering the body.
                let code = response.status().as_u16();
                let elapsed = start.elapsed();
                if code < 400 {
                    ProbeResult::up(code, elapsed)
                } else {
                    ProbeResult::down(code, elapsed)
                }
            }
            // The client tears down the in-flight request once the
            // deadline passes; no socket is left dangling.
            Err(err) if err.is_timeout() => ProbeResult::timeout(start.elapsed()),
            Err(err) => ProbeResult::error(start.elapsed(), error_detail(&err)),
        }
    }
}

/// A HEAD attempt escalates when the origin refused the method outright or
/// the attempt failed before producing a response. GET results never
/// escalate.
fn should_escalate(result: &ProbeResult) -> bool {
    match result.status {
        ProbeStatus::Up => false,
        ProbeStatus::Down => matches!(result.status_code, Some(403 | 405)),
        ProbeStatus::Timeout | ProbeStatus::Error => true,
    }
}

/// Flatten a transport error and its causes into one readable line; the
/// top-level reqwest message alone tends to hide the interesting part.
fn error_detail(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
