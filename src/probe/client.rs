use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Compute,
    Health,
}

impl RequestKind {
    /// Four compute requests, then one health check, per VU iteration cycle.
    pub fn for_iteration(iteration: u64) -> Self {
        if iteration % 5 == 4 {
            Self::Health
        } else {
            Self::Compute
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub kind: RequestKind,
    pub latency: Duration,
    pub ok: bool,
}

#[derive(Debug, Clone)]
pub struct ProbeClient {
    http: reqwest::Client,
    base_url: String,
    prime_n: u64,
}

impl ProbeClient {
    pub fn new(base_url: &str, prime_n: u64, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            prime_n,
        })
    }

    pub fn url_for(&self, kind: RequestKind) -> String {
        match kind {
            RequestKind::Compute => format!("{}/compute?n={}", self.base_url, self.prime_n),
            RequestKind::Health => format!("{}/health", self.base_url),
        }
    }

    /// Sends one request; transport errors count as failed samples.
    pub async fn execute(&self, kind: RequestKind) -> Sample {
        let start = Instant::now();
        let ok = match self.http.get(self.url_for(kind)).send().await {
            Ok(response) if response.status().is_success() => match response.json::<Value>().await {
                Ok(body) => Self::check_body(kind, &body),
                Err(e) => {
                    tracing::debug!("{:?} response was not JSON: {}", kind, e);
                    false
                }
            },
            Ok(response) => {
                tracing::debug!("{:?} returned {}", kind, response.status());
                false
            }
            Err(e) => {
                tracing::debug!("{:?} request failed: {}", kind, e);
                false
            }
        };

        Sample {
            kind,
            latency: start.elapsed(),
            ok,
        }
    }

    fn check_body(kind: RequestKind, body: &Value) -> bool {
        match kind {
            RequestKind::Compute => body.get("prime_count").is_some_and(Value::is_u64),
            RequestKind::Health => body.get("status").and_then(Value::as_str) == Some("ok"),
        }
    }
}
