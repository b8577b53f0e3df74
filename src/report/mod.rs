// HTTP push reporting for speedometer snapshots
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use crate::speedo::{Mode, SpeedStat};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Which push protocol variant to speak.
///
/// The older servers expect the instrument id in the URL path; the newer
/// ones expect a flat `/stat` and `/info` with the id in the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireFormat {
    #[default]
    PathId,
    BodyId,
}

/// Best-effort JSON pusher for one instrument.
///
/// Every push is fire-and-forget: failures are logged and swallowed, and
/// the next scheduled tick retries naturally. The response body and status
/// are ignored.
pub struct Reporter {
    client: Client,
    server: String,
    id: String,
    name: String,
    mode: Mode,
    wire: WireFormat,
    post_interval: Duration,
}

impl Reporter {
    pub fn new(
        server: &str,
        id: &str,
        name: &str,
        mode: Mode,
        wire: WireFormat,
        post_interval: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            server: server.trim_end_matches('/').to_string(),
            id: id.to_string(),
            name: name.to_string(),
            mode,
            wire,
            post_interval,
        })
    }

    pub fn post_interval(&self) -> Duration {
        self.post_interval
    }

    /// Identity info changes rarely, so it is pushed at a tenth of the
    /// stat cadence (plus once immediately at startup).
    pub fn info_interval(&self) -> Duration {
        self.post_interval * 10
    }

    pub fn stat_url(&self) -> String {
        match self.wire {
            WireFormat::PathId => format!("{}/stat/{}", self.server, self.id),
            WireFormat::BodyId => format!("{}/stat", self.server),
        }
    }

    pub fn info_url(&self) -> String {
        match self.wire {
            WireFormat::PathId => format!("{}/info/{}", self.server, self.id),
            WireFormat::BodyId => format!("{}/info", self.server),
        }
    }

    /// Build the stat payload for the configured wire variant.
    ///
    /// The path-id servers name the field after the mode: `count` for an
    /// accumulating total, `value` for everything else.
    pub fn stat_payload(&self, stat: &SpeedStat) -> Value {
        match self.wire {
            WireFormat::PathId => match self.mode {
                Mode::Accumulation => json!({
                    "count": stat.value,
                    "speed": stat.speed,
                }),
                Mode::Variation | Mode::Progress => json!({
                    "value": stat.value,
                    "speed": stat.speed,
                }),
            },
            WireFormat::BodyId => json!({
                "sid": self.id,
                "name": self.name,
                "Value": stat.value,
                "created_at": Utc::now().timestamp(),
            }),
        }
    }

    /// Build the static identity payload for the configured wire variant.
    pub fn info_payload(&self, total: u64) -> Value {
        match self.wire {
            WireFormat::PathId => json!({
                "name": self.name,
                "type": self.mode.wire_code(),
            }),
            WireFormat::BodyId => json!({
                "sid": self.id,
                "name": self.name,
                "type": self.mode.wire_code(),
                "post_interval_sec": self.post_interval.as_secs(),
                "total": total,
            }),
        }
    }

    pub async fn push_stat(&self, stat: &SpeedStat) {
        self.post(&self.stat_url(), &self.stat_payload(stat)).await;
    }

    pub async fn push_info(&self, total: u64) {
        self.post(&self.info_url(), &self.info_payload(total)).await;
    }

    async fn post(&self, url: &str, payload: &Value) {
        debug!("POST {}", url);
        if let Err(e) = self.client.post(url).json(payload).send().await {
            warn!("Failed to push to {}: {}", url, e);
        }
    }
}
