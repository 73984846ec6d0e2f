//! Probe kinds: one per device endpoint family.
//!
//! Every kind registers its families into the probe's registry, fetches
//! through the shared [`DeviceSession`] and records observations. Per-zone
//! and per-context kinds go through [`fan_out`](crate::fanout::fan_out).

mod calls;
mod dsp;
mod fans;
mod power;
mod server_info;
mod sip;
mod trunk_groups;
mod zone_stats;
mod zones;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sonus_client::DeviceSession;

use crate::error::Result;
use crate::registry::SharedRegistry;

/// Everything a probe kind needs for one run.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub session: Arc<DeviceSession>,
    pub registry: SharedRegistry,
    /// Harvests in flight per fanned-out kind.
    pub leaf_concurrency: usize,
}

impl ProbeContext {
    pub fn new(session: DeviceSession, registry: SharedRegistry, leaf_concurrency: usize) -> Self {
        Self {
            session: Arc::new(session),
            registry,
            leaf_concurrency,
        }
    }

    /// Value of the `system` label.
    pub fn system(&self) -> &str {
        self.session.system()
    }
}

/// A family of metrics read from one device endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    ServerInfo,
    Sip,
    Calls,
    Fans,
    Power,
    Dsp,
    TrunkGroups,
    Zones,
    ZoneStats,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 9] = [
        ProbeKind::ServerInfo,
        ProbeKind::Sip,
        ProbeKind::Calls,
        ProbeKind::Fans,
        ProbeKind::Power,
        ProbeKind::Dsp,
        ProbeKind::TrunkGroups,
        ProbeKind::Zones,
        ProbeKind::ZoneStats,
    ];

    /// Kinds enabled when the configuration names none.
    ///
    /// The full zone record is large, so it is opt-in.
    pub fn defaults() -> Vec<ProbeKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| *kind != ProbeKind::ZoneStats)
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::ServerInfo => "server_info",
            ProbeKind::Sip => "sip",
            ProbeKind::Calls => "calls",
            ProbeKind::Fans => "fans",
            ProbeKind::Power => "power",
            ProbeKind::Dsp => "dsp",
            ProbeKind::TrunkGroups => "trunk_groups",
            ProbeKind::Zones => "zones",
            ProbeKind::ZoneStats => "zone_stats",
        }
    }

    /// Run this kind against the context's device.
    pub async fn run(self, ctx: ProbeContext) -> Result<()> {
        match self {
            ProbeKind::ServerInfo => server_info::collect(&ctx).await,
            ProbeKind::Sip => sip::collect(&ctx).await,
            ProbeKind::Calls => calls::collect(&ctx).await,
            ProbeKind::Fans => fans::collect(&ctx).await,
            ProbeKind::Power => power::collect(&ctx).await,
            ProbeKind::Dsp => dsp::collect(&ctx).await,
            ProbeKind::TrunkGroups => trunk_groups::collect(&ctx).await,
            ProbeKind::Zones => zones::collect(&ctx).await,
            ProbeKind::ZoneStats => zone_stats::collect(&ctx).await,
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gauge value of a boolean.
fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
