//! Global trunk group capacity and state.

use sonus_client::paths;
use sonus_client::records::TrunkGroupStatusCollection;
use tracing::debug;

use super::{ProbeContext, flag};
use crate::error::Result;
use crate::mapping::MetricType;

const GROUP_LABELS: [&str; 3] = ["system", "zone", "name"];
const DIRECTED_LABELS: [&str; 4] = ["system", "zone", "name", "direction"];

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let registry = &ctx.registry;
    let bytes = registry.register(
        "sonus_TG_bytes",
        "Bandwidth in use by current calls",
        MetricType::Gauge,
        &DIRECTED_LABELS,
    )?;
    let outbound_state = registry.register(
        "sonus_TG_outbound_state",
        "State of outbound calls on the trunkgroup",
        MetricType::Gauge,
        &GROUP_LABELS,
    )?;
    let state = registry.register(
        "sonus_TG_state",
        "State of the trunkgroup",
        MetricType::Gauge,
        &GROUP_LABELS,
    )?;
    let total_channels = registry.register(
        "sonus_TG_total_channels",
        "Number of configured channels",
        MetricType::Gauge,
        &GROUP_LABELS,
    )?;
    let usage = registry.register(
        "sonus_TG_usage_total",
        "Number of active calls",
        MetricType::Gauge,
        &DIRECTED_LABELS,
    )?;

    let status: TrunkGroupStatusCollection =
        ctx.session.fetch(paths::TRUNK_GROUP_STATUS, &[]).await?;
    let system = ctx.system();
    for group in &status.trunk_groups {
        let labels = [system, group.zone.as_str(), group.name.as_str()];
        let inbound = [system, group.zone.as_str(), group.name.as_str(), "inbound"];
        let outbound = [system, group.zone.as_str(), group.name.as_str(), "outbound"];

        bytes.set(&inbound, group.bw_inbound_usage)?;
        bytes.set(&outbound, group.bw_outbound_usage)?;
        usage.set(&inbound, group.inbound_calls_usage)?;
        usage.set(&outbound, group.outbound_calls_usage)?;
        state.set(&labels, flag(group.in_service()))?;
        outbound_state.set(&labels, flag(group.outbound_normal()))?;
        total_channels.set(&labels, group.total_calls_configured)?;
    }

    debug!(trunk_groups = status.trunk_groups.len(), "Collected trunk group status");
    Ok(())
}
