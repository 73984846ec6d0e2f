//! Call capacity per zone.

use std::sync::Arc;

use sonus_client::paths;
use sonus_client::records::ZoneStatusCollection;
use tracing::debug;

use super::ProbeContext;
use crate::error::Result;
use crate::fanout::fan_out;
use crate::mapping::MetricType;
use crate::registry::MetricFamily;

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let configured = ctx.registry.register(
        "sonus_zone_total_calls_configured",
        "Total call limit per zone",
        MetricType::Gauge,
        &["system", "addresscontext", "zone"],
    )?;
    let usage = ctx.registry.register(
        "sonus_zone_usage_total",
        "Total call limit per zone",
        MetricType::Gauge,
        &["system", "direction", "addresscontext", "zone"],
    )?;

    let contexts: Vec<String> = ctx
        .session
        .topology()
        .contexts()
        .iter()
        .map(|c| c.name.clone())
        .collect();

    let completed = fan_out(contexts, ctx.leaf_concurrency, |context| {
        let ctx = ctx.clone();
        let configured = configured.clone();
        let usage = usage.clone();
        async move { harvest(&ctx, &configured, &usage, context).await }
    })
    .await?;

    debug!(contexts = completed, "Collected zone status");
    Ok(())
}

async fn harvest(
    ctx: &ProbeContext,
    configured: &Arc<MetricFamily>,
    usage: &Arc<MetricFamily>,
    context: String,
) -> Result<()> {
    let status: ZoneStatusCollection = ctx
        .session
        .fetch(paths::ZONE_STATUS, &[context.as_str()])
        .await?;

    let system = ctx.system();
    let context = context.as_str();
    for zone in &status.zones {
        let name = zone.name.as_str();
        configured.set(&[system, context, name], zone.total_calls_configured)?;
        usage.set(&[system, "inbound", context, name], zone.inbound_calls_usage)?;
        usage.set(&[system, "outbound", context, name], zone.outbound_calls_usage)?;
    }
    Ok(())
}
