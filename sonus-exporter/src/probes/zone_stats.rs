//! Full per-zone statistics tree, mapped from the record schema.

use std::sync::Arc;

use sonus_client::records::{ZoneStatistics, ZoneStatisticsCollection};
use sonus_client::{Record, paths};
use tracing::{debug, warn};

use super::ProbeContext;
use crate::binder::{LabelContext, bind};
use crate::error::Result;
use crate::fanout::fan_out;
use crate::walker::{FamilyMap, build_families};

const PREFIX: &str = "sonus_Zone";

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let families = Arc::new(build_families(
        &ctx.registry,
        PREFIX,
        ZoneStatistics::schema(),
    )?);
    let contexts: Vec<String> = ctx
        .session
        .topology()
        .contexts()
        .iter()
        .map(|c| c.name.clone())
        .collect();

    let completed = fan_out(contexts, ctx.leaf_concurrency, |context| {
        let ctx = ctx.clone();
        let families = families.clone();
        async move { harvest(&ctx, &families, context).await }
    })
    .await?;

    debug!(contexts = completed, "Collected zone statistics");
    Ok(())
}

async fn harvest(ctx: &ProbeContext, families: &FamilyMap, context: String) -> Result<()> {
    let stats: ZoneStatisticsCollection = ctx
        .session
        .fetch(paths::ZONES, &[context.as_str()])
        .await?;

    let mut bound = 0;
    for zone in &stats.zones {
        let labels = LabelContext {
            system: ctx.system(),
            address_context: &context,
            zone: &zone.name,
        };
        match bind(zone, PREFIX, families, &labels) {
            Ok(summary) => bound += summary.bound,
            Err(e) => {
                warn!(context = %context, zone = %zone.name, error = %e, "Skipping zone record");
            }
        }
    }
    debug!(context = %context, zones = stats.zones.len(), observations = bound, "Bound zone records");
    Ok(())
}
