//! Call counters per trunk group, mapped from the record schema.

use std::sync::Arc;

use sonus_client::records::{CallStatistics, CallStatisticsCollection};
use sonus_client::{Record, TopologyLeaf, paths};
use tracing::{debug, warn};

use super::ProbeContext;
use crate::binder::{LabelContext, bind};
use crate::error::Result;
use crate::fanout::fan_out;
use crate::walker::{FamilyMap, build_families};

const PREFIX: &str = "sonus_TG_calls";

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let families = Arc::new(build_families(
        &ctx.registry,
        PREFIX,
        CallStatistics::schema(),
    )?);
    let leaves = ctx.session.topology().leaves();

    let completed = fan_out(leaves, ctx.leaf_concurrency, |leaf| {
        let ctx = ctx.clone();
        let families = families.clone();
        async move { harvest(&ctx, &families, leaf).await }
    })
    .await?;

    debug!(zones = completed, "Collected call statistics");
    Ok(())
}

async fn harvest(ctx: &ProbeContext, families: &FamilyMap, leaf: TopologyLeaf) -> Result<()> {
    let stats: CallStatisticsCollection = ctx
        .session
        .fetch(
            paths::CALL_STATISTICS,
            &[leaf.address_context.as_str(), leaf.zone.as_str()],
        )
        .await?;

    let labels = LabelContext {
        system: ctx.system(),
        address_context: &leaf.address_context,
        zone: &leaf.zone,
    };
    for record in &stats.statistics {
        if let Err(e) = bind(record, PREFIX, families, &labels) {
            warn!(leaf = %leaf, trunk_group = %record.name, error = %e, "Skipping call statistics record");
        }
    }
    Ok(())
}
