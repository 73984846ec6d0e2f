//! DSP resource usage of the system.

use sonus_client::paths;
use sonus_client::records::DspUsageCollection;
use tracing::{debug, warn};

use super::ProbeContext;
use crate::error::Result;
use crate::mapping::MetricType;

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let registry = &ctx.registry;
    let used = registry.register(
        "sonus_dsp_resources_used",
        "Usage of DSP resources per slot",
        MetricType::Gauge,
        &["system", "slot"],
    )?;
    let total = registry.register(
        "sonus_dsp_resources_total",
        "Total compression resources",
        MetricType::Gauge,
        &["system"],
    )?;
    let compression = registry.register(
        "sonus_dsp_compression_utilization",
        "Compression resource utilization, in percent",
        MetricType::Gauge,
        &["system"],
    )?;
    let codec = registry.register(
        "sonus_dsp_codec_utilization",
        "Codec utilization, in percent",
        MetricType::Gauge,
        &["system", "codec"],
    )?;

    let status: DspUsageCollection = ctx.session.fetch(paths::DSP_USAGE, &[]).await?;
    let Some(usage) = status.usage else {
        warn!("Device returned no DSP usage");
        return Ok(());
    };

    let system = ctx.system();
    for (slot, value) in usage.slot_utilization() {
        used.set(&[system, slot], value)?;
    }
    total.set(&[system], usage.compression_total)?;
    compression.set(&[system], usage.compression_utilization)?;
    for (name, value) in usage.codec_utilization() {
        codec.set(&[system, name], value)?;
    }

    debug!("Collected DSP usage");
    Ok(())
}
