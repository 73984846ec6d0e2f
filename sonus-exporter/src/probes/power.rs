//! Power supply fault flags.

use sonus_client::paths;
use sonus_client::records::PowerSupplyCollection;
use tracing::debug;

use super::{ProbeContext, flag};
use crate::error::Result;
use crate::mapping::MetricType;

const LABELS: [&str; 3] = ["system", "server", "powerSupplyID"];

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let registry = &ctx.registry;
    let power_fault = registry.register(
        "sonus_powersupply_powerfault",
        "Is there a power fault, per supply",
        MetricType::Gauge,
        &LABELS,
    )?;
    let voltage_fault = registry.register(
        "sonus_powersupply_voltagefault",
        "Is there a voltage fault, per supply",
        MetricType::Gauge,
        &LABELS,
    )?;
    let present = registry.register(
        "sonus_powersupply_present",
        "Indicates if the powersupply is installed",
        MetricType::Gauge,
        &LABELS,
    )?;

    let status: PowerSupplyCollection = ctx.session.fetch(paths::POWER_SUPPLY_STATUS, &[]).await?;
    for supply in &status.supplies {
        let labels = [ctx.system(), supply.server_name.as_str(), supply.power_supply_id.as_str()];
        power_fault.set(&labels, flag(supply.power_fault))?;
        voltage_fault.set(&labels, flag(supply.voltage_fault))?;
        present.set(&labels, flag(supply.present))?;
    }

    debug!(supplies = status.supplies.len(), "Collected power supply status");
    Ok(())
}
