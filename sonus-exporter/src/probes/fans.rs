//! Fan tray speeds.

use sonus_client::paths;
use sonus_client::records::FanCollection;
use tracing::{debug, warn};

use super::ProbeContext;
use crate::error::Result;
use crate::mapping::MetricType;

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let speed = ctx.registry.register(
        "sonus_fan_speed",
        "Current speed of fans, in RPM",
        MetricType::Gauge,
        &["system", "server", "fanID"],
    )?;

    let status: FanCollection = ctx.session.fetch(paths::FAN_STATUS, &[]).await?;
    let mut recorded = 0;
    for fan in &status.fans {
        match fan.rpm() {
            Ok(rpm) => {
                speed.set(&[ctx.system(), fan.server_name.as_str(), fan.fan_id.as_str()], rpm)?;
                recorded += 1;
            }
            Err(e) => {
                warn!(fan = %fan.fan_id, speed = %fan.speed, error = %e, "Failed to convert fan speed to rpm");
            }
        }
    }

    debug!(fans = recorded, "Collected fan speeds");
    Ok(())
}
