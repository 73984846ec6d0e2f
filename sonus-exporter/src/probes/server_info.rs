//! System identity per server blade.

use sonus_client::paths;
use sonus_client::records::ServerStatusCollection;
use tracing::debug;

use super::ProbeContext;
use crate::error::Result;
use crate::mapping::MetricType;

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let info = ctx.registry.register(
        "sonus_info",
        "System Information",
        MetricType::Gauge,
        &["hwType", "serial", "server", "system", "version"],
    )?;

    let status: ServerStatusCollection = ctx.session.fetch(paths::SERVER_STATUS, &[]).await?;
    for server in &status.servers {
        info.set(
            &[
                server.hw_type.as_str(),
                server.serial_num.as_str(),
                server.name.as_str(),
                ctx.system(),
                server.application_version.as_str(),
            ],
            1.0,
        )?;
    }

    debug!(servers = status.servers.len(), "Collected server info");
    Ok(())
}
