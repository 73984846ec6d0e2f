//! Chassis and server inventory.

use serde::Deserialize;

/// Body of `/operational/system/serverStatus/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerStatusCollection {
    #[serde(rename = "serverStatus", default)]
    pub servers: Vec<ServerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerStatus {
    pub name: String,
    pub hw_type: String,
    pub serial_num: String,
    pub part_num: String,
    pub platform_version: String,
    pub application_version: String,
    pub mgmt_redundancy_role: String,
    pub up_time: String,
    pub application_up_time: String,
    pub last_restart_reason: String,
    pub sync_status: String,
}
