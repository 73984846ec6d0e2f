//! Device API path templates.
//!
//! Each `{}` is replaced positionally by [`expand_path`](crate::expand_path);
//! paths are relative to `{scheme}://{target}/api`.

pub const SYSTEM_INFO: &str = "/config/system";
pub const SERVER_STATUS: &str = "/operational/system/serverStatus/";
pub const ADDRESS_CONTEXTS: &str = "/config/addressContext/";
/// Address context.
pub const ZONE_STATUS: &str = "/operational/addressContext/{}/zoneStatus/";
/// Address context.
pub const ZONES: &str = "/operational/addressContext/{}/zone/";
/// Address context, zone.
pub const SIP_STATISTICS: &str = "/operational/addressContext/{}/zone/{}/sipCurrentStatistics/";
/// Address context, zone.
pub const CALL_STATISTICS: &str = "/operational/addressContext/{}/zone/{}/callCurrentStatistics/";
pub const FAN_STATUS: &str = "/operational/system/fanStatus/";
pub const POWER_SUPPLY_STATUS: &str = "/operational/system/powerSupplyStatus/";
pub const DSP_USAGE: &str = "/operational/system/dspStatus/dspUsage/";
pub const TRUNK_GROUP_STATUS: &str = "/operational/global/globalTrunkGroupStatus/";
