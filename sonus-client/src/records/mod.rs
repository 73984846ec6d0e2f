//! Wire records returned by the device API.
//!
//! Records that feed the generic metric mapper are declared with
//! [`record!`](crate::record); the rest are plain serde structs read by
//! hand-written probes.

mod calls;
mod dsp;
mod fans;
mod power;
mod server;
mod sip;
mod trunk_groups;
mod zones;

pub use calls::{CallStatistics, CallStatisticsCollection};
pub use dsp::{DspUsage, DspUsageCollection};
pub use fans::{FanCollection, FanStatus};
pub use power::{PowerSupplyCollection, PowerSupplyStatus};
pub use server::{ServerStatus, ServerStatusCollection};
pub use sip::{SipStatistics, SipStatisticsCollection};
pub use trunk_groups::{GlobalTrunkGroupStatus, TrunkGroupStatusCollection};
pub use zones::{
    CacIngress, CallFailureStatistics, IpPeerStatistics, PeerQosStatus, RetryCounters,
    SipResponseStatistics, SipSigConnStatistics, SipSigConnStatus, SipSigPortStatistics,
    SipSigPortTlsStatistics, SipTrunkGroup, SipTrunkGroupResponseStatistics, TrafficControlStatistics,
    TrunkGroupCac, TrunkGroupQoeStatus, TrunkGroupSignaling, TrunkGroupStatus, ZoneStatistics,
    ZoneStatisticsCollection, ZoneStatus, ZoneStatusCollection,
};
