//! Per-zone call counters.

use serde::Deserialize;

use crate::record;

record! {
    /// Current-interval call statistics of one trunk group.
    pub struct CallStatistics {
        name: name => "name",
        in_usage: numeric => "inUsage" as "InUsage",
        out_usage: numeric => "outUsage" as "OutUsage",
        in_calls: numeric => "inCalls" as "InCalls",
        out_calls: numeric => "outCalls" as "OutCalls",
        in_call_attempts: numeric => "inCallAttempts" as "InCallAttempts",
        out_call_attempts: numeric => "outCallAttempts" as "OutCallAttempts",
        max_completed_calls: numeric => "maxCompletedCalls" as "MaxCompletedCalls",
        call_setup_time: numeric => "callSetupTime" as "CallSetupTime",
        call_setups: numeric => "callSetups" as "CallSetups",
        routing_attempts: numeric => "routingAttempts" as "RoutingAttempts",
        in_bw_usage: numeric => "inBwUsage" as "InBwUsage",
        out_bw_usage: numeric => "outBwUsage" as "OutBwUsage",
        max_active_bw_usage: numeric => "maxActiveBwUsage" as "MaxActiveBwUsage",
        calls_with_pkt_outage: numeric => "callsWithPktOutage" as "CallsWithPktOutage",
        calls_with_pkt_outage_at_end: numeric => "callsWithPktOutageAtEnd" as "CallsWithPktOutageAtEnd",
        total_pkt_outage: numeric => "totalPktOutage" as "TotalPktOutage",
        max_pkt_outage: numeric => "maxPktOutage" as "MaxPktOutage",
        pod_events: numeric => "podEvents" as "PodEvents",
        playout_buffer_good: numeric => "playoutBufferGood" as "PlayoutBufferGood",
        playout_buffer_acceptable: numeric => "playoutBufferAcceptable" as "PlayoutBufferAcceptable",
        playout_buffer_poor: numeric => "playoutBufferPoor" as "PlayoutBufferPoor",
        playout_buffer_unacceptable: numeric => "playoutBufferUnacceptable" as "PlayoutBufferUnacceptable",
        sip_reg_attempts: numeric => "sipRegAttempts" as "SipRegAttempts",
        sip_reg_completions: numeric => "sipRegCompletions" as "SipRegCompletions",
        calls_with_psx_dips: numeric => "callsWithPsxDips" as "CallsWithPsxDips",
        total_psx_dips: numeric => "totalPsxDips" as "TotalPsxDips",
        active_regs: numeric => "activeRegs" as "ActiveRegs",
        max_active_regs: numeric => "maxActiveRegs" as "MaxActiveRegs",
        active_subs: numeric => "activeSubs" as "ActiveSubs",
        max_active_subs: numeric => "maxActiveSubs" as "MaxActiveSubs",
        peak_call_rate: numeric => "peakCallRate" as "PeakCallRate",
        total_on_going_calls: numeric => "totalOnGoingCalls" as "TotalOnGoingCalls",
        total_stable_calls: numeric => "totalStableCalls" as "TotalStableCalls",
        total_call_updates: numeric => "totalCallUpdates" as "TotalCallUpdates",
        total_emergency_stable_calls: numeric => "totalEmergencyStableCalls" as "TotalEmergencyStableCalls",
        total_emergency_on_going_calls: numeric => "totalEmergencyOnGoingCalls" as "TotalEmergencyOnGoingCalls",
        in_retarget_calls: numeric => "inRetargetCalls" as "InRetargetCalls",
        in_retarget_regs: numeric => "inRetargetRegs" as "InRetargetRegs",
        out_retarget_calls: numeric => "outRetargetCalls" as "OutRetargetCalls",
        out_retarget_regs: numeric => "outRetargetRegs" as "OutRetargetRegs",
    }
}

/// Body of the `callCurrentStatistics` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallStatisticsCollection {
    #[serde(rename = "callCurrentStatistics", default)]
    pub statistics: Vec<CallStatistics>,
}
