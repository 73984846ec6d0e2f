//! Metric naming, types and help text.

/// Label names shared by every family derived from a record schema.
pub const SERIES_LABELS: [&str; 4] = ["system", "addresscontext", "zone", "name"];

/// Separator between ancestor names in the composite `name` label.
pub const NAME_SEPARATOR: char = ':';

/// Prometheus metric type of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
}

impl MetricType {
    /// Get the TYPE comment string for Prometheus exposition format.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
        }
    }
}

/// Extend a metric name by one path segment.
///
/// An empty prefix yields the segment itself.
pub fn join_name(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}_{}", prefix, segment)
    }
}

/// Help text for a leaf segment, falling back to the segment itself.
pub fn help_for(segment: &'static str) -> &'static str {
    HELP.iter()
        .find(|(key, _)| *key == segment)
        .map(|(_, help)| *help)
        .unwrap_or(segment)
}

/// Descriptions of the per trunk group counters, keyed by leaf segment.
static HELP: &[(&str, &str)] = &[
    (
        "InUsage",
        "The current usage in the inbound direction for this trunk group in seconds. Usage is defined as the time media bandwidth is activated to the time it is deactivated.",
    ),
    (
        "OutUsage",
        "The current usage in the outbound direction for this trunk group in seconds. Usage is defined as the time media bandwidth is activated to the time it is deactivated.",
    ),
    (
        "InCalls",
        "The current number of completed inbound calls on this trunk group.",
    ),
    (
        "OutCalls",
        "The current number of completed outbound calls on this trunk group.",
    ),
    (
        "InCallAttempts",
        "The current number of inbound call attempts on this trunk group.",
    ),
    (
        "OutCallAttempts",
        "The current number of outbound call attempts on this trunk group.",
    ),
    (
        "MaxCompletedCalls",
        "Displayed as maxActiveCalls. The current high water mark of total number of active calls in both the inbound and outbound directions on the trunk group. This statistic accounts for calls that are setting up, stable, or tearing down.",
    ),
    (
        "CallSetupTime",
        "The cumulative duration (in 100th's of a seconds) from an INVITE sent to receiving the first backward 18x response on the egress leg. This value is nearly identical on the ingress counter with any latency due to the time spent for the SBC to send out the received 18x. If no 18x response is present, the callSetupTime is the final 200 response (cumulative count).",
    ),
    (
        "CallSetups",
        "The current total number of calls setup but not necessarily completed in the inbound and outbound directions for this trunk group. This object can be used as the denominator for calculating average call setup time.",
    ),
    (
        "RoutingAttempts",
        "The current number of routing attempts for this trunk group.",
    ),
    (
        "InBwUsage",
        "The sum of BW usage (expected data rate in Kbits per second multiplied by call duration in seconds) for every inbound call associated with this trunk group.",
    ),
    (
        "OutBwUsage",
        "The sum of BW usage (expected data rate in Kbits per second multiplied by call duration in seconds) for every outbound call associated with this trunk group.",
    ),
    (
        "MaxActiveBwUsage",
        "The high water mark of BW usage in either direction associated with this trunk group.",
    ),
    (
        "CallsWithPktOutage",
        "The number of calls with a maximum packet outage whose duration exceeds the configured minimum for this trunk group.",
    ),
    (
        "CallsWithPktOutageAtEnd",
        "The number of calls whose maximum packet outage occurs at the end of the call for this trunk group. This is an indication that the call may have been terminated the because of poor quality.",
    ),
    (
        "TotalPktOutage",
        "The summation of all packet outage durations (in milliseconds) whose duration exceeds the configured minimum, which is experienced during the current performance interval for this trunk group. The average packet outage duration can be calculated by dividing this field by the number of calls reporting packet outages.",
    ),
    (
        "MaxPktOutage",
        "The single longest maximum reported packet outage duration (in milliseconds) experienced during the current performance interval for this trunk group.",
    ),
    (
        "PodEvents",
        "The number of Packet Outage Detection (POD) Events detected for this trunk group. A POD event occurs when a configurable number of calls experience a packet outage with duration exceeding a programmable threshold.",
    ),
    (
        "PlayoutBufferGood",
        "Number of calls with all sub-intervals reporting GOOD playout buffer quality for this trunk group.",
    ),
    (
        "PlayoutBufferAcceptable",
        "Number of calls with all sub-intervals reporting ACCEPTABLE or better playout buffer quality for this trunk group.",
    ),
    (
        "PlayoutBufferPoor",
        "Number of calls with all sub-intervals reporting POOR or better playout buffer quality for this trunk group.",
    ),
    (
        "PlayoutBufferUnacceptable",
        "Number of calls with at least one sub-interval reporting UNACCEPTABLE playout buffer quality for this trunk group.",
    ),
    (
        "SipRegAttempts",
        "The current number of SIP registration attempts on a trunk group.",
    ),
    (
        "SipRegCompletions",
        "The current number of SIP registrations that have successfully completed on a trunk group.",
    ),
    (
        "CallsWithPsxDips",
        "The current number of calls that made a PSX Dip",
    ),
    (
        "TotalPsxDips",
        "The current number of PSX Dips made.",
    ),
    (
        "ActiveRegs",
        "The current number of active registrations on this trunk group.",
    ),
    (
        "MaxActiveRegs",
        "The current number of maximum active registrations on this trunk group (this is the high-watermark achieved on this TG).",
    ),
    (
        "ActiveSubs",
        "The current number of active subscriptions on this trunk group.",
    ),
    (
        "MaxActiveSubs",
        "The current number of maximum active subscriptions on this trunk group (this is the high-watermark achieved on this TG).",
    ),
    (
        "PeakCallRate",
        "Peak call arrival rate for the current interval on this trunk group",
    ),
    (
        "TotalOnGoingCalls",
        "Total Calls (Non-Stable + Stable) on this trunk group",
    ),
    (
        "TotalStableCalls",
        "Total Stable Calls on this trunk group",
    ),
    (
        "TotalCallUpdates",
        "Total Call Updates on this trunk group",
    ),
    (
        "TotalEmergencyStableCalls",
        "Total Emergency Stable Calls on this trunk group",
    ),
    (
        "TotalEmergencyOnGoingCalls",
        "Total Emergency Calls in establishing state on this trunk group",
    ),
    (
        "InRetargetCalls",
        "The current number of incoming calls that are retargeted by Load Balancing Service",
    ),
    (
        "InRetargetRegs",
        "The current number of incoming registrations that are retargeted by Load Balancing Service",
    ),
    (
        "OutRetargetCalls",
        "The current number of outgoing calls that are retargeted by Load Balancing Service",
    ),
    (
        "OutRetargetRegs",
        "The current number of outgoing registrations that are retargeted by Load Balancing Service",
    ),
];
