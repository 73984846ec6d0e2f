//! Global trunk group status.

use serde::Deserialize;

/// Body of `/operational/global/globalTrunkGroupStatus/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrunkGroupStatusCollection {
    #[serde(rename = "globalTrunkGroupStatus", default)]
    pub trunk_groups: Vec<GlobalTrunkGroupStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalTrunkGroupStatus {
    pub name: String,
    pub state: String,
    pub address_context: String,
    pub zone: String,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub total_calls_available: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub total_calls_inbound_reserved: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub inbound_calls_usage: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub outbound_calls_usage: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub total_calls_configured: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub priority_call_usage: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub total_outbound_calls_reserved: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub bw_current_limit: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub bw_available: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub bw_inbound_usage: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub bw_outbound_usage: f64,
    pub packet_out_detect_state: String,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub priority_bw_usage: f64,
}

impl GlobalTrunkGroupStatus {
    pub fn in_service(&self) -> bool {
        self.state == "inService"
    }

    /// Outbound packet-outage detection reports no outage.
    pub fn outbound_normal(&self) -> bool {
        self.packet_out_detect_state == "normal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counters_decode_as_zero() {
        let xml = r#"
            <collection>
              <globalTrunkGroupStatus>
                <name>TG2</name>
                <inboundCallsUsage/>
                <bwInboundUsage></bwInboundUsage>
                <outboundCallsUsage>2</outboundCallsUsage>
              </globalTrunkGroupStatus>
            </collection>
        "#;
        let status: TrunkGroupStatusCollection = quick_xml::de::from_str(xml).unwrap();
        let group = &status.trunk_groups[0];
        assert_eq!(group.inbound_calls_usage, 0.0);
        assert_eq!(group.bw_inbound_usage, 0.0);
        assert_eq!(group.outbound_calls_usage, 2.0);
    }

    #[test]
    fn test_decode_trunk_groups() {
        let xml = r#"
            <collection xmlns:y="http://tail-f.com/ns/rest">
              <globalTrunkGroupStatus xmlns="http://sonusnet.com/ns/mibs/SONUS-GLOBAL-TRUNKGROUP/1.0">
                <name>TEST</name>
                <state>inService</state>
                <totalCallsAvailable>100</totalCallsAvailable>
                <inboundCallsUsage>3</inboundCallsUsage>
                <outboundCallsUsage>4</outboundCallsUsage>
                <totalCallsConfigured>100</totalCallsConfigured>
                <bwCurrentLimit>-1</bwCurrentLimit>
                <bwInboundUsage>640</bwInboundUsage>
                <packetOutDetectState>normal</packetOutDetectState>
                <addressContext>default</addressContext>
                <zone>zone_23</zone>
              </globalTrunkGroupStatus>
            </collection>
        "#;

        let tgs: TrunkGroupStatusCollection = quick_xml::de::from_str(xml).unwrap();
        let tg = &tgs.trunk_groups[0];
        assert_eq!(tg.zone, "zone_23");
        assert_eq!(tg.inbound_calls_usage, 3.0);
        assert_eq!(tg.bw_current_limit, -1.0);
        assert!(tg.in_service());
        assert!(tg.outbound_normal());
    }

    #[test]
    fn test_state_flags() {
        let tg = GlobalTrunkGroupStatus {
            state: "outOfService".to_string(),
            packet_out_detect_state: "outage".to_string(),
            ..Default::default()
        };
        assert!(!tg.in_service());
        assert!(!tg.outbound_normal());
    }
}
