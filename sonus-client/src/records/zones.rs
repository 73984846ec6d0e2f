//! Zone status and the full per-zone statistics tree.

use serde::Deserialize;

use crate::record;
use crate::records::{CallStatistics, SipStatistics};

/// Body of `/operational/addressContext/{}/zoneStatus/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneStatusCollection {
    #[serde(rename = "zoneStatus", default)]
    pub zones: Vec<ZoneStatus>,
}

/// Call capacity summary of one zone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneStatus {
    pub name: String,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub total_calls_available: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub inbound_calls_usage: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub outbound_calls_usage: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub total_calls_configured: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub active_sip_reg_count: f64,
}

/// Body of `/operational/addressContext/{}/zone/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneStatisticsCollection {
    #[serde(rename = "zone", default)]
    pub zones: Vec<ZoneStatistics>,
}

record! {
    /// Everything the device reports about one zone.
    ///
    /// The zone name travels in the zone label, so it is declared as plain
    /// text and stays out of the composite name.
    pub struct ZoneStatistics {
        name: text => "name",
        id: text => "id",
        sip_sig_port_statistics: nested(SipSigPortStatistics) => "sipSigPortStatistics" as "SipSigPortStatistics",
        sip_sig_conn_status: repeated(SipSigConnStatus) => "sipSigConnStatus" as "SipSigConnStatus",
        sip_sig_conn_statistics: nested(SipSigConnStatistics) => "sipSigConnStatistics" as "SipSigConnStatistics",
        sip_sig_port_tls_statistics: nested(SipSigPortTlsStatistics) => "sipSigPortTlsStatistics" as "SipSigPortTlsStatistics",
        sip_current_statistics: repeated(SipStatistics) => "sipCurrentStatistics" as "SipCurrentStatistics",
        sip_invite_response_current_statistics: repeated(SipResponseStatistics) => "sipInviteResponseCurrentStatistics" as "SipInviteResponseCurrentStatistics",
        sip_bye_response_current_statistics: repeated(SipResponseStatistics) => "sipByeResponseCurrentStatistics" as "SipByeResponseCurrentStatistics",
        sip_option_response_current_statistics: repeated(SipResponseStatistics) => "sipOptionResponseCurrentStatistics" as "SipOptionResponseCurrentStatistics",
        call_current_statistics: repeated(CallStatistics) => "callCurrentStatistics" as "CallCurrentStatistics",
        call_failure_current_statistics: repeated(CallFailureStatistics) => "callFailureCurrentStatistics" as "CallFailureCurrentStatistics",
        traffic_control_current_statistics: repeated(TrafficControlStatistics) => "trafficControlCurrentStatistics" as "TrafficControlCurrentStatistics",
        sip_trunk_group: repeated(SipTrunkGroup) => "sipTrunkGroup" as "SipTrunkGroup",
        trunk_group_status: repeated(TrunkGroupStatus) => "trunkGroupStatus" as "TrunkGroupStatus",
        trunk_group_qoe_status: repeated(TrunkGroupQoeStatus) => "trunkGroupQoeStatus" as "TrunkGroupQoeStatus",
        peer_qos_status: repeated(PeerQosStatus) => "peerQosStatus" as "PeerQosStatus",
        ip_peer_current_statistics: repeated(IpPeerStatistics) => "ipPeerCurrentStatistics" as "IpPeerCurrentStatistics",
        sip_trunk_group_response_current_statistics: repeated(SipTrunkGroupResponseStatistics) => "sipTrunkGroupResponseCurrentStatistics" as "SipTrunkGroupResponseCurrentStatistics",
    }
}

record! {
    pub struct SipSigPortStatistics {
        index: text => "index",
        call_rate: numeric => "callRate" as "CallRate",
        orig_calls: numeric => "origCalls" as "OrigCalls",
        term_calls: numeric => "termCalls" as "TermCalls",
        tx_pdus: numeric => "txPdus" as "TxPdus",
        rx_pdus: numeric => "rxPdus" as "RxPdus",
        tx_bytes: numeric => "txBytes" as "TxBytes",
        rx_bytes: numeric => "rxBytes" as "RxBytes",
        in_regs: numeric => "inRegs" as "InRegs",
        out_regs: numeric => "outRegs" as "OutRegs",
        tx500s: numeric => "tx500s" as "Tx500s",
        tx503s: numeric => "tx503s" as "Tx503s",
    }
}

record! {
    /// One signaling connection; identified by its connection id.
    pub struct SipSigConnStatus {
        connection_id: name => "connectionId",
        index: text => "index",
        peer_ip_address: text => "peerIpAddress",
        peer_port_num: text => "peerPortNum",
        socket: text => "socket",
        transport: text => "transport",
        state: text => "state",
        role: text => "role",
        aging: text => "aging",
        idle_time: text => "idleTime",
        bytes_sent: numeric => "bytesSent" as "BytesSent",
        bytes_rcvd: numeric => "bytesRcvd" as "BytesRcvd",
        pdu_send_queued: numeric => "pduSendQueued" as "PduSendQueued",
        pdu_recv_queued: numeric => "pduRecvQueued" as "PduRecvQueued",
    }
}

record! {
    pub struct SipSigConnStatistics {
        index: text => "index",
        tcp_connection: text => "tcpConnection",
        total_tcp_connection: numeric => "totalTcpConnection" as "TotalTcpConnection",
        active_tls_tcp_connection: numeric => "activeTlsTcpConnection" as "ActiveTlsTcpConnection",
        total_tls_tcp_connection: numeric => "totalTlsTcpConnection" as "TotalTlsTcpConnection",
    }
}

record! {
    pub struct SipSigPortTlsStatistics {
        index: text => "index",
        current_server_sessions: numeric => "currentServerSessions" as "CurrentServerSessions",
        total_server_sessions: numeric => "totalServerSessions" as "TotalServerSessions",
        current_client_handshakes: numeric => "currentClientHandshakes" as "CurrentClientHandshakes",
        current_server_handshakes: numeric => "currentServerHandshakes" as "CurrentServerHandshakes",
        session_resumptions: numeric => "sessionResumptions" as "SessionResumptions",
        no_cipher_suite: numeric => "noCipherSuite" as "NoCipherSuite",
        handshake_timeouts: numeric => "handshakeTimeouts" as "HandshakeTimeouts",
        higher_auth_timeout: numeric => "higherAuthTimeout" as "HigherAuthTimeout",
        client_auth_failures: numeric => "clientAuthFailures" as "ClientAuthFailures",
        server_auth_failures: numeric => "serverAuthFailures" as "ServerAuthFailures",
        fatel_alerts_received: numeric => "fatelAlertsReceived" as "FatelAlertsReceived",
        warning_alerts_received: numeric => "warningAlertsReceived" as "WarningAlertsReceived",
        handshake_failures: numeric => "handshakeFailures" as "HandshakeFailures",
        receive_failures: numeric => "receiveFailures" as "ReceiveFailures",
        send_failures: numeric => "sendFailures" as "SendFailures",
        no_auth_drops: numeric => "noAuthDrops" as "NoAuthDrops",
        no_auth488: numeric => "noAuth488" as "NoAuth488",
        mid_connection_hello: numeric => "midConnectionHello" as "MidConnectionHello",
        no_client_cert: numeric => "noClientCert" as "NoClientCert",
        validation_failures: numeric => "validationFailures" as "ValidationFailures",
        current_client_connections: numeric => "currentClientConnections" as "CurrentClientConnections",
        total_client_connections: numeric => "totalClientConnections" as "TotalClientConnections",
        current_server_connections: numeric => "currentServerConnections" as "CurrentServerConnections",
        total_server_connections: numeric => "totalServerConnections" as "TotalServerConnections",
    }
}

record! {
    /// Authentication failure responses to one request method.
    pub struct SipResponseStatistics {
        name: name => "name",
        response401: numeric => "response401" as "Response401",
        response403: numeric => "response403" as "Response403",
        response407: numeric => "response407" as "Response407",
        response481: numeric => "response481" as "Response481",
    }
}

record! {
    pub struct CallFailureStatistics {
        name: name => "name",
        in_call_fail_no_routes: numeric => "inCallFailNoRoutes" as "InCallFailNoRoutes",
        in_call_fail_no_resources: numeric => "inCallFailNoResources" as "InCallFailNoResources",
        in_call_fail_no_service: numeric => "inCallFailNoService" as "InCallFailNoService",
        in_call_fail_invalid_call: numeric => "inCallFailInvalidCall" as "InCallFailInvalidCall",
        in_call_fail_network_failure: numeric => "inCallFailNetworkFailure" as "InCallFailNetworkFailure",
        in_call_fail_protocol_error: numeric => "inCallFailProtocolError" as "InCallFailProtocolError",
        in_call_fail_unspecified: numeric => "inCallFailUnspecified" as "InCallFailUnspecified",
        out_call_fail_no_routes: numeric => "outCallFailNoRoutes" as "OutCallFailNoRoutes",
        out_call_fail_no_resources: numeric => "outCallFailNoResources" as "OutCallFailNoResources",
        out_call_fail_no_service: numeric => "outCallFailNoService" as "OutCallFailNoService",
        out_call_fail_invalid_call: numeric => "outCallFailInvalidCall" as "OutCallFailInvalidCall",
        out_call_fail_network_failure: numeric => "outCallFailNetworkFailure" as "OutCallFailNetworkFailure",
        out_call_fail_protocol_error: numeric => "outCallFailProtocolError" as "OutCallFailProtocolError",
        out_call_fail_unspecified: numeric => "outCallFailUnspecified" as "OutCallFailUnspecified",
        routing_failures_resv: numeric => "routingFailuresResv" as "RoutingFailuresResv",
        alloc_fail_bw_limit: numeric => "allocFailBwLimit" as "AllocFailBwLimit",
        alloc_fail_call_limit: numeric => "allocFailCallLimit" as "AllocFailCallLimit",
        no_psx_route: numeric => "noPsxRoute" as "NoPsxRoute",
        call_abandoned: numeric => "callAbandoned" as "CallAbandoned",
        call_fail_policing: numeric => "callFailPolicing" as "CallFailPolicing",
        sip_reg_fail_policing: numeric => "sipRegFailPolicing" as "SipRegFailPolicing",
        sip_reg_fail_internal: numeric => "sipRegFailInternal" as "SipRegFailInternal",
        sip_reg_fail_other: numeric => "sipRegFailOther" as "SipRegFailOther",
        security_fail: numeric => "securityFail" as "SecurityFail",
        reg_calls_failed: numeric => "regCallsFailed" as "RegCallsFailed",
        non_match_src_ip_calls_fail: numeric => "nonMatchSrcIpCallsFail" as "NonMatchSrcIpCallsFail",
        invalid_sp_calls_failed: numeric => "invalidSPCallsFailed" as "InvalidSPCallsFailed",
        alloc_fail_parent_constraint: numeric => "allocFailParentConstraint" as "AllocFailParentConstraint",
        sip_subs_fail_policing: numeric => "sipSubsFailPolicing" as "SipSubsFailPolicing",
        sip_other_req_fail_policing: numeric => "sipOtherReqFailPolicing" as "SipOtherReqFailPolicing",
        video_threshold_limit: numeric => "videoThresholdLimit" as "VideoThresholdLimit",
        sip_other_req_fail_internal: numeric => "sipOtherReqFailInternal" as "SipOtherReqFailInternal",
        sip_other_req_fail_other: numeric => "sipOtherReqFailOther" as "SipOtherReqFailOther",
    }
}

record! {
    pub struct TrafficControlStatistics {
        name: name => "name",
        silc: numeric => "silc" as "Silc",
        str_cant: numeric => "strCant" as "StrCant",
        str_skip: numeric => "strSkip" as "StrSkip",
        skip: numeric => "skip" as "Skip",
        cant: numeric => "cant" as "Cant",
        canf: numeric => "canf" as "Canf",
        acc_cant: numeric => "accCant" as "AccCant",
        acc_skip: numeric => "accSkip" as "AccSkip",
        route_attempts_irr: numeric => "routeAttemptsIRR" as "RouteAttemptsIRR",
        route_attempts_sirr: numeric => "routeAttemptsSIRR" as "RouteAttemptsSIRR",
        route_attempts_orr: numeric => "routeAttemptsORR" as "RouteAttemptsORR",
        route_attempts_sorr: numeric => "routeAttemptsSORR" as "RouteAttemptsSORR",
        successful_irr: numeric => "successfulIRR" as "SuccessfulIRR",
        successful_sirr: numeric => "successfulSIRR" as "SuccessfulSIRR",
        successful_orr: numeric => "successfulORR" as "SuccessfulORR",
        successful_sorr: numeric => "successfulSORR" as "SuccessfulSORR",
    }
}

record! {
    /// Configured limits of a SIP trunk group.
    pub struct SipTrunkGroup {
        name: name => "name",
        state: text => "state",
        mode: text => "mode",
        cac: nested(TrunkGroupCac) => "cac" as "Cac",
        signaling: nested(TrunkGroupSignaling) => "signaling" as "Signaling",
    }
}

record! {
    pub struct TrunkGroupCac {
        call_limit: numeric => "callLimit" as "CallLimit",
        ingress: nested(CacIngress) => "ingress" as "Ingress",
    }
}

record! {
    pub struct CacIngress {
        call_rate_max: numeric => "callRateMax" as "CallRateMax",
        call_burst_max: numeric => "callBurstMax" as "CallBurstMax",
    }
}

record! {
    pub struct TrunkGroupSignaling {
        retry_counters: nested(RetryCounters) => "retryCounters" as "RetryCounters",
    }
}

record! {
    pub struct RetryCounters {
        invite: numeric => "invite" as "Invite",
        general: numeric => "general" as "General",
    }
}

record! {
    pub struct TrunkGroupStatus {
        name: name => "name",
        state: text => "state",
        total_calls_available: numeric => "totalCallsAvailable" as "TotalCallsAvailable",
        total_calls_inbound_reserved: numeric => "totalCallsInboundReserved" as "TotalCallsInboundReserved",
        inbound_calls_usage: numeric => "inboundCallsUsage" as "InboundCallsUsage",
        outbound_calls_usage: numeric => "outboundCallsUsage" as "OutboundCallsUsage",
        total_calls_configured: numeric => "totalCallsConfigured" as "TotalCallsConfigured",
        priority_call_usage: numeric => "priorityCallUsage" as "PriorityCallUsage",
        total_outbound_calls_reserved: numeric => "totalOutboundCallsReserved" as "TotalOutboundCallsReserved",
        bw_current_limit: numeric => "bwCurrentLimit" as "BwCurrentLimit",
        bw_available: numeric => "bwAvailable" as "BwAvailable",
        bw_inbound_usage: numeric => "bwInboundUsage" as "BwInboundUsage",
        bw_outbound_usage: numeric => "bwOutboundUsage" as "BwOutboundUsage",
        packet_out_detect_state: text => "packetOutDetectState",
        priority_bw_usage: numeric => "priorityBwUsage" as "PriorityBwUsage",
    }
}

record! {
    pub struct TrunkGroupQoeStatus {
        name: name => "name",
        inbound_r_factor: numeric => "inboundRFactor" as "InboundRFactor",
        inbound_r_factor_from_sbxboot: numeric => "inboundRFactorFromSBXBOOT" as "InboundRFactorFromSBXBOOT",
        inbound_r_factor_num_critical_threshold_breached: numeric => "inboundRFactorNumCriticalThresholdBreached" as "InboundRFactorNumCriticalThresholdBreached",
        inbound_r_factor_num_major_threshold_breached: numeric => "inboundRFactorNumMajorThresholdBreached" as "InboundRFactorNumMajorThresholdBreached",
        outbound_r_factor: numeric => "outboundRFactor" as "OutboundRFactor",
        outbound_r_factor_from_sbxboot: numeric => "outboundRFactorFromSBXBOOT" as "OutboundRFactorFromSBXBOOT",
        outbound_r_factor_num_critical_threshold_breached: numeric => "outboundRFactorNumCriticalThresholdBreached" as "OutboundRFactorNumCriticalThresholdBreached",
        outbound_r_factor_num_major_threshold_breached: numeric => "outboundRFactorNumMajorThresholdBreached" as "OutboundRFactorNumMajorThresholdBreached",
        current_asr: numeric => "currentASR" as "CurrentASR",
        asr_from_sbxboot: numeric => "asrFromSBXBOOT" as "AsrFromSBXBOOT",
        asr_critical_threshold_exceeded: numeric => "asrCriticalThresholdExceeded" as "AsrCriticalThresholdExceeded",
        asr_major_threshold_exceeded: numeric => "asrMajorThresholdExceeded" as "AsrMajorThresholdExceeded",
        egress_sustained_call_rate: numeric => "egressSustainedCallRate" as "EgressSustainedCallRate",
        egress_active_calls: numeric => "egressActiveCalls" as "EgressActiveCalls",
        current_pgrd: numeric => "currentPgrd" as "CurrentPgrd",
        qos_drop_count: numeric => "qosDropCount" as "QosDropCount",
    }
}

record! {
    pub struct PeerQosStatus {
        name: name => "name",
        egress_active_calls: numeric => "egressActiveCalls" as "EgressActiveCalls",
        egress_sustained_call_rate: numeric => "egressSustainedCallRate" as "EgressSustainedCallRate",
        current_pgrd: numeric => "currentPGRD" as "CurrentPGRD",
        current_asr: numeric => "currentASR" as "CurrentASR",
        qos_drop_count: numeric => "qosDropCount" as "QosDropCount",
    }
}

record! {
    pub struct IpPeerStatistics {
        name: name => "name",
        inbound_sessions: numeric => "inboundSessions" as "InboundSessions",
        inbound_cps: numeric => "inboundCPS" as "InboundCPS",
        inbound_max_sessions: numeric => "inboundMaxSessions" as "InboundMaxSessions",
        outbound_sessions: numeric => "outboundSessions" as "OutboundSessions",
        outbound_cps: numeric => "outboundCPS" as "OutboundCPS",
        outbound_max_sessions: numeric => "outboundMaxSessions" as "OutboundMaxSessions",
    }
}

record! {
    /// Response counts per trunk group, direction and response code.
    ///
    /// Direction and code are identity fields so each row gets its own
    /// composite name.
    pub struct SipTrunkGroupResponseStatistics {
        name: name => "name",
        direction: name => "direction",
        response_code: name => "responseCode",
        response_count: numeric => "responseCount" as "ResponseCount",
    }
}
