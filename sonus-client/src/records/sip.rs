//! Per-zone SIP message counters.

use serde::Deserialize;

use crate::record;

record! {
    /// SIP message counters of one trunk group.
    pub struct SipStatistics {
        name: name => "name",
        rcv_invite: numeric => "rcvInvite" as "RcvInvite",
        snd_invite: numeric => "sndInvite" as "SndInvite",
        rcv_ack: numeric => "rcvAck" as "RcvAck",
        snd_ack: numeric => "sndAck" as "SndAck",
        rcv_prack: numeric => "rcvPrack" as "RcvPrack",
        snd_prack: numeric => "sndPrack" as "SndPrack",
        rcv_info: numeric => "rcvInfo" as "RcvInfo",
        snd_info: numeric => "sndInfo" as "SndInfo",
        rcv_refer: numeric => "rcvRefer" as "RcvRefer",
        snd_refer: numeric => "sndRefer" as "SndRefer",
        rcv_bye: numeric => "rcvBye" as "RcvBye",
        snd_bye: numeric => "sndBye" as "SndBye",
        rcv_cancel: numeric => "rcvCancel" as "RcvCancel",
        snd_cancel: numeric => "sndCancel" as "SndCancel",
        rcv_register: numeric => "rcvRegister" as "RcvRegister",
        snd_register: numeric => "sndRegister" as "SndRegister",
        rcv_update: numeric => "rcvUpdate" as "RcvUpdate",
        snd_update: numeric => "sndUpdate" as "SndUpdate",
        rcv18x: numeric => "rcv18x" as "Rcv18x",
        snd18x: numeric => "snd18x" as "Snd18x",
        rcv1xx: numeric => "rcv1xx" as "Rcv1xx",
        snd1xx: numeric => "snd1xx" as "Snd1xx",
        rcv2xx: numeric => "rcv2xx" as "Rcv2xx",
        snd2xx: numeric => "snd2xx" as "Snd2xx",
        rcv_non_inv2xx: numeric => "rcvNonInv2xx" as "RcvNonInv2xx",
        snd_non_inv2xx: numeric => "sndNonInv2xx" as "SndNonInv2xx",
        rcv3xx: numeric => "rcv3xx" as "Rcv3xx",
        snd3xx: numeric => "snd3xx" as "Snd3xx",
        rcv4xx: numeric => "rcv4xx" as "Rcv4xx",
        snd4xx: numeric => "snd4xx" as "Snd4xx",
        rcv5xx: numeric => "rcv5xx" as "Rcv5xx",
        snd5xx: numeric => "snd5xx" as "Snd5xx",
        rcv6xx: numeric => "rcv6xx" as "Rcv6xx",
        snd6xx: numeric => "snd6xx" as "Snd6xx",
        rcv_non_inv_err: numeric => "rcvNonInvErr" as "RcvNonInvErr",
        snd_non_inv_err: numeric => "sndNonInvErr" as "SndNonInvErr",
        rcv_unknown_msg: numeric => "rcvUnknownMsg" as "RcvUnknownMsg",
        rcv_subscriber: numeric => "rcvSubscriber" as "RcvSubscriber",
        snd_subscriber: numeric => "sndSubscriber" as "SndSubscriber",
        rcv_notify: numeric => "rcvNotify" as "RcvNotify",
        snd_notify: numeric => "sndNotify" as "SndNotify",
        rcv_option: numeric => "rcvOption" as "RcvOption",
        snd_option: numeric => "sndOption" as "SndOption",
        inv_re_transmit: numeric => "invReTransmit" as "InvReTransmit",
        reg_re_transmit: numeric => "regReTransmit" as "RegReTransmit",
        bye_re_transmit: numeric => "byeRetransmit" as "ByeReTransmit",
        cancel_re_transmit: numeric => "cancelReTransmit" as "CancelReTransmit",
        other_re_transmit: numeric => "otherReTransmit" as "OtherReTransmit",
        rcv_message: numeric => "rcvMessage" as "RcvMessage",
        snd_message: numeric => "sndMessage" as "SndMessage",
        rcv_publish: numeric => "rcvPublish" as "RcvPublish",
        snd_publish: numeric => "sndPublish" as "SndPublish",
        emergency_accept: numeric => "emergencyAccept" as "EmergencyAccept",
        emergency_reject_bw_call: numeric => "emergencyRejectBWCall" as "EmergencyRejectBWCall",
        emergency_reject_policer: numeric => "emergencyRejectPolicer" as "EmergencyRejectPolicer",
        hpc_accept: numeric => "hpcAccept" as "HpcAccept",
        number_of_calls_sending_aars: numeric => "numberOfCallsSendingAARs" as "NumberOfCallsSendingAARs",
        number_of_received_aaa_failures: numeric => "numberOfReceivedAAAFailures" as "NumberOfReceivedAAAFailures",
        number_of_total_aar_sent: numeric => "numberOfTotalAARSent" as "NumberOfTotalAARSent",
        number_of_timeout_or_error_aar: numeric => "numberOfTimeoutOrErrorAAR" as "NumberOfTimeoutOrErrorAAR",
        emergency_reg_accept: numeric => "emergencyRegAccept" as "EmergencyRegAccept",
        emergency_reg_reject_limit: numeric => "emergencyRegRejectLimit" as "EmergencyRegRejectLimit",
        emergency_reg_reject_policer: numeric => "emergencyRegRejectPolicer" as "EmergencyRegRejectPolicer",
        number_of_received_aaa_successes: numeric => "numberOfReceivedAAASuccesses" as "NumberOfReceivedAAASuccesses",
        number_of_received_rars: numeric => "numberOfReceivedRARs" as "NumberOfReceivedRARs",
        number_of_received_asrs: numeric => "numberOfReceivedASRs" as "NumberOfReceivedASRs",
        number_of_sent_strs: numeric => "numberOfSentSTRs" as "NumberOfSentSTRs",
        emergency_ood_accept: numeric => "emergencyOODAccept" as "EmergencyOODAccept",
        emergency_ood_reject_policer: numeric => "emergencyOODRejectPolicer" as "EmergencyOODRejectPolicer",
        emergency_subs_accept: numeric => "emergencySubsAccept" as "EmergencySubsAccept",
        emergency_subs_reject_limit: numeric => "emergencySubsRejectLimit" as "EmergencySubsRejectLimit",
        emergency_subs_reject_policer: numeric => "emergencySubsRejectPolicer" as "EmergencySubsRejectPolicer",
        parse_error: numeric => "parseError" as "ParseError",
        number_of_total_udr_sent: numeric => "numberOfTotalUDRSent" as "NumberOfTotalUDRSent",
        number_of_timeout_or_error_udr: numeric => "numberOfTimeoutOrErrorUDR" as "NumberOfTimeoutOrErrorUDR",
        number_of_received_uda_successes: numeric => "numberOfReceivedUDASuccesses" as "NumberOfReceivedUDASuccesses",
        number_of_received_uda_failures: numeric => "numberOfReceivedUDAFailures" as "NumberOfReceivedUDAFailures",
        tot_num_of_s8hr_outbnd_reg: numeric => "totNumOfS8hrOutbndReg" as "TotNumOfS8hrOutbndReg",
        num_of_s8hr_outbnd_reg_suc: numeric => "numOfS8hrOutbndRegSuc" as "NumOfS8hrOutbndRegSuc",
        num_of_s8hr_outbnd_reg_fail: numeric => "numOfS8hrOutbndRegFail" as "NumOfS8hrOutbndRegFail",
        tot_num_of_s8hr_outbnd_normal_call: numeric => "totNumOfS8hrOutbndNormalCall" as "TotNumOfS8hrOutbndNormalCall",
        num_of_s8hr_outbnd_normal_call_suc: numeric => "numOfS8hrOutbndNormalCallSuc" as "NumOfS8hrOutbndNormalCallSuc",
        num_of_s8hr_outbnd_normal_call_fail: numeric => "numOfS8hrOutbndNormalCallFail" as "NumOfS8hrOutbndNormalCallFail",
        num_of_s8hr_outbnd_emg_call_rej: numeric => "numOfS8hrOutbndEmgCallRej" as "NumOfS8hrOutbndEmgCallRej",
        num_of_s8hr_inbound_reg_suc: numeric => "numOfS8hrInboundRegSuc" as "NumOfS8hrInboundRegSuc",
        num_of_s8hr_inbound_reg_fail: numeric => "numOfS8hrInboundRegFail" as "NumOfS8hrInboundRegFail",
        num_of_s8hr_inbound_emg_call_suc: numeric => "numOfS8hrInboundEmgCallSuc" as "NumOfS8hrInboundEmgCallSuc",
        num_of_s8hr_inbound_emg_call_fail: numeric => "numOfS8hrInboundEmgCallFail" as "NumOfS8hrInboundEmgCallFail",
        in_hpc_accept: numeric => "inHpcAccept" as "InHpcAccept",
        out_hpc_accept: numeric => "outHpcAccept" as "OutHpcAccept",
        hpc403_out: numeric => "hpc403Out" as "Hpc403Out",
        hpc_overload_exempt: numeric => "hpcOverloadExempt" as "HpcOverloadExempt",
    }
}

/// Body of the `sipCurrentStatistics` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SipStatisticsCollection {
    #[serde(rename = "sipCurrentStatistics", default)]
    pub statistics: Vec<SipStatistics>,
}
