//! SIP request and response counters per trunk group.

use std::sync::Arc;

use sonus_client::records::{SipStatistics, SipStatisticsCollection};
use sonus_client::{TopologyLeaf, paths};
use tracing::debug;

use super::ProbeContext;
use crate::error::Result;
use crate::fanout::fan_out;
use crate::mapping::MetricType;
use crate::registry::{MetricFamily, MetricRegistry};

#[derive(Clone)]
struct SipFamilies {
    req_sent: Arc<MetricFamily>,
    req_recv: Arc<MetricFamily>,
    resp_sent: Arc<MetricFamily>,
    resp_recv: Arc<MetricFamily>,
}

impl SipFamilies {
    fn register(registry: &MetricRegistry) -> Result<Self> {
        let by_method = ["system", "zone", "name", "method"];
        let by_code = ["system", "zone", "name", "code"];
        Ok(Self {
            req_sent: registry.register(
                "sonus_TG_sip_req_sent",
                "Number of SIP requests sent",
                MetricType::Counter,
                &by_method,
            )?,
            req_recv: registry.register(
                "sonus_TG_sip_req_recv",
                "Number of SIP requests received",
                MetricType::Counter,
                &by_method,
            )?,
            resp_sent: registry.register(
                "sonus_TG_sip_resp_sent",
                "Number of SIP responses sent",
                MetricType::Counter,
                &by_code,
            )?,
            resp_recv: registry.register(
                "sonus_TG_sip_resp_recv",
                "Number of SIP responses received",
                MetricType::Counter,
                &by_code,
            )?,
        })
    }
}

pub async fn collect(ctx: &ProbeContext) -> Result<()> {
    let families = SipFamilies::register(&ctx.registry)?;
    let leaves = ctx.session.topology().leaves();

    let completed = fan_out(leaves, ctx.leaf_concurrency, |leaf| {
        let ctx = ctx.clone();
        let families = families.clone();
        async move { harvest(&ctx, &families, leaf).await }
    })
    .await?;

    debug!(zones = completed, "Collected SIP statistics");
    Ok(())
}

async fn harvest(ctx: &ProbeContext, families: &SipFamilies, leaf: TopologyLeaf) -> Result<()> {
    let stats: SipStatisticsCollection = ctx
        .session
        .fetch(
            paths::SIP_STATISTICS,
            &[leaf.address_context.as_str(), leaf.zone.as_str()],
        )
        .await?;

    let system = ctx.system();
    let zone = leaf.zone.as_str();
    for stat in &stats.statistics {
        let name = stat.name.as_str();
        for (method, value) in requests_sent(stat) {
            families.req_sent.add(&[system, zone, name, method], value)?;
        }
        for (method, value) in requests_received(stat) {
            families.req_recv.add(&[system, zone, name, method], value)?;
        }
        for (code, value) in responses_sent(stat) {
            families.resp_sent.add(&[system, zone, name, code], value)?;
        }
        for (code, value) in responses_received(stat) {
            families.resp_recv.add(&[system, zone, name, code], value)?;
        }
    }
    Ok(())
}

fn requests_sent(s: &SipStatistics) -> [(&'static str, f64); 18] {
    [
        ("INVITE", s.snd_invite),
        ("PRACK", s.snd_prack),
        ("INFO", s.snd_info),
        ("REFER", s.snd_refer),
        ("BYE", s.snd_bye),
        ("CANCEL", s.snd_cancel),
        ("REGISTER", s.snd_register),
        ("UPDATE", s.snd_update),
        ("SUBSCRIBE", s.snd_subscriber),
        ("NOTIFY", s.snd_notify),
        ("OPTIONS", s.snd_option),
        ("MESSAGE", s.snd_message),
        ("PUBLISH", s.snd_publish),
        ("INVITE (retrans)", s.inv_re_transmit),
        ("REGISTER (retrans)", s.reg_re_transmit),
        ("BYE (retrans)", s.bye_re_transmit),
        ("CANCEL (retrans)", s.cancel_re_transmit),
        ("Other (retrans)", s.other_re_transmit),
    ]
}

fn requests_received(s: &SipStatistics) -> [(&'static str, f64); 14] {
    [
        ("INVITE", s.rcv_invite),
        ("PRACK", s.rcv_prack),
        ("INFO", s.rcv_info),
        ("REFER", s.rcv_refer),
        ("BYE", s.rcv_bye),
        ("CANCEL", s.rcv_cancel),
        ("REGISTER", s.rcv_register),
        ("UPDATE", s.rcv_update),
        ("SUBSCRIBE", s.rcv_subscriber),
        ("NOTIFY", s.rcv_notify),
        ("OPTIONS", s.rcv_option),
        ("MESSAGE", s.rcv_message),
        ("PUBLISH", s.rcv_publish),
        ("Unknown", s.rcv_unknown_msg),
    ]
}

fn responses_sent(s: &SipStatistics) -> [(&'static str, f64); 10] {
    [
        ("ACK", s.snd_ack),
        ("18x", s.snd18x),
        ("1xx", s.snd1xx),
        ("2xx", s.snd2xx),
        ("Non-INVITE 2xx", s.snd_non_inv2xx),
        ("3xx", s.snd3xx),
        ("4xx", s.snd4xx),
        ("5xx", s.snd5xx),
        ("6xx", s.snd6xx),
        ("Non-INVITE error", s.snd_non_inv_err),
    ]
}

fn responses_received(s: &SipStatistics) -> [(&'static str, f64); 10] {
    [
        ("ACK", s.rcv_ack),
        ("18x", s.rcv18x),
        ("1xx", s.rcv1xx),
        ("2xx", s.rcv2xx),
        ("Non-INVITE 2xx", s.rcv_non_inv2xx),
        ("3xx", s.rcv3xx),
        ("4xx", s.rcv4xx),
        ("5xx", s.rcv5xx),
        ("6xx", s.rcv6xx),
        ("Non-INVITE error", s.rcv_non_inv_err),
    ]
}
