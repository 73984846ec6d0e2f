//! End-to-end probes against a fake device served over plain HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use sonus_client::{ClientOptions, Credentials, RetryPolicy, TopologyLeaf};
use sonus_common::CaptureLayer;
use sonus_exporter::binder::{LabelContext, bind};
use sonus_exporter::fanout::fan_out;
use sonus_exporter::walker::build_families;
use sonus_exporter::{MetricRegistry, ProbeError, ProbeHistory, ProbeKind, Prober};
use tracing_subscriber::prelude::*;

const SYSTEM: &str = r#"<system xmlns="http://sonusnet.com/ns/mibs/SONUS-SYSTEM-MIB/1.0"><admin><name>densbc01</name></admin></system>"#;

const CONTEXTS: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <addressContext><name>default</name><zone><name>EXT</name></zone><zone><name>INT</name></zone></addressContext>
  <addressContext><name>core</name><zone><name>CORE</name></zone></addressContext>
</collection>"#;

const SERVERS: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <serverStatus><name>densbc01a</name><hwType>SBC 5400</hwType><serialNum>1234</serialNum><applicationVersion>V08.01.00</applicationVersion></serverStatus>
</collection>"#;

const FANS: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <fanStatus><serverName>densbc01a</serverName><fanId>FAN1/BOT</fanId><speed>5632 RPM</speed></fanStatus>
  <fanStatus><serverName>densbc01a</serverName><fanId>FAN2/BOT</fanId><speed>unknown</speed></fanStatus>
</collection>"#;

const POWER: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <powerSupplyStatus><serverName>densbc01a</serverName><powerSupplyId>PSA</powerSupplyId><present>true</present><powerFault>false</powerFault><voltageFault>true</voltageFault></powerSupplyStatus>
</collection>"#;

const DSP: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <dspUsage><slot1ResourcesUtilized>68</slot1ResourcesUtilized><compressionTotal>2048</compressionTotal><compressionUtilization>12</compressionUtilization><g711Utilization>7</g711Utilization></dspUsage>
</collection>"#;

const TRUNK_GROUPS: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <globalTrunkGroupStatus><name>TG1</name><state>inService</state><zone>EXT</zone><inboundCallsUsage>4</inboundCallsUsage><outboundCallsUsage>2</outboundCallsUsage><totalCallsConfigured>100</totalCallsConfigured><bwInboundUsage>640</bwInboundUsage><bwOutboundUsage>320</bwOutboundUsage><packetOutDetectState>normal</packetOutDetectState></globalTrunkGroupStatus>
</collection>"#;

const SIP: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <sipCurrentStatistics><name>TG1</name><sndInvite>80</sndInvite><rcvInvite>120</rcvInvite><rcv18x>40</rcv18x></sipCurrentStatistics>
</collection>"#;

const CALLS: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <callCurrentStatistics><name>TG1</name><inUsage>3</inUsage><outCalls>9</outCalls></callCurrentStatistics>
</collection>"#;

const ZONE_STATUS: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <zoneStatus><name>EXT</name><inboundCallsUsage>5</inboundCallsUsage><outboundCallsUsage>6</outboundCallsUsage><totalCallsConfigured>500</totalCallsConfigured></zoneStatus>
</collection>"#;

const ZONES: &str = r#"<collection xmlns:y="http://tail-f.com/ns/rest">
  <zone><name>EXT</name><id>2</id><sipCurrentStatistics><name>TG1</name><rcvInvite>120</rcvInvite></sipCurrentStatistics></zone>
</collection>"#;

fn xml(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

fn device_router(sip_delay: Duration) -> Router {
    Router::new()
        .route("/api/config/system", get(|| async { xml(SYSTEM) }))
        .route("/api/config/addressContext/", get(|| async { xml(CONTEXTS) }))
        .route(
            "/api/operational/system/serverStatus/",
            get(|| async { xml(SERVERS) }),
        )
        .route(
            "/api/operational/system/fanStatus/",
            get(|| async { xml(FANS) }),
        )
        .route(
            "/api/operational/system/powerSupplyStatus/",
            get(|| async { xml(POWER) }),
        )
        .route(
            "/api/operational/system/dspStatus/dspUsage/",
            get(|| async { xml(DSP) }),
        )
        .route(
            "/api/operational/global/globalTrunkGroupStatus/",
            get(|| async { xml(TRUNK_GROUPS) }),
        )
        .route(
            "/api/operational/addressContext/:ctx/zoneStatus/",
            get(|Path(_ctx): Path<String>| async { xml(ZONE_STATUS) }),
        )
        .route(
            "/api/operational/addressContext/:ctx/zone/",
            get(|Path(_ctx): Path<String>| async { xml(ZONES) }),
        )
        .route(
            "/api/operational/addressContext/:ctx/zone/:zone/sipCurrentStatistics/",
            get(move |Path((_ctx, _zone)): Path<(String, String)>| async move {
                tokio::time::sleep(sip_delay).await;
                xml(SIP)
            }),
        )
        .route(
            "/api/operational/addressContext/:ctx/zone/:zone/callCurrentStatistics/",
            get(|Path((_ctx, _zone)): Path<(String, String)>| async { xml(CALLS) }),
        )
}

/// Serve `router` on an ephemeral port and return `host:port`.
async fn spawn_device(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr.to_string()
}

fn prober(kinds: Vec<ProbeKind>, history: Arc<ProbeHistory>) -> Prober {
    let options = ClientOptions {
        scheme: "http".to_string(),
        accept_invalid_certs: true,
        connect_timeout: Duration::from_secs(2),
        retry: RetryPolicy::immediate(3),
    };
    Prober::new(options, Credentials::new("admin", "pw"), kinds, 3, history)
}

#[tokio::test]
async fn test_full_probe_collects_every_kind() {
    let target = spawn_device(device_router(Duration::ZERO)).await;
    let history = Arc::new(ProbeHistory::new(10));

    let outcome = prober(ProbeKind::ALL.to_vec(), history.clone())
        .probe(&target, Duration::from_secs(10))
        .await
        .unwrap();

    assert!(outcome.success, "probe failed: {:?}", outcome.error);
    let metrics = &outcome.metrics;

    assert!(metrics.contains("probe_success 1\n"));
    assert!(metrics.contains(
        "sonus_info{hwType=\"SBC 5400\",serial=\"1234\",server=\"densbc01a\",system=\"densbc01\",version=\"V08.01.00\"} 1\n"
    ));
    assert!(metrics.contains("sonus_fan_speed{system=\"densbc01\",server=\"densbc01a\",fanID=\"FAN1/BOT\"} 5632\n"));
    assert!(!metrics.contains("FAN2/BOT"));
    assert!(metrics.contains(
        "sonus_powersupply_voltagefault{system=\"densbc01\",server=\"densbc01a\",powerSupplyID=\"PSA\"} 1\n"
    ));
    assert!(metrics.contains("sonus_dsp_resources_used{system=\"densbc01\",slot=\"1\"} 68\n"));
    assert!(metrics.contains("sonus_dsp_codec_utilization{system=\"densbc01\",codec=\"G.711\"} 7\n"));
    assert!(metrics.contains(
        "sonus_TG_bytes{system=\"densbc01\",zone=\"EXT\",name=\"TG1\",direction=\"inbound\"} 640\n"
    ));
    assert!(metrics.contains("sonus_TG_state{system=\"densbc01\",zone=\"EXT\",name=\"TG1\"} 1\n"));
    assert!(metrics.contains("# TYPE sonus_TG_sip_req_sent counter\n"));
    assert!(metrics.contains(
        "sonus_TG_sip_req_sent{system=\"densbc01\",zone=\"INT\",name=\"TG1\",method=\"INVITE\"} 80\n"
    ));
    assert!(metrics.contains(
        "sonus_TG_sip_resp_recv{system=\"densbc01\",zone=\"CORE\",name=\"TG1\",code=\"18x\"} 40\n"
    ));
    assert!(metrics.contains(
        "sonus_TG_calls_InUsage{system=\"densbc01\",addresscontext=\"default\",zone=\"EXT\",name=\"TG1\"} 3\n"
    ));
    assert!(metrics.contains(
        "sonus_zone_usage_total{system=\"densbc01\",direction=\"outbound\",addresscontext=\"core\",zone=\"EXT\"} 6\n"
    ));
    assert!(metrics.contains(
        "sonus_Zone_SipCurrentStatistics_RcvInvite{system=\"densbc01\",addresscontext=\"default\",zone=\"EXT\",name=\"TG1\"} 120\n"
    ));

    let entries = history.entries(&target);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].success);
}

#[tokio::test]
async fn test_sip_series_cover_every_leaf() {
    let target = spawn_device(device_router(Duration::ZERO)).await;

    let outcome = prober(vec![ProbeKind::Sip], Arc::new(ProbeHistory::default()))
        .probe(&target, Duration::from_secs(10))
        .await
        .unwrap();

    assert!(outcome.success);
    let invites = outcome
        .metrics
        .lines()
        .filter(|line| line.starts_with("sonus_TG_sip_req_recv{") && line.contains("method=\"INVITE\""))
        .count();
    assert_eq!(invites, 3);
}

#[tokio::test]
async fn test_deadline_fails_the_probe() {
    let target = spawn_device(device_router(Duration::from_secs(5))).await;

    let outcome = prober(vec![ProbeKind::Sip], Arc::new(ProbeHistory::default()))
        .probe(&target, Duration::from_millis(500))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert!(outcome.duration < Duration::from_secs(3));
    assert!(outcome.metrics.contains("probe_success 0\n"));
    let error = outcome.error.unwrap();
    assert!(error.contains("did not complete within"), "{}", error);
}

#[tokio::test]
async fn test_debug_bundle_contains_captured_log() {
    let _guard = tracing_subscriber::registry()
        .with(CaptureLayer::new())
        .set_default();
    let target = spawn_device(device_router(Duration::ZERO)).await;

    let outcome = prober(vec![ProbeKind::Fans], Arc::new(ProbeHistory::default()))
        .probe(&target, Duration::from_secs(10))
        .await
        .unwrap();

    let text = &outcome.debug_text;
    assert!(text.starts_with("Logs for the probe:\n"));
    assert!(text.contains("msg=\"Beginning probe\""));
    assert!(text.contains("module=sonus"));
    assert!(text.contains("msg=\"Failed to convert fan speed to rpm\""));
    assert!(text.contains("msg=\"Probe succeeded\""));
    assert!(text.contains("duration_seconds="));
    assert!(text.contains("\n\n\nMetrics that would have been returned:\n"));
    assert!(text.ends_with(&outcome.metrics));
}

sonus_client::record! {
    struct PeerCounters {
        name: name => "name",
        calls: numeric => "calls" as "Calls",
        errors: numeric => "errors" as "Errors",
        retries: numeric => "retries" as "Retries",
    }
}

#[tokio::test]
async fn test_two_contexts_two_zones_bind_twelve_observations() {
    use sonus_client::Record;

    let registry = Arc::new(MetricRegistry::new());
    let families = Arc::new(build_families(&registry, "sonus_Peer", PeerCounters::schema()).unwrap());
    let leaves = vec![
        TopologyLeaf::new("default", "EXT"),
        TopologyLeaf::new("default", "INT"),
        TopologyLeaf::new("core", "A"),
        TopologyLeaf::new("core", "B"),
    ];

    let completed = fan_out(leaves, 3, |leaf| {
        let families = families.clone();
        async move {
            let record = PeerCounters {
                name: "TG1".to_string(),
                calls: 1.0,
                errors: 2.0,
                retries: 3.0,
            };
            let labels = LabelContext {
                system: "densbc01",
                address_context: &leaf.address_context,
                zone: &leaf.zone,
            };
            bind(&record, "sonus_Peer", &families, &labels)?;
            Ok::<(), ProbeError>(())
        }
    })
    .await
    .unwrap();

    assert_eq!(completed, 4);
    assert_eq!(registry.family_count(), 3);
    assert_eq!(registry.series_count(), 12);
}
