//! One probe invocation against one device.
//!
//! A probe owns a fresh registry and a capture buffer. It connects to the
//! device, runs every configured kind concurrently under one deadline and
//! always reports `probe_success` and `probe_duration_seconds`, whatever
//! happened before.

use std::sync::Arc;
use std::time::Duration;

use sonus_client::{ClientOptions, Credentials, DeviceSession};
use sonus_common::CaptureBuffer;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::config::ExporterConfig;
use crate::error::{ProbeError, Result};
use crate::history::ProbeHistory;
use crate::mapping::MetricType;
use crate::probes::{ProbeContext, ProbeKind};
use crate::registry::{MetricRegistry, SharedRegistry};

/// Module name recorded in history and stamped on captured lines.
pub const MODULE: &str = "sonus";

/// Header carrying the scraper's timeout in seconds.
pub const TIMEOUT_HEADER: &str = "X-Prometheus-Scrape-Timeout-Seconds";

/// Time budget of a probe.
///
/// A missing or zero `requested` budget falls back to `default_secs`; the
/// offset is then subtracted. A budget that ends up non-positive is an error.
pub fn effective_timeout(requested: Option<f64>, default_secs: f64, offset_secs: f64) -> Result<Duration> {
    let budget = match requested {
        Some(secs) if secs != 0.0 => secs,
        _ => default_secs,
    };
    let seconds = budget - offset_secs;
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(ProbeError::InvalidTimeout { seconds });
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| ProbeError::InvalidTimeout { seconds })
}

/// Plain-text bundle of a probe's captured log and rendered metrics.
pub fn debug_output(log: &str, metrics: &str) -> String {
    let mut out = String::with_capacity(log.len() + metrics.len() + 80);
    out.push_str("Logs for the probe:\n");
    out.push_str(log);
    out.push_str("\n\n\nMetrics that would have been returned:\n");
    out.push_str(metrics);
    out
}

/// Result of one probe.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub success: bool,
    pub duration: Duration,
    /// Rendered exposition text.
    pub metrics: String,
    pub debug_text: String,
    pub history_id: u64,
    /// First failure, when the probe did not succeed.
    pub error: Option<String>,
}

/// Runs probes with fixed device settings and records their results.
#[derive(Debug, Clone)]
pub struct Prober {
    options: ClientOptions,
    credentials: Credentials,
    kinds: Vec<ProbeKind>,
    leaf_concurrency: usize,
    history: Arc<ProbeHistory>,
}

impl Prober {
    pub fn new(
        options: ClientOptions,
        credentials: Credentials,
        kinds: Vec<ProbeKind>,
        leaf_concurrency: usize,
        history: Arc<ProbeHistory>,
    ) -> Self {
        Self {
            options,
            credentials,
            kinds,
            leaf_concurrency,
            history,
        }
    }

    pub fn from_config(config: &ExporterConfig, history: Arc<ProbeHistory>) -> Self {
        Self::new(
            config.client_options(),
            config.credentials(),
            config.probes.kinds.clone(),
            config.probes.leaf_concurrency,
            history,
        )
    }

    pub fn history(&self) -> &Arc<ProbeHistory> {
        &self.history
    }

    /// Probe `target` within `timeout`.
    ///
    /// Device failures are reported through the outcome; an error is returned
    /// only when the fixed probe families cannot be recorded.
    pub async fn probe(&self, target: &str, timeout: Duration) -> Result<ProbeOutcome> {
        let registry: SharedRegistry = Arc::new(MetricRegistry::new());
        let success_gauge = registry.register(
            "probe_success",
            "Displays whether or not the probe was a success",
            MetricType::Gauge,
            &[],
        )?;
        let duration_gauge = registry.register(
            "probe_duration_seconds",
            "Returns how long the probe took to complete in seconds",
            MetricType::Gauge,
            &[],
        )?;

        let capture = CaptureBuffer::with_context([("module", MODULE), ("target", target)]);
        let span = info_span!("probe", device = %target);
        if !capture.attach(&span) {
            debug!(device = %target, "Probe log capture unavailable");
        }

        info!(device = %target, "Starting probe");
        let start = Instant::now();
        let result = self
            .run(target, timeout, registry.clone())
            .instrument(span.clone())
            .await;
        let duration = start.elapsed();
        let success = result.is_ok();

        span.in_scope(|| match &result {
            Ok(()) => info!("Probe succeeded"),
            Err(e) => error!(err = %e, "Probe failed"),
        });
        success_gauge.set(&[], if success { 1.0 } else { 0.0 })?;
        duration_gauge.set(&[], duration.as_secs_f64())?;
        span.in_scope(|| info!(duration_seconds = duration.as_secs_f64(), "Probe finished"));

        let metrics = registry.render();
        let debug_text = debug_output(&capture.contents(), &metrics);
        let history_id = self.history.record(MODULE, target, success, debug_text.clone());
        info!(device = %target, success, "Probe complete");

        Ok(ProbeOutcome {
            success,
            duration,
            metrics,
            debug_text,
            history_id,
            error: result.err().map(|e| e.to_string()),
        })
    }

    async fn run(&self, target: &str, timeout: Duration, registry: SharedRegistry) -> Result<()> {
        info!(
            probe = MODULE,
            timeout_seconds = timeout.as_secs_f64(),
            "Beginning probe"
        );
        let deadline = Instant::now() + timeout;

        match tokio::time::timeout_at(deadline, self.run_kinds(target, registry, deadline)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::DeadlineExceeded {
                seconds: timeout.as_secs_f64(),
            }),
        }
    }

    async fn run_kinds(&self, target: &str, registry: SharedRegistry, deadline: Instant) -> Result<()> {
        let session = DeviceSession::connect(
            target,
            self.credentials.clone(),
            &self.options,
            Some(deadline),
        )
        .await?;
        let ctx = ProbeContext::new(session, registry, self.leaf_concurrency);

        let mut tasks = JoinSet::new();
        for &kind in &self.kinds {
            let ctx = ctx.clone();
            tasks.spawn(async move { (kind, kind.run(ctx).await) }.in_current_span());
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let err = match joined {
                Ok((kind, Ok(()))) => {
                    debug!(kind = %kind, "Probe kind finished");
                    continue;
                }
                Ok((kind, Err(e))) => {
                    warn!(kind = %kind, error = %e, "Probe kind failed");
                    e
                }
                Err(e) => {
                    warn!(error = %e, "Probe kind task failed");
                    ProbeError::Task(e)
                }
            };
            if first_error.is_none() {
                first_error = Some(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
