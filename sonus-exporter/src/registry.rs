//! Per-probe metric registry rendered in the Prometheus text format.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::error::RegistryError;
use crate::mapping::MetricType;

/// A named metric with a fixed label schema and its observed series.
#[derive(Debug)]
pub struct MetricFamily {
    name: String,
    help: String,
    metric_type: MetricType,
    label_names: Vec<String>,
    /// Series keyed by label values, in declared label order.
    series: Mutex<BTreeMap<Vec<String>, f64>>,
}

impl MetricFamily {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Set the series identified by `labels` to `value`.
    pub fn set(&self, labels: &[&str], value: f64) -> Result<(), RegistryError> {
        let key = self.key(labels)?;
        self.series.lock().insert(key, value);
        Ok(())
    }

    /// Add `value` to the series identified by `labels`, starting from zero.
    pub fn add(&self, labels: &[&str], value: f64) -> Result<(), RegistryError> {
        let key = self.key(labels)?;
        *self.series.lock().entry(key).or_insert(0.0) += value;
        Ok(())
    }

    /// Current value of a series.
    pub fn get(&self, labels: &[&str]) -> Option<f64> {
        let key: Vec<String> = labels.iter().map(|v| v.to_string()).collect();
        self.series.lock().get(&key).copied()
    }

    pub fn series_count(&self) -> usize {
        self.series.lock().len()
    }

    fn key(&self, labels: &[&str]) -> Result<Vec<String>, RegistryError> {
        if labels.len() != self.label_names.len() {
            return Err(RegistryError::LabelArity {
                name: self.name.clone(),
                expected: self.label_names.len(),
                got: labels.len(),
            });
        }
        Ok(labels.iter().map(|v| v.to_string()).collect())
    }

    fn render_into(&self, output: &mut String) {
        let series = self.series.lock();
        if series.is_empty() {
            return;
        }

        writeln!(output, "# HELP {} {}", self.name, escape_help(&self.help)).ok();
        writeln!(output, "# TYPE {} {}", self.name, self.metric_type.as_str()).ok();
        for (values, value) in series.iter() {
            writeln!(
                output,
                "{}{} {}",
                self.name,
                format_labels(&self.label_names, values),
                format_value(*value)
            )
            .ok();
        }
    }
}

/// Registry of metric families for one probe invocation.
///
/// Each name can be registered once; the family handle is then shared by
/// every task observing into it.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    families: RwLock<HashMap<String, Arc<MetricFamily>>>,
}

/// Create a shareable registry handle.
pub type SharedRegistry = Arc<MetricRegistry>;

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new family.
    pub fn register(
        &self,
        name: impl Into<String>,
        help: impl Into<String>,
        metric_type: MetricType,
        label_names: &[&str],
    ) -> Result<Arc<MetricFamily>, RegistryError> {
        let name = name.into();
        let mut families = self.families.write();
        if families.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }

        let family = Arc::new(MetricFamily {
            name: name.clone(),
            help: help.into(),
            metric_type,
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            series: Mutex::new(BTreeMap::new()),
        });
        trace!(metric = %name, labels = label_names.len(), "Registered metric family");
        families.insert(name, family.clone());
        Ok(family)
    }

    /// Look up a registered family.
    pub fn family(&self, name: &str) -> Option<Arc<MetricFamily>> {
        self.families.read().get(name).cloned()
    }

    pub fn family_count(&self) -> usize {
        self.families.read().len()
    }

    /// Total series across all families.
    pub fn series_count(&self) -> usize {
        self.families
            .read()
            .values()
            .map(|family| family.series_count())
            .sum()
    }

    /// Render every family with at least one series, sorted by name.
    pub fn render(&self) -> String {
        let families = self.families.read();
        let mut names: Vec<&String> = families.keys().collect();
        names.sort();

        let mut output = String::with_capacity(families.len() * 128);
        for name in names {
            families[name].render_into(&mut output);
        }
        output
    }
}

/// Escape special characters in label values.
fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// HELP lines escape backslashes and newlines only.
fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a floating point value for Prometheus.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Format labels for Prometheus exposition format.
fn format_labels(names: &[String], values: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect();

    format!("{{{}}}", parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_set() {
        let registry = MetricRegistry::new();
        let family = registry
            .register("sonus_fan_speed", "Current speed of fans, in RPM", MetricType::Gauge, &["system", "server", "fanID"])
            .unwrap();

        family.set(&["sbc01", "sbc01a", "FAN1/BOT"], 5632.0).unwrap();

        assert_eq!(family.get(&["sbc01", "sbc01a", "FAN1/BOT"]), Some(5632.0));
        assert_eq!(registry.family_count(), 1);
        assert_eq!(registry.series_count(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = MetricRegistry::new();
        registry
            .register("probe_success", "first", MetricType::Gauge, &[])
            .unwrap();

        let err = registry
            .register("probe_success", "second", MetricType::Gauge, &[])
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "probe_success".to_string()
            }
        );
        assert_eq!(registry.family("probe_success").unwrap().help(), "first");
    }

    #[test]
    fn test_label_arity_enforced() {
        let registry = MetricRegistry::new();
        let family = registry
            .register("sonus_dsp_resources_used", "h", MetricType::Gauge, &["system", "slot"])
            .unwrap();

        let err = family.set(&["sbc01"], 1.0).unwrap_err();

        assert!(matches!(
            err,
            RegistryError::LabelArity {
                expected: 2,
                got: 1,
                ..
            }
        ));
        assert_eq!(family.series_count(), 0);
    }

    #[test]
    fn test_counter_add_accumulates() {
        let registry = MetricRegistry::new();
        let family = registry
            .register("sonus_TG_sip_req_sent", "h", MetricType::Counter, &["method"])
            .unwrap();

        family.add(&["INVITE"], 3.0).unwrap();
        family.add(&["INVITE"], 4.0).unwrap();

        assert_eq!(family.get(&["INVITE"]), Some(7.0));
    }

    #[test]
    fn test_render_sorted_with_help_and_type() {
        let registry = MetricRegistry::new();
        let b = registry
            .register("b_metric", "Second\nline", MetricType::Counter, &["name"])
            .unwrap();
        let a = registry
            .register("a_metric", "First", MetricType::Gauge, &[])
            .unwrap();
        b.add(&["TG \"1\""], 2.0).unwrap();
        a.set(&[], 0.25).unwrap();

        let output = registry.render();

        assert_eq!(
            output,
            "# HELP a_metric First\n\
             # TYPE a_metric gauge\n\
             a_metric 0.25\n\
             # HELP b_metric Second\\nline\n\
             # TYPE b_metric counter\n\
             b_metric{name=\"TG \\\"1\\\"\"} 2\n"
        );
    }

    #[test]
    fn test_render_skips_empty_families() {
        let registry = MetricRegistry::new();
        registry
            .register("unused", "h", MetricType::Gauge, &["a"])
            .unwrap();
        assert_eq!(registry.render(), "");
    }

    #[test]
    fn test_escape_label_value() {
        assert_eq!(escape_label_value("simple"), "simple");
        assert_eq!(escape_label_value("with\"quote"), "with\\\"quote");
        assert_eq!(escape_label_value("with\\backslash"), "with\\\\backslash");
        assert_eq!(escape_label_value("with\nnewline"), "with\\nnewline");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.5), "3.5");
        assert_eq!(format_value(-1.0), "-1");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    }
}
