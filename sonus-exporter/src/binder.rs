//! Value binder: observations from a record instance.
//!
//! Traverses an instance in the same order [`walk`](crate::walker::walk)
//! traverses its schema and sets each numeric leaf on the family of the same
//! name. The `name` label is the colon-joined chain of every `name` field met
//! on the way down, the current record's own included.

use sonus_client::{FieldKind, FieldSchema, FieldValue, Record};
use tracing::warn;

use crate::error::BindError;
use crate::mapping::{NAME_SEPARATOR, join_name};
use crate::walker::FamilyMap;

/// Fixed label values shared by every observation of one bind.
#[derive(Debug, Clone, Copy)]
pub struct LabelContext<'a> {
    pub system: &'a str,
    pub address_context: &'a str,
    pub zone: &'a str,
}

/// Outcome of a successful bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindSummary {
    /// Observations written.
    pub bound: usize,
    /// Derived names with no registered family.
    pub skipped: Vec<String>,
}

impl BindSummary {
    fn merge(&mut self, other: BindSummary) {
        self.bound += other.bound;
        self.skipped.extend(other.skipped);
    }
}

/// Bind every numeric leaf of `record` under `prefix`.
///
/// The whole record tree is checked against its schema before anything is
/// written, so a kind mismatch leaves no partial observations behind.
pub fn bind(
    record: &dyn Record,
    prefix: &str,
    families: &FamilyMap,
    labels: &LabelContext<'_>,
) -> Result<BindSummary, BindError> {
    check(record)?;
    bind_record(record, prefix, "", families, labels)
}

fn check(record: &dyn Record) -> Result<(), BindError> {
    let schema = record.record_schema();
    let values = record.fields();
    if values.len() != schema.fields.len() {
        return Err(BindError::FieldCount {
            record: schema.name,
            expected: schema.fields.len(),
            found: values.len(),
        });
    }

    for (field, value) in schema.fields.iter().zip(&values) {
        match (field.kind, value) {
            (FieldKind::Numeric, FieldValue::Numeric(_))
            | (FieldKind::Flag, FieldValue::Flag(_))
            | (FieldKind::Text, FieldValue::Text(_))
            | (FieldKind::Name, FieldValue::Name(_)) => {}
            (FieldKind::Nested(_), FieldValue::Nested(inner)) => check(*inner)?,
            (FieldKind::Repeated(_), FieldValue::Repeated(items)) => {
                for item in items {
                    check(*item)?;
                }
            }
            _ => return Err(mismatch(schema.name, field, value)),
        }
    }
    Ok(())
}

fn mismatch(record: &'static str, field: &FieldSchema, value: &FieldValue<'_>) -> BindError {
    BindError::KindMismatch {
        record,
        field: field.segment,
        expected: field.kind.as_str(),
        found: value.kind_str(),
    }
}

fn bind_record(
    record: &dyn Record,
    path: &str,
    parent_name: &str,
    families: &FamilyMap,
    labels: &LabelContext<'_>,
) -> Result<BindSummary, BindError> {
    let schema = record.record_schema();
    let values = record.fields();
    let name = composite_name(parent_name, &values);
    let mut summary = BindSummary::default();

    for (field, value) in schema.fields.iter().zip(&values) {
        match value {
            FieldValue::Numeric(v) => {
                let metric = join_name(path, field.segment);
                match families.get(&metric) {
                    Some(family) => {
                        family.set(
                            &[labels.system, labels.address_context, labels.zone, name.as_str()],
                            *v,
                        )?;
                        summary.bound += 1;
                    }
                    None => {
                        warn!(metric = %metric, "Could not find metric");
                        summary.skipped.push(metric);
                    }
                }
            }
            FieldValue::Nested(inner) => {
                let path = join_name(path, field.segment);
                summary.merge(bind_record(*inner, &path, &name, families, labels)?);
            }
            FieldValue::Repeated(items) => {
                let path = join_name(path, field.segment);
                for item in items {
                    summary.merge(bind_record(*item, &path, &name, families, labels)?);
                }
            }
            FieldValue::Flag(_) | FieldValue::Text(_) | FieldValue::Name(_) => {}
        }
    }
    Ok(summary)
}

fn composite_name(parent: &str, values: &[FieldValue<'_>]) -> String {
    let mut name = parent.to_string();
    for value in values {
        if let FieldValue::Name(own) = value {
            if !name.is_empty() {
                name.push(NAME_SEPARATOR);
            }
            name.push_str(own);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::SERIES_LABELS;
    use crate::registry::MetricRegistry;
    use crate::walker::{build_families, walk};
    use sonus_client::RecordSchema;

    sonus_client::record! {
        struct Counters {
            name: name => "name",
            calls: numeric => "calls" as "Calls",
            errors: numeric => "errors" as "Errors",
        }
    }

    sonus_client::record! {
        struct Trunk {
            name: name => "name",
            state: text => "state",
            usage: numeric => "usage" as "Usage",
            totals: nested(Counters) => "totals" as "Totals",
            peers: repeated(Counters) => "peer" as "Peer",
        }
    }

    const CTX: LabelContext<'static> = LabelContext {
        system: "sbc01",
        address_context: "default",
        zone: "EXT",
    };

    fn trunk() -> Trunk {
        Trunk {
            name: "TG1".to_string(),
            state: "inService".to_string(),
            usage: 4.0,
            totals: Counters {
                name: "all".to_string(),
                calls: 10.0,
                errors: 1.0,
            },
            peers: vec![
                Counters {
                    name: "p1".to_string(),
                    calls: 6.0,
                    errors: 0.0,
                },
                Counters {
                    name: "p2".to_string(),
                    calls: 4.0,
                    errors: 1.0,
                },
            ],
        }
    }

    #[test]
    fn test_bind_sets_every_leaf() {
        let registry = MetricRegistry::new();
        let families = build_families(&registry, "sonus_TG", Trunk::schema()).unwrap();

        let summary = bind(&trunk(), "sonus_TG", &families, &CTX).unwrap();

        assert_eq!(summary.bound, 7);
        assert!(summary.skipped.is_empty());
        assert_eq!(
            families["sonus_TG_Usage"].get(&["sbc01", "default", "EXT", "TG1"]),
            Some(4.0)
        );
        assert_eq!(
            families["sonus_TG_Totals_Calls"].get(&["sbc01", "default", "EXT", "TG1:all"]),
            Some(10.0)
        );
        assert_eq!(
            families["sonus_TG_Peer_Errors"].get(&["sbc01", "default", "EXT", "TG1:p2"]),
            Some(1.0)
        );
    }

    #[test]
    fn test_bind_visits_exactly_the_walked_leaves() {
        let registry = MetricRegistry::new();
        let families = build_families(&registry, "sonus_TG", Trunk::schema()).unwrap();
        let mut single = trunk();
        single.peers.truncate(1);

        bind(&single, "sonus_TG", &families, &CTX).unwrap();

        let walked: Vec<String> = walk("sonus_TG", Trunk::schema())
            .into_iter()
            .map(|d| d.name)
            .collect();
        let mut observed: Vec<String> = walked
            .iter()
            .filter(|name| families[*name].series_count() == 1)
            .cloned()
            .collect();
        observed.sort();
        let mut expected = walked.clone();
        expected.sort();
        assert_eq!(observed, expected);
    }

    #[test]
    fn test_missing_family_is_skipped() {
        let registry = MetricRegistry::new();
        let mut families = build_families(&registry, "sonus_TG", Trunk::schema()).unwrap();
        families.remove("sonus_TG_Totals_Errors");

        let summary = bind(&trunk(), "sonus_TG", &families, &CTX).unwrap();

        assert_eq!(summary.bound, 6);
        assert_eq!(summary.skipped, vec!["sonus_TG_Totals_Errors".to_string()]);
    }

    #[test]
    fn test_composite_name_without_parent() {
        let values = [FieldValue::Text("x"), FieldValue::Name("TG1")];
        assert_eq!(composite_name("", &values), "TG1");
        assert_eq!(composite_name("zone", &values), "zone:TG1");
        assert_eq!(composite_name("zone", &[FieldValue::Numeric(1.0)]), "zone");
    }

    sonus_client::record! {
        struct NamedZone {
            name: name => "name",
            conns: repeated(sonus_client::records::SipSigConnStatus) => "sipSigConnStatus" as "SipSigConnStatus",
        }
    }

    #[test]
    fn test_connection_id_extends_composite_name() {
        let registry = MetricRegistry::new();
        let families = build_families(&registry, "sonus_Zone", NamedZone::schema()).unwrap();
        let conn = |id: &str, sent: f64| sonus_client::records::SipSigConnStatus {
            connection_id: id.to_string(),
            bytes_sent: sent,
            ..Default::default()
        };
        let zone = NamedZone {
            name: "EXT".to_string(),
            conns: vec![conn("7", 100.0), conn("9", 250.0)],
        };

        bind(&zone, "sonus_Zone", &families, &CTX).unwrap();

        let sent = &families["sonus_Zone_SipSigConnStatus_BytesSent"];
        assert_eq!(sent.get(&["sbc01", "default", "EXT", "EXT:7"]), Some(100.0));
        assert_eq!(sent.get(&["sbc01", "default", "EXT", "EXT:9"]), Some(250.0));
        assert_eq!(sent.series_count(), 2);
    }

    #[derive(Debug)]
    struct Drifted;

    impl Record for Drifted {
        fn schema() -> &'static RecordSchema {
            Counters::schema()
        }

        fn record_schema(&self) -> &'static RecordSchema {
            Counters::schema()
        }

        fn fields(&self) -> Vec<FieldValue<'_>> {
            vec![
                FieldValue::Name("bad"),
                FieldValue::Text("not a number"),
                FieldValue::Numeric(1.0),
            ]
        }
    }

    #[test]
    fn test_kind_mismatch_binds_nothing() {
        let registry = MetricRegistry::new();
        let families = build_families(&registry, "sonus_TG", Counters::schema()).unwrap();

        let err = bind(&Drifted, "sonus_TG", &families, &CTX).unwrap_err();

        assert!(matches!(
            err,
            BindError::KindMismatch {
                field: "Calls",
                expected: "numeric",
                found: "text",
                ..
            }
        ));
        assert_eq!(registry.series_count(), 0);
    }

    #[test]
    fn test_label_order_matches_family() {
        let registry = MetricRegistry::new();
        let families = build_families(&registry, "sonus_TG", Counters::schema()).unwrap();
        let labels: Vec<&str> = families["sonus_TG_Calls"]
            .label_names()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(labels, SERIES_LABELS);
    }
}
