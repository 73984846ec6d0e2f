//! Schema walker: metric families derived from a record schema.
//!
//! The walk is depth-first in declaration order. Every numeric leaf becomes
//! one gauge family named after its path (`prefix_Segment_..._Leaf`) and
//! labelled with [`SERIES_LABELS`]. Nested and repeated records extend the
//! path by their field segment; text, flag and name leaves yield nothing.

use std::collections::HashMap;
use std::sync::Arc;

use sonus_client::{FieldKind, RecordSchema};
use tracing::debug;

use crate::error::RegistryError;
use crate::mapping::{MetricType, SERIES_LABELS, help_for, join_name};
use crate::registry::{MetricFamily, MetricRegistry};

/// Families keyed by full metric name.
pub type FamilyMap = HashMap<String, Arc<MetricFamily>>;

/// Description of one family derived from a numeric leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: String,
    /// Segment of the leaf the family was derived from.
    pub segment: &'static str,
    pub help: &'static str,
}

/// Enumerate the families of `schema` without registering them.
pub fn walk(prefix: &str, schema: &'static RecordSchema) -> Vec<MetricDesc> {
    let mut out = Vec::with_capacity(schema.numeric_leaf_count());
    visit(prefix, schema, &mut out);
    out
}

fn visit(path: &str, schema: &'static RecordSchema, out: &mut Vec<MetricDesc>) {
    for field in schema.fields {
        match field.kind {
            FieldKind::Numeric => out.push(MetricDesc {
                name: join_name(path, field.segment),
                segment: field.segment,
                help: help_for(field.segment),
            }),
            FieldKind::Nested(inner) | FieldKind::Repeated(inner) => {
                visit(&join_name(path, field.segment), inner(), out);
            }
            FieldKind::Flag | FieldKind::Text | FieldKind::Name => {}
        }
    }
}

/// Register every family of `schema` into `registry`.
///
/// Fails on the first name that is already registered.
pub fn build_families(
    registry: &MetricRegistry,
    prefix: &str,
    schema: &'static RecordSchema,
) -> Result<FamilyMap, RegistryError> {
    let descs = walk(prefix, schema);
    let mut families = FamilyMap::with_capacity(descs.len());

    for desc in descs {
        let family = registry.register(&desc.name, desc.help, MetricType::Gauge, &SERIES_LABELS)?;
        families.insert(desc.name, family);
    }

    debug!(
        prefix = %prefix,
        record = schema.name,
        families = families.len(),
        "Registered record families"
    );
    Ok(families)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonus_client::Record;
    use sonus_client::records::{CallStatistics, ZoneStatistics};

    sonus_client::record! {
        struct Ingress {
            call_rate_max: numeric => "callRateMax" as "CallRateMax",
            enabled: flag => "enabled",
        }
    }

    sonus_client::record! {
        struct Group {
            name: name => "name",
            state: text => "state",
            in_calls: numeric => "inCalls" as "InCalls",
            ingress: nested(Ingress) => "ingress" as "Ingress",
            peers: repeated(Ingress) => "peer" as "Peer",
        }
    }

    #[test]
    fn test_walk_names_in_declaration_order() {
        let names: Vec<String> = walk("sonus_Zone", Group::schema())
            .into_iter()
            .map(|d| d.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "sonus_Zone_InCalls",
                "sonus_Zone_Ingress_CallRateMax",
                "sonus_Zone_Peer_CallRateMax",
            ]
        );
    }

    #[test]
    fn test_walk_is_idempotent() {
        assert_eq!(
            walk("sonus_Zone", ZoneStatistics::schema()),
            walk("sonus_Zone", ZoneStatistics::schema())
        );
    }

    #[test]
    fn test_help_from_table_or_segment() {
        let descs = walk("sonus_Zone", Group::schema());
        assert_eq!(
            descs[0].help,
            "The current number of completed inbound calls on this trunk group."
        );
        assert_eq!(descs[1].help, "CallRateMax");
    }

    #[test]
    fn test_build_families_registers_every_leaf() {
        let registry = MetricRegistry::new();
        let families =
            build_families(&registry, "sonus_TG_calls", CallStatistics::schema()).unwrap();

        assert_eq!(families.len(), CallStatistics::schema().numeric_leaf_count());
        assert_eq!(registry.family_count(), families.len());

        let family = &families["sonus_TG_calls_InUsage"];
        let labels: Vec<&str> = family.label_names().iter().map(String::as_str).collect();
        assert_eq!(labels, SERIES_LABELS);
        assert_eq!(family.metric_type(), MetricType::Gauge);
    }

    #[test]
    fn test_zone_record_names_are_unique() {
        let registry = MetricRegistry::new();
        let families = build_families(&registry, "sonus_Zone", ZoneStatistics::schema()).unwrap();
        assert_eq!(families.len(), ZoneStatistics::schema().numeric_leaf_count());
        assert!(families.contains_key("sonus_Zone_SipCurrentStatistics_RcvInvite"));
    }

    #[test]
    fn test_second_build_into_same_registry_fails() {
        let registry = MetricRegistry::new();
        build_families(&registry, "sonus_Zone", Group::schema()).unwrap();

        let err = build_families(&registry, "sonus_Zone", Group::schema()).unwrap_err();

        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "sonus_Zone_InCalls".to_string()
            }
        );
    }
}
