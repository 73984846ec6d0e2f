//! Device session: identity and topology discovered once per probe.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{error, info};

use crate::error::{FetchError, SessionError};
use crate::fetch::{ClientOptions, Credentials, Fetcher};
use crate::paths;

#[derive(Debug, Default, Deserialize)]
struct SystemConfig {
    #[serde(default)]
    admin: SystemAdmin,
}

#[derive(Debug, Default, Deserialize)]
struct SystemAdmin {
    #[serde(default)]
    name: String,
}

/// A zone configured inside an address context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Zone {
    #[serde(default)]
    pub name: String,
}

/// A named address context and its zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressContext {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "zone", default)]
    pub zones: Vec<Zone>,
}

/// Address contexts of a device, in the order the device listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Topology {
    #[serde(rename = "addressContext", default)]
    contexts: Vec<AddressContext>,
}

/// One (address context, zone) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopologyLeaf {
    pub address_context: String,
    pub zone: String,
}

impl TopologyLeaf {
    pub fn new(address_context: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            address_context: address_context.into(),
            zone: zone.into(),
        }
    }
}

impl fmt::Display for TopologyLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address_context, self.zone)
    }
}

impl Topology {
    pub fn new(contexts: Vec<AddressContext>) -> Self {
        Self { contexts }
    }

    pub fn contexts(&self) -> &[AddressContext] {
        &self.contexts
    }

    /// Every (context, zone) pair, contexts first then zones, in device order.
    pub fn leaves(&self) -> Vec<TopologyLeaf> {
        self.contexts
            .iter()
            .flat_map(|ctx| {
                ctx.zones
                    .iter()
                    .map(move |zone| TopologyLeaf::new(&ctx.name, &zone.name))
            })
            .collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.contexts.iter().map(|ctx| ctx.zones.len()).sum()
    }
}

/// A connected device: its system name, topology and a fetcher bound to it.
///
/// Built fresh for every probe; nothing is shared between probes.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    target: String,
    system: String,
    topology: Topology,
    fetcher: Fetcher,
}

impl DeviceSession {
    /// Discover the device's identity and topology.
    ///
    /// Both discovery calls go through the fetcher, so they honour the retry
    /// policy and `deadline`.
    pub async fn connect(
        target: &str,
        credentials: Credentials,
        options: &ClientOptions,
        deadline: Option<Instant>,
    ) -> Result<Self, SessionError> {
        let mut fetcher =
            Fetcher::new(target, credentials, options).map_err(|source| SessionError::Setup {
                device: target.to_string(),
                source,
            })?;
        if let Some(deadline) = deadline {
            fetcher = fetcher.with_deadline(deadline);
        }

        let system: SystemConfig = fetcher
            .fetch(paths::SYSTEM_INFO, &[])
            .await
            .map_err(|source| {
                error!(device = %target, error = %source, "Failed to read system identity");
                SessionError::Identity {
                    device: target.to_string(),
                    source,
                }
            })?;

        let topology: Topology = fetcher
            .fetch(paths::ADDRESS_CONTEXTS, &[])
            .await
            .map_err(|source| {
                error!(device = %target, error = %source, "Failed to read address contexts");
                SessionError::Topology {
                    device: target.to_string(),
                    source,
                }
            })?;

        info!(
            device = %target,
            system = %system.admin.name,
            contexts = topology.contexts.len(),
            zones = topology.leaf_count(),
            "Connected to device"
        );

        Ok(Self {
            target: target.to_string(),
            system: system.admin.name,
            topology,
            fetcher,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// System name reported by the device.
    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Fetch and decode a record from this device.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        template: &str,
        args: &[&str],
    ) -> Result<T, FetchError> {
        self.fetcher.fetch(template, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXTS: &str = r#"
        <collection xmlns:y="http://tail-f.com/ns/rest">
          <addressContext xmlns="http://sonusnet.com/ns/mibs/SONUS-ADDRESS-CONTEXT/1.0">
            <name>default</name>
            <dnsGroup><name>DNS1</name></dnsGroup>
            <zone><name>EXT</name><id>2</id></zone>
            <zone><name>INT</name><id>3</id></zone>
          </addressContext>
          <addressContext>
            <name>lab</name>
          </addressContext>
          <addressContext>
            <name>core</name>
            <zone><name>CORE1</name></zone>
          </addressContext>
        </collection>
    "#;

    #[test]
    fn test_topology_decodes_contexts_and_zones() {
        let topology: Topology = quick_xml::de::from_str(CONTEXTS).unwrap();

        assert_eq!(topology.contexts().len(), 3);
        assert_eq!(topology.contexts()[0].name, "default");
        assert_eq!(topology.contexts()[0].zones.len(), 2);
        assert!(topology.contexts()[1].zones.is_empty());
    }

    #[test]
    fn test_leaves_in_device_order() {
        let topology: Topology = quick_xml::de::from_str(CONTEXTS).unwrap();
        let leaves: Vec<String> = topology.leaves().iter().map(|l| l.to_string()).collect();

        assert_eq!(leaves, vec!["default/EXT", "default/INT", "core/CORE1"]);
        assert_eq!(topology.leaf_count(), 3);
    }

    #[test]
    fn test_system_name_decodes() {
        let xml = r#"<system><admin><name>densbc01</name><utilMonitorStatsInterval>15</utilMonitorStatsInterval></admin><serverAdmin><name>densbc01a</name></serverAdmin></system>"#;
        let system: SystemConfig = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(system.admin.name, "densbc01");
    }

    #[test]
    fn test_empty_topology() {
        let topology = Topology::default();
        assert!(topology.leaves().is_empty());
    }
}
