//! Prometheus multi-target exporter for Sonus session border controllers.
//!
//! Every scrape of `/probe?target=…` connects to one device, discovers its
//! system name and zone topology, runs the configured probe kinds against it
//! and answers with the metrics of that single run.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ HTTP /probe│──>│    Prober    │──>│ probe kinds │──>│   fan-out    │
//! │  (axum)    │   │ (deadline,   │   │ (server,    │   │ (per zone,   │
//! └────────────┘   │  capture)    │   │  sip, …)    │   │  bounded)    │
//!       ^          └──────┬───────┘   └──────┬──────┘   └──────┬───────┘
//!       │                 │                  v                 v
//!       │                 │           ┌─────────────┐   ┌──────────────┐
//!       └─────────────────┴───────────│  registry   │<──│ walker/binder│
//!          metrics or debug bundle    └─────────────┘   └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```bash
//! SONUS_USER=admin SONUS_PASSWORD=… sonus-exporter --config sonus.json5
//! ```
//!
//! # Configuration
//!
//! See [`config::ExporterConfig`] for configuration options.

pub mod binder;
pub mod config;
pub mod error;
pub mod fanout;
pub mod history;
pub mod http;
pub mod mapping;
pub mod probe;
pub mod probes;
pub mod registry;
pub mod walker;

pub use config::ExporterConfig;
pub use error::{BindError, ProbeError, RegistryError};
pub use history::{HistoryEntry, ProbeHistory};
pub use http::{HttpServer, TimeoutPolicy};
pub use probe::{ProbeOutcome, Prober};
pub use probes::ProbeKind;
pub use registry::{MetricFamily, MetricRegistry, SharedRegistry};
