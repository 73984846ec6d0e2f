//! Sonus SBC client
//!
//! Typed access to the REST management API of a Sonus session border
//! controller.
//!
//! # Overview
//!
//! - [`DeviceSession`] discovers a device's system name and topology once and
//!   exposes a single typed `fetch` operation
//! - [`Fetcher`] performs the authenticated call with jitter, retry on
//!   "not ready" answers and structured error decoding
//! - [`record!`] declares wire records together with a static [`RecordSchema`]
//!   the exporter walks to derive metric families
//! - [`records`] holds the wire shapes of every endpoint the exporter reads
//!
//! # Example
//!
//! ```ignore
//! use sonus_client::{ClientOptions, Credentials, DeviceSession, paths, records};
//!
//! let session = DeviceSession::connect(
//!     "10.0.0.1",
//!     Credentials::new("admin", "secret"),
//!     &ClientOptions::default(),
//!     None,
//! )
//! .await?;
//!
//! for leaf in session.topology().leaves() {
//!     let stats: records::SipStatisticsCollection = session
//!         .fetch(paths::SIP_STATISTICS, &[&leaf.address_context, &leaf.zone])
//!         .await?;
//! }
//! ```

extern crate self as sonus_client;

mod error;
mod fetch;
mod payload;
mod session;

pub mod paths;
pub mod records;
pub mod schema;

pub use error::{FetchError, FetchErrorKind, Result, SessionError};
pub use fetch::{ClientOptions, Credentials, Fetcher, RetryPolicy, expand_path};
pub use payload::{ErrorEntry, ErrorPayload, describe_error};
pub use schema::{FieldKind, FieldSchema, FieldValue, Record, RecordSchema};
pub use session::{AddressContext, DeviceSession, Topology, TopologyLeaf, Zone};
