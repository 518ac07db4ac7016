//! Current conditions from a BloomSky weather station.
//!
//! [`Station::observe`] fetches the skydata payload (retrying a fixed number of
//! times), decodes it through the vendor key table in [`schema`], and fills in
//! the metric units. [`decode_snapshot`] runs the same decoding on bytes already
//! in hand.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

pub mod decode;
pub mod errors;
pub mod fetch;
pub mod logging;
pub mod metrics;
pub mod rounding;
pub mod schema;
pub mod snapshot;
pub mod station;
pub mod units;

pub use decode::{decode_snapshot, decode_snapshot_at};
pub use fetch::{fetch_with_retry, Fetched, Headers, HttpTransport, RetryPolicy, Transport};
pub use snapshot::Snapshot;
pub use station::{Observation, Station};
