use crate::decode::decode_snapshot;
use crate::errors::*;
use crate::fetch::{fetch_with_retry, HttpTransport, RetryPolicy, Transport};
use crate::snapshot::Snapshot;
use crate::units;

/// A snapshot and how it was obtained.
#[derive(Debug)]
pub struct Observation {
    pub snapshot: Snapshot,
    pub attempts: u32,
    /// False when every fetch attempt failed and `snapshot` is the zero record.
    pub fresh: bool,
}

/// One remote station: where it lives and how to reach it.
///
/// Holds no observation state; every call fetches and decodes from scratch.
pub struct Station<T = HttpTransport> {
    url: String,
    token: String,
    transport: T,
    policy: RetryPolicy,
}

impl Station<HttpTransport> {
    pub fn new(url: &str, token: &str) -> Result<Station<HttpTransport>> {
        Ok(Station::with_transport(url, token, HttpTransport::new()?))
    }
}

impl<T: Transport> Station<T> {
    pub fn with_transport(url: &str, token: &str, transport: T) -> Station<T> {
        Station {
            url: url.to_string(),
            token: token.to_string(),
            transport,
            policy: RetryPolicy::default(),
        }
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Station<T> {
        self.policy = policy;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and decodes the current snapshot.
    ///
    /// Only a payload that does not decode is an error. When the station cannot
    /// be reached at all the result is the zero record, with `fresh` unset.
    pub fn observe(&self) -> Result<Observation> {
        let fetched = fetch_with_retry(&self.transport, &self.url, &self.token, &self.policy);
        match fetched.body {
            Some(body) => Ok(Observation {
                snapshot: decode_snapshot(&body)?,
                attempts: fetched.attempts,
                fresh: true,
            }),
            None => {
                warn!("No data from {}, carrying on with an empty snapshot", self.url);
                let mut snapshot = Snapshot::default();
                units::derive(&mut snapshot);
                Ok(Observation {
                    snapshot,
                    attempts: fetched.attempts,
                    fresh: false,
                })
            }
        }
    }

    pub fn fetch_snapshot(&self) -> Result<Snapshot> {
        self.observe().map(|observation| observation.snapshot)
    }
}
