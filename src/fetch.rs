//! Network side of the pipeline: one HTTP GET, retried a fixed number of times.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::errors::*;

/// Header name to values, as handed to a [`Transport`].
pub type Headers = BTreeMap<String, Vec<String>>;

pub const AUTHORIZATION: &str = "Authorization";

/// The single network call the pipeline makes.
pub trait Transport {
    fn fetch(&self, url: &str, headers: &Headers) -> Result<Vec<u8>>;
}

impl<'a, T: Transport + ?Sized> Transport for &'a T {
    fn fetch(&self, url: &str, headers: &Headers) -> Result<Vec<u8>> {
        (**self).fetch(url, headers)
    }
}

/// Blocking GET through reqwest. Non-2xx answers are errors.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<HttpTransport> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, headers: &Headers) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        for (name, values) in headers {
            for value in values {
                request = request.header(name.as_str(), value.as_str());
            }
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            bail!(ErrorKind::HttpStatus(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause after each failed attempt, including the last one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            delay: Duration::from_secs(5 * 60),
        }
    }
}

/// What a best-effort fetch ended with.
#[derive(Debug)]
pub struct Fetched {
    /// `None` when every attempt failed.
    pub body: Option<Vec<u8>>,
    pub attempts: u32,
    pub last_error: Option<Error>,
}

/// Calls `transport` with `token` as the `Authorization` header until it
/// succeeds or `policy.max_attempts` calls have failed.
///
/// Never fails: exhausting the attempts is logged and reported through
/// `Fetched::last_error` so the caller can carry on with what it has.
pub fn fetch_with_retry<T: Transport>(
    transport: &T,
    url: &str,
    token: &str,
    policy: &RetryPolicy,
) -> Fetched {
    debug!("Get from Rest bloomsky API {}", url);

    let mut headers = Headers::new();
    headers.insert(AUTHORIZATION.to_string(), vec![token.to_string()]);

    let mut last_error = None;
    let mut attempts = 0;
    while attempts < policy.max_attempts {
        attempts += 1;
        match transport.fetch(url, &headers) {
            Ok(body) => {
                return Fetched {
                    body: Some(body),
                    attempts,
                    last_error: None,
                };
            }
            Err(e) => {
                error!(
                    "Problem with call rest (attempt {}/{}), check the URL and the secret ID in the config: {}",
                    attempts, policy.max_attempts, e
                );
                last_error = Some(e);
                thread::sleep(policy.delay);
            }
        }
    }

    if let Some(ref e) = last_error {
        error!("Giving up on {} after {} attempts: {}", url, attempts, e);
    }
    Fetched {
        body: None,
        attempts,
        last_error,
    }
}
