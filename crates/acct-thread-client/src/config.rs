use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::ClientError;

/// Public server used when no endpoint is given.
pub const DEFAULT_ENDPOINT: &str = "ws://s2.ripple.com:443";

const SCHEME_PREFIX: &str = "ws://";

/// Env var bounding the wait for each response, in seconds.
pub const RESPONSE_TIMEOUT_ENV: &str = "ACCT_THREAD_RESPONSE_TIMEOUT_SECS";
/// Env var bounding the connection handshake, in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "ACCT_THREAD_CONNECT_TIMEOUT_SECS";

/// A WebSocket server address of the form `ws://<host>:<port>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    raw: String,
    url: Url,
}

impl Endpoint {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

impl FromStr for Endpoint {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ClientError::InvalidEndpoint {
            endpoint: s.to_string(),
            reason: reason.to_string(),
        };
        if !s.starts_with(SCHEME_PREFIX) {
            return Err(invalid("expected \"ws://\""));
        }
        // The port must be spelled out even when it is the scheme default.
        let port = s.rsplit_once(':').map(|(_, port)| port).unwrap_or_default();
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                "expected to end with a port specifier (colon followed by digits), e.g. ws://s2.ripple.com:443",
            ));
        }
        let url = Url::parse(s).map_err(|e| invalid(&e.to_string()))?;
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        Ok(Self { raw: s.to_string(), url })
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            raw: DEFAULT_ENDPOINT.to_string(),
            url: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endpoint({})", self.raw)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Connection settings for a ledger client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    /// Bound on the WebSocket handshake. `None` waits as long as the OS does.
    pub connect_timeout: Option<Duration>,
    /// Bound on the wait for each matching response. `None` waits forever.
    pub response_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, ..Self::default() }
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Apply timeouts from the environment. Unset, empty, or zero values leave
    /// the corresponding wait unbounded.
    pub fn from_env(endpoint: Endpoint) -> Result<Self, ClientError> {
        Self::from_lookup(endpoint, |key| std::env::var(key).ok())
    }

    fn from_lookup(
        endpoint: Endpoint,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ClientError> {
        let secs = |key: &str| -> Result<Option<Duration>, ClientError> {
            let Some(raw) = lookup(key) else { return Ok(None) };
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            let value: u64 = raw.parse().map_err(|_| {
                ClientError::InvalidConfig(format!(
                    "{key} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            Ok((value > 0).then(|| Duration::from_secs(value)))
        };
        Ok(Self {
            endpoint,
            connect_timeout: secs(CONNECT_TIMEOUT_ENV)?,
            response_timeout: secs(RESPONSE_TIMEOUT_ENV)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ClientConfig::default();
        assert_eq!(c.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert!(c.response_timeout.is_none());
        assert!(c.connect_timeout.is_none());
    }

    #[test]
    fn parses_endpoint() {
        let e: Endpoint = "ws://localhost:6006".parse().unwrap();
        assert_eq!(e.host(), Some("localhost"));
        assert_eq!(e.to_string(), "ws://localhost:6006");
    }

    #[test]
    fn default_port_must_be_explicit() {
        let e: Endpoint = "ws://s2.ripple.com:80".parse().unwrap();
        assert_eq!(e.as_str(), "ws://s2.ripple.com:80");
    }

    #[test]
    fn rejects_wrong_scheme() {
        let err = "wss://s2.ripple.com:443".parse::<Endpoint>().unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
        assert!("http://s2.ripple.com:443".parse::<Endpoint>().is_err());
    }

    #[test]
    fn rejects_missing_port() {
        assert!("ws://s2.ripple.com".parse::<Endpoint>().is_err());
        assert!("ws://s2.ripple.com:".parse::<Endpoint>().is_err());
        assert!("ws://s2.ripple.com:44a".parse::<Endpoint>().is_err());
    }

    #[test]
    fn timeouts_from_lookup() {
        let c = ClientConfig::from_lookup(Endpoint::default(), |key| match key {
            RESPONSE_TIMEOUT_ENV => Some("30".into()),
            CONNECT_TIMEOUT_ENV => Some("0".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(c.response_timeout, Some(Duration::from_secs(30)));
        assert_eq!(c.connect_timeout, None);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(Endpoint::default(), |key| {
            (key == RESPONSE_TIMEOUT_ENV).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(RESPONSE_TIMEOUT_ENV));
    }

    #[test]
    fn builder_timeouts() {
        let c = ClientConfig::new(Endpoint::default())
            .with_response_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2));
        assert_eq!(c.response_timeout, Some(Duration::from_secs(5)));
        assert_eq!(c.connect_timeout, Some(Duration::from_secs(2)));
    }
}
