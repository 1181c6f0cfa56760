use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{LbError, Result};

/// A backend known to the load balancer, identified by `host:port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Server {
    host: String,
    port: u16,
    zone: Option<String>,
}

impl Server {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            zone: None,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn id(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Case-insensitive zone comparison. A server without a zone never matches.
    pub fn is_in_zone(&self, zone: &str) -> bool {
        match self.zone.as_deref() {
            Some(own) => own.to_lowercase() == zone.to_lowercase(),
            None => false,
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            Some(zone) => write!(f, "{}:{} ({})", self.host, self.port, zone),
            None => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

impl FromStr for Server {
    type Err = LbError;

    /// Parses the `host:port` form used in server lists.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| LbError::InvalidServer {
            entry: s.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = s.rsplit_once(':').ok_or_else(|| invalid("expected host:port"))?;
        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        let port = port.parse::<u16>().map_err(|_| invalid("port is not a valid u16"))?;

        Ok(Server::new(host, port))
    }
}

/// A server as it appears in the `[[servers]]` configuration table.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    pub address: String,
    #[serde(default)]
    pub zone: Option<String>,
}

impl ServerEntry {
    pub fn to_server(&self) -> Result<Server> {
        let server: Server = self.address.parse()?;
        Ok(match &self.zone {
            Some(zone) => server.with_zone(zone.clone()),
            None => server,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let server: Server = "mpeg-dash-processor-1:8080".parse().unwrap();
        assert_eq!(server.host(), "mpeg-dash-processor-1");
        assert_eq!(server.port(), 8080);
        assert_eq!(server.zone(), None);
        assert_eq!(server.id(), "mpeg-dash-processor-1:8080");
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!("no-port".parse::<Server>().is_err());
        assert!(":8080".parse::<Server>().is_err());
        assert!("host:99999".parse::<Server>().is_err());
        assert!("host:abc".parse::<Server>().is_err());
    }

    #[test]
    fn zone_match_ignores_case() {
        let server = Server::new("a", 1).with_zone("US-EAST-1");
        assert!(server.is_in_zone("us-east-1"));
        assert!(!server.is_in_zone("us-west-1"));
        assert!(!Server::new("b", 1).is_in_zone("us-east-1"));
    }

    #[test]
    fn entry_carries_zone() {
        let entry = ServerEntry {
            address: "10.0.0.1:80".to_string(),
            zone: Some("east".to_string()),
        };
        let server = entry.to_server().unwrap();
        assert_eq!(server.zone(), Some("east"));
        assert_eq!(server.to_string(), "10.0.0.1:80 (east)");
    }
}
