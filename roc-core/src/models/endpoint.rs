use std::fmt;

use serde::{Deserialize, Serialize};

use crate::marshal::NativeEndpoint;

use super::error::RocError;
use super::network::Protocol;

/// Address of one network endpoint.
///
/// A plain value: it is marshalled into a native endpoint for a single bind or
/// connect call and not retained afterwards. No field is validated here; the
/// native layer decides what is legal.
///
/// URI form: `<scheme>://<host>[:<port>][<resource>]`, e.g.
/// `rtp+rs8m://192.168.0.1:10001` or `rtsp://[::1]/live?ch=1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub protocol: Option<Protocol>,
    /// IP address or hostname. Empty means unset.
    pub host: String,
    pub port: Option<u16>,
    /// Percent-encoded path and query, RTSP only.
    pub resource: Option<String>,
    /// Service name or numeric port, used when `port` is unset.
    pub service: Option<String>,
}

impl Endpoint {
    pub fn new(protocol: Protocol, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: Some(protocol),
            host: host.into(),
            port: Some(port),
            ..Default::default()
        }
    }

    /// Parse a URI through the native parser.
    pub fn parse(uri: &str) -> Result<Self, RocError> {
        let native = NativeEndpoint::from_uri(uri)?;

        let protocol = Protocol::from_native(native.protocol()?);
        let host = native.host()?;
        // An unset port is reported as a failed get.
        let port = native.port().ok().and_then(|port| u16::try_from(port).ok());
        let resource = Some(native.resource()?).filter(|r| !r.is_empty());

        Ok(Self {
            protocol,
            host,
            port,
            resource,
            service: None,
        })
    }

    /// Format the endpoint as a URI through the native formatter.
    pub fn uri(&self) -> Result<String, RocError> {
        NativeEndpoint::from_endpoint(self)?.uri()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.protocol {
            Some(protocol) => write!(f, "{}://", protocol)?,
            None => f.write_str("<unset>://")?,
        }
        if self.host.contains(':') {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(&self.host)?;
        }
        match (self.port, &self.service) {
            (Some(port), _) => write!(f, ":{}", port)?,
            (None, Some(service)) => write!(f, ":{}", service)?,
            (None, None) => {}
        }
        if let Some(resource) = &self.resource {
            f.write_str(resource)?;
        }
        Ok(())
    }
}
