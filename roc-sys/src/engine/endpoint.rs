use std::ffi::{c_char, c_int};

use crate::types::*;

use super::error::EngineError;
use super::ffi::{deref, deref_mut, enter, parse_str, store, write_str};

const PROTOCOLS: &[(roc_protocol, &str)] = &[
    (ROC_PROTO_RTSP, "rtsp"),
    (ROC_PROTO_RTP, "rtp"),
    (ROC_PROTO_RTP_RS8M_SOURCE, "rtp+rs8m"),
    (ROC_PROTO_RS8M_REPAIR, "rs8m"),
    (ROC_PROTO_RTP_LDPC_SOURCE, "rtp+ldpc"),
    (ROC_PROTO_LDPC_REPAIR, "ldpc"),
    (ROC_PROTO_RTCP, "rtcp"),
];

const SERVICES: &[(&str, u16)] = &[("rtsp", 554), ("rtp", 5004), ("rtcp", 5005)];

pub fn scheme(proto: roc_protocol) -> Option<&'static str> {
    PROTOCOLS.iter().find(|(p, _)| *p == proto).map(|(_, s)| *s)
}

fn from_scheme(scheme: &str) -> Option<roc_protocol> {
    PROTOCOLS
        .iter()
        .find(|(_, s)| s.eq_ignore_ascii_case(scheme))
        .map(|(p, _)| *p)
}

fn default_port(proto: roc_protocol) -> Option<u16> {
    match proto {
        ROC_PROTO_RTSP => Some(554),
        _ => None,
    }
}

fn service_port(service: &str) -> Option<u16> {
    service.parse().ok().or_else(|| {
        SERVICES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(service))
            .map(|(_, port)| *port)
    })
}

/// Which protocols each interface accepts.
pub fn interface_accepts(iface: roc_interface, proto: roc_protocol) -> bool {
    match iface {
        ROC_INTERFACE_CONSOLIDATED => proto == ROC_PROTO_RTSP,
        ROC_INTERFACE_AUDIO_SOURCE => matches!(
            proto,
            ROC_PROTO_RTP | ROC_PROTO_RTP_RS8M_SOURCE | ROC_PROTO_RTP_LDPC_SOURCE
        ),
        ROC_INTERFACE_AUDIO_REPAIR => matches!(proto, ROC_PROTO_RS8M_REPAIR | ROC_PROTO_LDPC_REPAIR),
        ROC_INTERFACE_AUDIO_CONTROL => proto == ROC_PROTO_RTCP,
        _ => false,
    }
}

fn validate_host(host: &str) -> Result<(), EngineError> {
    let valid = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':' | '%'));
    if !valid {
        return Err(EngineError::InvalidEndpoint(format!("bad host {:?}", host)));
    }
    Ok(())
}

fn validate_resource(resource: &str) -> Result<(), EngineError> {
    let valid = (resource.starts_with('/') || resource.starts_with('?'))
        && !resource.chars().any(|c| c.is_whitespace() || c == '#');
    if !valid {
        return Err(EngineError::InvalidEndpoint(format!("bad resource {:?}", resource)));
    }
    Ok(())
}

/// A fully specified network address, as used by bind and connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub protocol: roc_protocol,
    pub host: String,
    pub port: u16,
}

/// Network endpoint description.
///
/// Every field is optional until the endpoint is used; bind, connect and
/// `roc_endpoint_get_uri` check that the combination is complete.
#[derive(Debug, Clone, Default)]
pub struct roc_endpoint {
    protocol: Option<roc_protocol>,
    host: Option<String>,
    port: Option<u16>,
    resource: Option<String>,
    service: Option<String>,
}

impl roc_endpoint {
    fn parse_uri(uri: &str) -> Result<Self, EngineError> {
        let invalid = |why: &str| EngineError::InvalidUri(format!("{}: {:?}", why, uri));

        let (scheme, rest) = uri.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
        let protocol = from_scheme(scheme).ok_or_else(|| invalid("unknown scheme"))?;

        let (host, rest) = if let Some(bracketed) = rest.strip_prefix('[') {
            let end = bracketed.find(']').ok_or_else(|| invalid("unterminated ipv6 host"))?;
            (&bracketed[..end], &bracketed[end + 1..])
        } else {
            let end = rest.find([':', '/', '?']).unwrap_or(rest.len());
            (&rest[..end], &rest[end..])
        };
        validate_host(host)?;

        let (port, resource) = match rest.strip_prefix(':') {
            Some(rest) => {
                let end = rest.find(['/', '?']).unwrap_or(rest.len());
                let port = rest[..end].parse::<u16>().map_err(|_| invalid("bad port"))?;
                (Some(port), &rest[end..])
            }
            None => (None, rest),
        };

        let resource = if resource.is_empty() {
            None
        } else {
            validate_resource(resource)?;
            Some(resource.to_string())
        };

        let endpoint = Self {
            protocol: Some(protocol),
            host: Some(host.to_string()),
            port,
            resource,
            service: None,
        };
        endpoint.resolve()?;

        Ok(endpoint)
    }

    /// Check the endpoint is complete and compute the effective port.
    pub fn resolve(&self) -> Result<Resolved, EngineError> {
        let protocol = self.protocol.ok_or(EngineError::NotSet("protocol"))?;
        let host = self.host.clone().ok_or(EngineError::NotSet("host"))?;

        if self.resource.is_some() && protocol != ROC_PROTO_RTSP {
            return Err(EngineError::InvalidEndpoint(format!(
                "resource is not allowed for {}",
                scheme(protocol).unwrap_or("?")
            )));
        }

        let port = self
            .port
            .or_else(|| self.service.as_deref().and_then(service_port))
            .or_else(|| default_port(protocol))
            .ok_or_else(|| {
                EngineError::InvalidEndpoint(format!("port is required for {}", scheme(protocol).unwrap_or("?")))
            })?;

        Ok(Resolved { protocol, host, port })
    }

    fn format_uri(&self) -> Result<String, EngineError> {
        let resolved = self.resolve()?;

        let mut uri = String::new();
        uri.push_str(scheme(resolved.protocol).unwrap_or("?"));
        uri.push_str("://");
        if resolved.host.contains(':') {
            uri.push_str(&format!("[{}]", resolved.host));
        } else {
            uri.push_str(&resolved.host);
        }
        if self.port.is_some() || self.service.is_some() {
            uri.push_str(&format!(":{}", resolved.port));
        }
        if let Some(resource) = &self.resource {
            uri.push_str(resource);
        }

        Ok(uri)
    }

}

pub unsafe extern "C" fn roc_endpoint_allocate(result: *mut *mut roc_endpoint) -> c_int {
    enter("endpoint", || unsafe { store(result, Box::default()) })
}

pub unsafe extern "C" fn roc_endpoint_set_uri(endpoint: *mut roc_endpoint, uri: *const c_char) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref_mut(endpoint)? };
        let uri = unsafe { parse_str(uri)? };
        *endpoint = roc_endpoint::parse_uri(uri)?;
        Ok(())
    })
}

pub unsafe extern "C" fn roc_endpoint_set_protocol(endpoint: *mut roc_endpoint, proto: roc_protocol) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref_mut(endpoint)? };
        if scheme(proto).is_none() {
            return Err(EngineError::InvalidEndpoint(format!("unknown protocol {}", proto)));
        }
        endpoint.protocol = Some(proto);
        Ok(())
    })
}

pub unsafe extern "C" fn roc_endpoint_set_host(endpoint: *mut roc_endpoint, host: *const c_char) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref_mut(endpoint)? };
        let host = unsafe { parse_str(host)? };
        validate_host(host)?;
        endpoint.host = Some(host.to_string());
        Ok(())
    })
}

/// Set the port; `-1` clears it.
pub unsafe extern "C" fn roc_endpoint_set_port(endpoint: *mut roc_endpoint, port: c_int) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref_mut(endpoint)? };
        endpoint.port = match port {
            -1 => None,
            port => Some(
                u16::try_from(port)
                    .map_err(|_| EngineError::InvalidEndpoint(format!("port {} out of range", port)))?,
            ),
        };
        Ok(())
    })
}

pub unsafe extern "C" fn roc_endpoint_set_resource(
    endpoint: *mut roc_endpoint,
    encoded_resource: *const c_char,
) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref_mut(endpoint)? };
        let resource = unsafe { parse_str(encoded_resource)? };
        if resource.is_empty() {
            endpoint.resource = None;
            return Ok(());
        }
        validate_resource(resource)?;
        endpoint.resource = Some(resource.to_string());
        Ok(())
    })
}

pub unsafe extern "C" fn roc_endpoint_set_service(endpoint: *mut roc_endpoint, service: *const c_char) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref_mut(endpoint)? };
        let service = unsafe { parse_str(service)? };
        if service_port(service).is_none() {
            return Err(EngineError::InvalidEndpoint(format!("unknown service {:?}", service)));
        }
        endpoint.service = Some(service.to_string());
        Ok(())
    })
}

pub unsafe extern "C" fn roc_endpoint_get_uri(
    endpoint: *const roc_endpoint,
    buf: *mut c_char,
    bufsz: *mut usize,
) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref(endpoint)? };
        let uri = endpoint.format_uri()?;
        unsafe { write_str(&uri, buf, bufsz) }
    })
}

pub unsafe extern "C" fn roc_endpoint_get_protocol(endpoint: *const roc_endpoint, proto: *mut roc_protocol) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref(endpoint)? };
        let proto = unsafe { deref_mut(proto)? };
        *proto = endpoint.protocol.ok_or(EngineError::NotSet("protocol"))?;
        Ok(())
    })
}

pub unsafe extern "C" fn roc_endpoint_get_host(
    endpoint: *const roc_endpoint,
    buf: *mut c_char,
    bufsz: *mut usize,
) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref(endpoint)? };
        let host = endpoint.host.as_deref().ok_or(EngineError::NotSet("host"))?;
        unsafe { write_str(host, buf, bufsz) }
    })
}

pub unsafe extern "C" fn roc_endpoint_get_port(endpoint: *const roc_endpoint, port: *mut c_int) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref(endpoint)? };
        let port = unsafe { deref_mut(port)? };
        *port = endpoint.port.ok_or(EngineError::NotSet("port"))? as c_int;
        Ok(())
    })
}

/// Writes an empty string when no resource is set.
pub unsafe extern "C" fn roc_endpoint_get_resource(
    endpoint: *const roc_endpoint,
    buf: *mut c_char,
    bufsz: *mut usize,
) -> c_int {
    enter("endpoint", || {
        let endpoint = unsafe { deref(endpoint)? };
        let resource = endpoint.resource.as_deref().unwrap_or("");
        unsafe { write_str(resource, buf, bufsz) }
    })
}

pub unsafe extern "C" fn roc_endpoint_deallocate(endpoint: *mut roc_endpoint) -> c_int {
    enter("endpoint", || {
        if endpoint.is_null() {
            return Err(EngineError::NullPointer);
        }
        drop(unsafe { Box::from_raw(endpoint) });
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rtp_uri() {
        let endpoint = roc_endpoint::parse_uri("rtp+rs8m://192.168.0.1:10001").unwrap();
        let resolved = endpoint.resolve().unwrap();

        assert_eq!(resolved.protocol, ROC_PROTO_RTP_RS8M_SOURCE);
        assert_eq!(resolved.host, "192.168.0.1");
        assert_eq!(resolved.port, 10001);
    }

    #[test]
    fn parse_rtsp_uri_with_default_port_and_resource() {
        let endpoint = roc_endpoint::parse_uri("rtsp://example.com/path?query").unwrap();

        assert_eq!(endpoint.resolve().unwrap().port, 554);
        assert_eq!(endpoint.format_uri().unwrap(), "rtsp://example.com/path?query");
    }

    #[test]
    fn parse_ipv6_host() {
        let endpoint = roc_endpoint::parse_uri("rtcp://[::1]:5005").unwrap();

        assert_eq!(endpoint.resolve().unwrap().host, "::1");
        assert_eq!(endpoint.format_uri().unwrap(), "rtcp://[::1]:5005");
    }

    #[test]
    fn get_uri_formats_ipv6_host_port_and_resource() {
        let mut endpoint: *mut roc_endpoint = std::ptr::null_mut();
        unsafe {
            assert_eq!(roc_endpoint_allocate(&mut endpoint), 0);
            assert_eq!(roc_endpoint_set_uri(endpoint, c"rtsp://[fe80::1]:8554/live?ch=2".as_ptr()), 0);

            let mut size = 0usize;
            assert_eq!(roc_endpoint_get_uri(endpoint, std::ptr::null_mut(), &mut size), 0);
            let mut buf = vec![0 as c_char; size];
            assert_eq!(roc_endpoint_get_uri(endpoint, buf.as_mut_ptr(), &mut size), 0);

            let uri = std::ffi::CStr::from_ptr(buf.as_ptr());
            assert_eq!(uri.to_str().unwrap(), "rtsp://[fe80::1]:8554/live?ch=2");

            assert_eq!(roc_endpoint_deallocate(endpoint), 0);
        }
    }

    #[test]
    fn parse_rejects_bad_uris() {
        for uri in [
            "192.168.0.1:10001",
            "udp://192.168.0.1:10001",
            "rtp://192.168.0.1",
            "rtp://192.168.0.1:99999",
            "rtp://192.168.0.1:10001/path",
            "rtsp://[::1/path",
            "rtsp://:554",
        ] {
            assert!(roc_endpoint::parse_uri(uri).is_err(), "{}", uri);
        }
    }

    #[test]
    fn resolve_uses_service_port() {
        let endpoint = roc_endpoint {
            protocol: Some(ROC_PROTO_RTP),
            host: Some("127.0.0.1".into()),
            service: Some("rtp".into()),
            ..Default::default()
        };

        assert_eq!(endpoint.resolve().unwrap().port, 5004);
        assert_eq!(endpoint.format_uri().unwrap(), "rtp://127.0.0.1:5004");
    }

    #[test]
    fn interface_protocol_matrix() {
        assert!(interface_accepts(ROC_INTERFACE_AUDIO_SOURCE, ROC_PROTO_RTP));
        assert!(interface_accepts(ROC_INTERFACE_AUDIO_REPAIR, ROC_PROTO_LDPC_REPAIR));
        assert!(interface_accepts(ROC_INTERFACE_AUDIO_CONTROL, ROC_PROTO_RTCP));
        assert!(interface_accepts(ROC_INTERFACE_CONSOLIDATED, ROC_PROTO_RTSP));

        assert!(!interface_accepts(ROC_INTERFACE_AUDIO_CONTROL, ROC_PROTO_RTSP));
        assert!(!interface_accepts(ROC_INTERFACE_AUDIO_SOURCE, ROC_PROTO_RS8M_REPAIR));
        assert!(!interface_accepts(0, ROC_PROTO_RTP));
    }

    #[test]
    fn setters_validate_arguments() {
        let mut endpoint: *mut roc_endpoint = std::ptr::null_mut();
        unsafe {
            assert_eq!(roc_endpoint_allocate(&mut endpoint), 0);

            assert_eq!(roc_endpoint_set_protocol(endpoint, 0), -1);
            assert_eq!(roc_endpoint_set_protocol(endpoint, ROC_PROTO_RTP), 0);
            assert_eq!(roc_endpoint_set_port(endpoint, 70000), -1);
            assert_eq!(roc_endpoint_set_port(endpoint, -2), -1);
            assert_eq!(roc_endpoint_set_port(endpoint, 4000), 0);
            assert_eq!(roc_endpoint_set_host(endpoint, c"".as_ptr()), -1);
            assert_eq!(roc_endpoint_set_host(endpoint, std::ptr::null()), -1);
            assert_eq!(roc_endpoint_set_host(endpoint, c"localhost".as_ptr()), 0);
            assert_eq!(roc_endpoint_set_resource(endpoint, c"path".as_ptr()), -1);
            assert_eq!(roc_endpoint_set_service(endpoint, c"".as_ptr()), -1);

            let mut port = 0;
            assert_eq!(roc_endpoint_get_port(endpoint, &mut port), 0);
            assert_eq!(port, 4000);

            assert_eq!(roc_endpoint_deallocate(endpoint), 0);
        }
    }
}
