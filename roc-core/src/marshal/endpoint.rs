use std::ffi::{c_char, c_int, CStr};
use std::ptr;

use roc_sys::*;

use crate::models::endpoint::Endpoint;
use crate::models::error::{check_status, RocError};

use super::{from_native_str, to_native_str};

type StringGetter = unsafe extern "C" fn(*const roc_endpoint, *mut c_char, *mut usize) -> c_int;

/// Owned native endpoint handle, deallocated on drop.
///
/// Lives only for the duration of one bind, connect or URI conversion.
pub(crate) struct NativeEndpoint {
    raw: *mut roc_endpoint,
}

impl NativeEndpoint {
    pub fn allocate() -> Result<Self, RocError> {
        let mut raw = ptr::null_mut();
        check_status("roc_endpoint_allocate()", unsafe { roc_endpoint_allocate(&mut raw) })?;
        Ok(Self { raw })
    }

    /// Marshal every field of `endpoint`. Unset fields are left unset on the
    /// native side, except the protocol, which is always passed so the native
    /// layer rejects a missing one.
    pub fn from_endpoint(endpoint: &Endpoint) -> Result<Self, RocError> {
        let native = Self::allocate()?;

        let protocol = endpoint.protocol.map_or(0, |p| p.to_native());
        check_status("roc_endpoint_set_protocol()", unsafe {
            roc_endpoint_set_protocol(native.raw, protocol)
        })?;

        if !endpoint.host.is_empty() {
            let host = to_native_str(&endpoint.host)?;
            check_status("roc_endpoint_set_host()", unsafe {
                roc_endpoint_set_host(native.raw, host.as_ptr())
            })?;
        }

        if let Some(port) = endpoint.port {
            check_status("roc_endpoint_set_port()", unsafe {
                roc_endpoint_set_port(native.raw, c_int::from(port))
            })?;
        }

        if let Some(resource) = &endpoint.resource {
            let resource = to_native_str(resource)?;
            check_status("roc_endpoint_set_resource()", unsafe {
                roc_endpoint_set_resource(native.raw, resource.as_ptr())
            })?;
        }

        if let Some(service) = &endpoint.service {
            let service = to_native_str(service)?;
            check_status("roc_endpoint_set_service()", unsafe {
                roc_endpoint_set_service(native.raw, service.as_ptr())
            })?;
        }

        Ok(native)
    }

    pub fn from_uri(uri: &str) -> Result<Self, RocError> {
        let native = Self::allocate()?;
        let uri = to_native_str(uri)?;
        check_status("roc_endpoint_set_uri()", unsafe { roc_endpoint_set_uri(native.raw, uri.as_ptr()) })?;
        Ok(native)
    }

    pub fn as_ptr(&self) -> *const roc_endpoint {
        self.raw
    }

    pub fn as_mut_ptr(&mut self) -> *mut roc_endpoint {
        self.raw
    }

    pub fn protocol(&self) -> Result<roc_protocol, RocError> {
        let mut proto = 0;
        check_status("roc_endpoint_get_protocol()", unsafe {
            roc_endpoint_get_protocol(self.raw, &mut proto)
        })?;
        Ok(proto)
    }

    pub fn port(&self) -> Result<c_int, RocError> {
        let mut port = 0;
        check_status("roc_endpoint_get_port()", unsafe { roc_endpoint_get_port(self.raw, &mut port) })?;
        Ok(port)
    }

    pub fn host(&self) -> Result<String, RocError> {
        self.read_string("roc_endpoint_get_host()", roc_endpoint_get_host)
    }

    pub fn resource(&self) -> Result<String, RocError> {
        self.read_string("roc_endpoint_get_resource()", roc_endpoint_get_resource)
    }

    pub fn uri(&self) -> Result<String, RocError> {
        self.read_string("roc_endpoint_get_uri()", roc_endpoint_get_uri)
    }

    /// Query the required size with a null buffer, then fill.
    fn read_string(&self, call: &'static str, getter: StringGetter) -> Result<String, RocError> {
        let mut size = 0usize;
        check_status(call, unsafe { getter(self.raw, ptr::null_mut(), &mut size) })?;

        let mut buf = vec![0u8; size.max(1)];
        let mut size = buf.len();
        check_status(call, unsafe { getter(self.raw, buf.as_mut_ptr().cast(), &mut size) })?;

        Ok(CStr::from_bytes_until_nul(&buf).map(from_native_str).unwrap_or_default())
    }
}

impl Drop for NativeEndpoint {
    fn drop(&mut self) {
        let code = unsafe { roc_endpoint_deallocate(self.raw) };
        if code != 0 {
            log::warn!("roc_endpoint_deallocate(): {}", code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::network::Protocol;

    #[test]
    fn marshals_all_fields() {
        let endpoint = Endpoint {
            protocol: Some(Protocol::Rtsp),
            host: "127.0.0.1".into(),
            port: Some(8554),
            resource: Some("/live".into()),
            service: None,
        };

        let native = NativeEndpoint::from_endpoint(&endpoint).unwrap();
        assert_eq!(native.protocol().unwrap(), ROC_PROTO_RTSP);
        assert_eq!(native.host().unwrap(), "127.0.0.1");
        assert_eq!(native.port().unwrap(), 8554);
        assert_eq!(native.resource().unwrap(), "/live");
        assert_eq!(native.uri().unwrap(), "rtsp://127.0.0.1:8554/live");
    }

    #[test]
    fn missing_protocol_fails_at_set_protocol() {
        let err = NativeEndpoint::from_endpoint(&Endpoint::default()).err().unwrap();
        assert_eq!(err.to_string(), "roc_endpoint_set_protocol(): -1");
    }

    #[test]
    fn bad_host_fails_at_set_host() {
        let endpoint = Endpoint {
            protocol: Some(Protocol::Rtp),
            host: "not a host".into(),
            ..Default::default()
        };

        let err = NativeEndpoint::from_endpoint(&endpoint).err().unwrap();
        assert_eq!(err.to_string(), "roc_endpoint_set_host(): -1");
    }

    #[test]
    fn unknown_service_fails_at_set_service() {
        let endpoint = Endpoint {
            protocol: Some(Protocol::Rtp),
            host: "127.0.0.1".into(),
            service: Some("gopher".into()),
            ..Default::default()
        };

        let err = NativeEndpoint::from_endpoint(&endpoint).err().unwrap();
        assert_eq!(err.to_string(), "roc_endpoint_set_service(): -1");
    }

    #[test]
    fn uri_with_interior_nul_is_rejected_before_native_call() {
        let err = NativeEndpoint::from_uri("rtp://\0").err().unwrap();
        assert_eq!(err, RocError::InteriorNul(6));
    }
}
