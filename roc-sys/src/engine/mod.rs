//! In-process reference engine implementing the roc C ABI.

mod config;
mod context;
mod endpoint;
mod error;
mod ffi;
mod log;
mod receiver;
mod sender;

use crate::types::roc_version;

pub use context::*;
pub use endpoint::{
    roc_endpoint, roc_endpoint_allocate, roc_endpoint_deallocate, roc_endpoint_get_host,
    roc_endpoint_get_port, roc_endpoint_get_protocol, roc_endpoint_get_resource, roc_endpoint_get_uri,
    roc_endpoint_set_host, roc_endpoint_set_port, roc_endpoint_set_protocol, roc_endpoint_set_resource,
    roc_endpoint_set_service, roc_endpoint_set_uri,
};
pub use self::log::{roc_log_set_handler, roc_log_set_level};
pub use receiver::*;
pub use sender::*;

/// Report the engine version, which tracks this crate's version.
pub unsafe extern "C" fn roc_version_load(version: *mut roc_version) {
    let Some(version) = (unsafe { version.as_mut() }) else {
        return;
    };

    let part = |s: &str| s.parse().unwrap_or(0);
    *version = roc_version {
        major: part(env!("CARGO_PKG_VERSION_MAJOR")),
        minor: part(env!("CARGO_PKG_VERSION_MINOR")),
        patch: part(env!("CARGO_PKG_VERSION_PATCH")),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_package() {
        let mut version = roc_version::default();
        unsafe { roc_version_load(&mut version) };

        assert_eq!(version.major.to_string(), env!("CARGO_PKG_VERSION_MAJOR"));
        assert_eq!(version.minor.to_string(), env!("CARGO_PKG_VERSION_MINOR"));
    }
}
