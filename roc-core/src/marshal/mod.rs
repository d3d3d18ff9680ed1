//! Conversions between Rust values and their native representation.
//!
//! Everything here is pure except [`NativeEndpoint`], which owns a transient
//! native endpoint handle and releases it when dropped.

mod endpoint;

use std::ffi::{c_uint, CStr, CString};

use crate::models::error::RocError;

pub(crate) use endpoint::NativeEndpoint;

pub fn to_native_bool(value: bool) -> c_uint {
    if value {
        1
    } else {
        0
    }
}

/// Copy a string into a NUL-terminated buffer.
///
/// The buffer is freed when the returned `CString` is dropped, so callers keep
/// it alive until the native call that borrows it has returned.
pub fn to_native_str(value: &str) -> Result<CString, RocError> {
    CString::new(value).map_err(|err| RocError::InteriorNul(err.nul_position()))
}

pub fn from_native_str(value: &CStr) -> String {
    value.to_string_lossy().into_owned()
}
