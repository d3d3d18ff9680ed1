use std::ffi::{c_char, c_int, CStr};

use crate::types::{ROC_LOG_ERROR, ROC_OK};

use super::error::EngineError;
use super::log;

/// Runs an entry point body and converts its outcome into a status code.
///
/// Panics are caught here so they never unwind across the C boundary.
/// Failures are reported through the native log under `component`.
pub fn enter<F: FnOnce() -> Result<(), EngineError>>(component: &str, f: F) -> c_int {
    let res = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(res) => res,
        Err(_) => Err(EngineError::Panic),
    };

    match res {
        Ok(()) => ROC_OK,
        Err(err) => {
            log::emit(ROC_LOG_ERROR, component, &err.to_string());
            err.code()
        }
    }
}

/// Dereference a handle or argument pointer.
///
/// # Safety
/// A non-null `ptr` must point to a live `T` that is not aliased for `'a`.
pub unsafe fn deref_mut<'a, T>(ptr: *mut T) -> Result<&'a mut T, EngineError> {
    unsafe { ptr.as_mut() }.ok_or(EngineError::NullPointer)
}

/// Dereference a read-only argument pointer.
///
/// # Safety
/// A non-null `ptr` must point to a live `T` for `'a`.
pub unsafe fn deref<'a, T>(ptr: *const T) -> Result<&'a T, EngineError> {
    unsafe { ptr.as_ref() }.ok_or(EngineError::NullPointer)
}

/// Parse a null-terminated C string pointer into a &str.
///
/// # Safety
/// A non-null `cstr` must point to a null-terminated string valid for `'a`.
pub unsafe fn parse_str<'a>(cstr: *const c_char) -> Result<&'a str, EngineError> {
    if cstr.is_null() {
        return Err(EngineError::NullPointer);
    }

    let cstr = unsafe { CStr::from_ptr(cstr) };
    Ok(cstr.to_str()?)
}

/// Store a handle into a caller-provided result slot.
///
/// # Safety
/// A non-null `result` must be valid for writes.
pub unsafe fn store<T>(result: *mut *mut T, value: Box<T>) -> Result<(), EngineError> {
    if result.is_null() {
        return Err(EngineError::NullPointer);
    }

    unsafe { *result = Box::into_raw(value) };
    Ok(())
}

/// Copy `value` plus a terminating NUL into a caller buffer.
///
/// With a null `buf` only the required size is reported through `bufsz`.
/// A buffer that is too small fails after reporting the required size.
///
/// # Safety
/// `bufsz` must be valid for reads and writes; a non-null `buf` must be valid
/// for `*bufsz` bytes of writes.
pub unsafe fn write_str(value: &str, buf: *mut c_char, bufsz: *mut usize) -> Result<(), EngineError> {
    let bufsz = unsafe { deref_mut(bufsz)? };
    let required = value.len() + 1;

    if buf.is_null() {
        *bufsz = required;
        return Ok(());
    }

    if *bufsz < required {
        *bufsz = required;
        return Err(EngineError::BufferTooSmall(required));
    }

    unsafe {
        std::ptr::copy_nonoverlapping(value.as_ptr() as *const c_char, buf, value.len());
        *buf.add(value.len()) = 0;
    }
    *bufsz = required;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use super::*;

    #[test]
    fn enter_maps_results_to_codes() {
        assert_eq!(enter("test", || Ok(())), 0);
        assert_eq!(enter("test", || Err(EngineError::NullPointer)), -1);
    }

    #[test]
    fn enter_catches_panics() {
        let code = enter("test", || panic!("boom"));
        assert_eq!(code, -1);
    }

    #[test]
    fn parse_str_rejects_null() {
        let res = unsafe { parse_str(std::ptr::null()) };
        assert!(matches!(res, Err(EngineError::NullPointer)));
    }

    #[test]
    fn parse_str_reads_value() {
        let value = CString::new("127.0.0.1").unwrap();
        let res = unsafe { parse_str(value.as_ptr()) }.unwrap();
        assert_eq!(res, "127.0.0.1");
    }

    #[test]
    fn write_str_size_query_then_fill() {
        let mut size = 0usize;
        unsafe { write_str("rtp", std::ptr::null_mut(), &mut size) }.unwrap();
        assert_eq!(size, 4);

        let mut buf = vec![0 as c_char; size];
        unsafe { write_str("rtp", buf.as_mut_ptr(), &mut size) }.unwrap();
        let out = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(out.to_str().unwrap(), "rtp");
    }

    #[test]
    fn write_str_too_small() {
        let mut buf = [0 as c_char; 2];
        let mut size = buf.len();
        let res = unsafe { write_str("rtsp", buf.as_mut_ptr(), &mut size) };
        assert!(matches!(res, Err(EngineError::BufferTooSmall(5))));
        assert_eq!(size, 5);
    }
}
