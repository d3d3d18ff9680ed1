//! Bridge from the native log into the `log` facade.
//!
//! Once [`install_log_handler`] has run, every native message is re-emitted
//! with target `roc::<component>`, so it can be filtered like any other
//! module's output.

use std::ffi::{c_char, CStr};

use roc_sys::{roc_log_level, roc_log_set_handler, roc_log_set_level};

use crate::marshal::from_native_str;
use crate::models::media::LogLevel;

/// Set the most verbose level the native layer reports.
pub fn set_log_level(level: LogLevel) {
    unsafe { roc_log_set_level(level.to_native()) };
}

/// Mirror the current `log::max_level()` into the native layer.
pub fn sync_log_level() {
    set_log_level(LogLevel::from(log::max_level()));
}

/// Route native log messages into the `log` facade.
pub fn install_log_handler() {
    unsafe { roc_log_set_handler(Some(forward)) };
}

/// Restore the native default handler.
pub fn reset_log_handler() {
    unsafe { roc_log_set_handler(None) };
}

fn to_log_level(level: LogLevel) -> Option<log::Level> {
    match level {
        LogLevel::None => None,
        LogLevel::Error => Some(log::Level::Error),
        LogLevel::Info => Some(log::Level::Info),
        LogLevel::Debug => Some(log::Level::Debug),
        LogLevel::Trace => Some(log::Level::Trace),
    }
}

unsafe extern "C" fn forward(level: roc_log_level, component: *const c_char, message: *const c_char) {
    // Must not unwind into native code.
    let _ = std::panic::catch_unwind(|| {
        let Some(level) = to_log_level(LogLevel::from_native(level)) else {
            return;
        };
        let read = |ptr: *const c_char| {
            if ptr.is_null() {
                String::new()
            } else {
                from_native_str(unsafe { CStr::from_ptr(ptr) })
            }
        };

        let target = format!("roc::{}", read(component));
        log::log!(target: target.as_str(), level, "{}", read(message));
    });
}
